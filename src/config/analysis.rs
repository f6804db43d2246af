//! Analyzer fan-out configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::{OrchestratorConfig, TotalFailurePolicy};

const MAX_ANALYZER_TIMEOUT_MS: u64 = 300_000;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Per-analyzer timeout in milliseconds
    #[serde(default = "default_analyzer_timeout")]
    pub analyzer_timeout_ms: u64,

    /// Analyzers allowed to run at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Response when every analyzer failed
    #[serde(default)]
    pub on_total_failure: TotalFailurePolicy,
}

impl AnalysisConfig {
    pub fn analyzer_timeout(&self) -> Duration {
        Duration::from_millis(self.analyzer_timeout_ms)
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            analyzer_timeout: self.analyzer_timeout(),
            max_concurrency: self.max_concurrency,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.analyzer_timeout_ms == 0 || self.analyzer_timeout_ms > MAX_ANALYZER_TIMEOUT_MS {
            return Err(ValidationError::InvalidAnalyzerTimeout);
        }
        if self.max_concurrency == 0 {
            return Err(ValidationError::InvalidConcurrency);
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            analyzer_timeout_ms: default_analyzer_timeout(),
            max_concurrency: default_max_concurrency(),
            on_total_failure: TotalFailurePolicy::default(),
        }
    }
}

fn default_analyzer_timeout() -> u64 {
    30_000
}

fn default_max_concurrency() -> usize {
    3
}
