//! AnalysisOrchestrator - concurrent fan-out over the analyzer registry.
//!
//! Every analyzer runs on the blocking pool with its own copy of the input,
//! bounded by a per-task timeout. A returned error, a panic, or an expired
//! timeout becomes a failure marker under that analyzer's kind; siblings are
//! never affected. The join waits for every task to settle.
//!
//! A blocking task cannot be cancelled, so an analyzer that outlives its
//! timeout keeps its thread until it returns. Blocking invocations share a
//! semaphore of [`DEFAULT_BLOCKING_LIMIT`] permits; a timed-out task holds its
//! permit until it finishes. When every permit is held by hung analyzers, new
//! invocations wait for a permit inside their own timeout and are reported as
//! timed out, instead of growing the blocking pool without bound.

use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::domain::analysis::{ConsolidatedAnalysis, Consolidator, PartialAnalysis};
use crate::domain::analyzers::{AnalyzerError, AnalyzerKind, AnalyzerRegistry, BusinessAnalyzer};
use crate::domain::business::BusinessDescription;
use crate::domain::foundation::Timestamp;

/// Default per-analyzer timeout.
pub const DEFAULT_ANALYZER_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of analyzers run at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 3;

/// Default cap on analyzer invocations occupying blocking threads, across
/// all requests.
pub const DEFAULT_BLOCKING_LIMIT: usize = 64;

#[derive(Debug, Clone, Copy)]
pub struct OrchestratorConfig {
    pub analyzer_timeout: Duration,
    pub max_concurrency: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            analyzer_timeout: DEFAULT_ANALYZER_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

pub struct AnalysisOrchestrator {
    registry: AnalyzerRegistry,
    consolidator: Consolidator,
    config: OrchestratorConfig,
    permits: Arc<Semaphore>,
}

impl AnalysisOrchestrator {
    pub fn new(registry: AnalyzerRegistry, config: OrchestratorConfig) -> Self {
        Self {
            consolidator: Consolidator::new(registry.len()),
            registry,
            config,
            permits: Arc::new(Semaphore::new(DEFAULT_BLOCKING_LIMIT)),
        }
    }

    /// Replaces the shared cap on blocking analyzer invocations.
    pub fn with_blocking_limit(mut self, limit: usize) -> Self {
        self.permits = Arc::new(Semaphore::new(limit.max(1)));
        self
    }

    pub fn registry(&self) -> &AnalyzerRegistry {
        &self.registry
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Longest a full fan-out can take: one analyzer timeout per wave of
    /// `max_concurrency` analyzers.
    pub fn fan_out_budget(&self) -> Duration {
        let concurrency = self.config.max_concurrency.max(1);
        let waves = self.registry.len().div_ceil(concurrency).max(1);
        self.config.analyzer_timeout * waves as u32
    }

    /// Runs every registered analyzer and collects one result per kind.
    pub async fn run(
        &self,
        business: &BusinessDescription,
    ) -> BTreeMap<AnalyzerKind, PartialAnalysis> {
        let started = Instant::now();
        let timeout = self.config.analyzer_timeout;

        let tasks: Vec<_> = self
            .registry
            .iter()
            .cloned()
            .map(|analyzer| {
                Self::invoke(analyzer, business.clone(), timeout, Arc::clone(&self.permits))
            })
            .collect();
        let results: Vec<PartialAnalysis> = stream::iter(tasks)
            .buffered(self.config.max_concurrency.max(1))
            .collect()
            .await;

        let failed = results.iter().filter(|p| !p.is_completed()).count();
        debug!(
            analyzers = results.len(),
            failed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fan-out settled"
        );

        results.into_iter().map(|p| (p.analyzer, p)).collect()
    }

    /// Runs one analyzer with the same containment as [`run`](Self::run).
    ///
    /// Returns `None` when `kind` is not registered.
    pub async fn run_single(
        &self,
        kind: AnalyzerKind,
        business: &BusinessDescription,
    ) -> Option<PartialAnalysis> {
        let analyzer = Arc::clone(self.registry.get(kind)?);
        Some(
            Self::invoke(
                analyzer,
                business.clone(),
                self.config.analyzer_timeout,
                Arc::clone(&self.permits),
            )
            .await,
        )
    }

    /// Fan-out followed by consolidation.
    pub async fn analyze(&self, business: &BusinessDescription) -> ConsolidatedAnalysis {
        let results = self.run(business).await;
        self.consolidator
            .consolidate(&results, business, Timestamp::now())
    }

    async fn invoke(
        analyzer: Arc<dyn BusinessAnalyzer>,
        business: BusinessDescription,
        timeout: Duration,
        permits: Arc<Semaphore>,
    ) -> PartialAnalysis {
        let kind = analyzer.kind();
        let name = analyzer.display_name();
        let started = Instant::now();

        // Waiting for a permit counts against the analyzer's timeout.
        let task = async move {
            let permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return Ok(Err(AnalyzerError::failed("analyzer pool closed"))),
            };
            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                analyzer.analyze(&business)
            })
            .await
        };

        let partial = match tokio::time::timeout(timeout, task).await {
            Ok(Ok(Ok(insights))) if insights.kind() == kind => {
                PartialAnalysis::completed(kind, name, insights)
            }
            Ok(Ok(Ok(insights))) => PartialAnalysis::failed(
                kind,
                name,
                AnalyzerError::failed(format!("returned {} insights", insights.kind())),
            ),
            Ok(Ok(Err(err))) => PartialAnalysis::failed(kind, name, err),
            Ok(Err(join_err)) => {
                PartialAnalysis::failed(kind, name, AnalyzerError::Panicked(panic_reason(join_err)))
            }
            Err(_) => PartialAnalysis::failed(
                kind,
                name,
                AnalyzerError::TimedOut(timeout.as_millis() as u64),
            ),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match partial.error() {
            None => debug!(analyzer = %kind, elapsed_ms, "analyzer completed"),
            Some(error) => warn!(analyzer = %kind, elapsed_ms, error, "analyzer failed"),
        }

        partial
    }
}

fn panic_reason(err: JoinError) -> String {
    if !err.is_panic() {
        return "task cancelled".to_string();
    }
    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
