//! One analyzer's contribution to an analysis.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::domain::analyzers::{AnalyzerKind, Insights};

/// Exactly one of a payload or a failure marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalyzerOutcome {
    Completed { insights: Insights },
    Failed { error: String },
}

/// Output of a single analyzer invocation, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialAnalysis {
    pub analyzer: AnalyzerKind,
    /// Display name of the producing analyzer.
    pub agent: String,
    pub outcome: AnalyzerOutcome,
}

impl PartialAnalysis {
    pub fn completed(analyzer: AnalyzerKind, agent: impl Into<String>, insights: Insights) -> Self {
        Self {
            analyzer,
            agent: agent.into(),
            outcome: AnalyzerOutcome::Completed { insights },
        }
    }

    pub fn failed(analyzer: AnalyzerKind, agent: impl Into<String>, error: impl Display) -> Self {
        Self {
            analyzer,
            agent: agent.into(),
            outcome: AnalyzerOutcome::Failed {
                error: error.to_string(),
            },
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, AnalyzerOutcome::Completed { .. })
    }

    pub fn insights(&self) -> Option<&Insights> {
        match &self.outcome {
            AnalyzerOutcome::Completed { insights } => Some(insights),
            AnalyzerOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            AnalyzerOutcome::Completed { .. } => None,
            AnalyzerOutcome::Failed { error } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analyzers::{AnalyzerError, BusinessAnalyzer, GrowthAnalyzer};
    use crate::domain::business::BusinessDescription;

    #[test]
    fn failed_carries_error_text_and_no_insights() {
        let partial = PartialAnalysis::failed(
            AnalyzerKind::Market,
            "Market Analyzer",
            AnalyzerError::TimedOut(30_000),
        );

        assert!(!partial.is_completed());
        assert!(partial.insights().is_none());
        assert_eq!(partial.error(), Some("Analysis timed out after 30000 ms"));
    }

    #[test]
    fn completed_exposes_insights() {
        let business = BusinessDescription::new("saas", "Acme").unwrap();
        let insights = GrowthAnalyzer::new().analyze(&business).unwrap();
        let partial = PartialAnalysis::completed(AnalyzerKind::Growth, "Growth Strategist", insights);

        assert!(partial.is_completed());
        assert_eq!(partial.insights().map(|i| i.kind()), Some(AnalyzerKind::Growth));
        assert!(partial.error().is_none());
    }

    #[test]
    fn serializes_status_tag() {
        let partial = PartialAnalysis::failed(AnalyzerKind::Customer, "Customer Analyzer", "boom");
        let json = serde_json::to_value(&partial).unwrap();

        assert_eq!(json["analyzer"], "customer");
        assert_eq!(json["outcome"]["status"], "failed");
        assert_eq!(json["outcome"]["error"], "boom");
    }
}
