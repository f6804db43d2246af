//! RunAnalysisHandler - Command handler for the orchestrated analysis.

use serde::Deserialize;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::AnalysisOrchestrator;
use crate::domain::analysis::{ConsolidatedAnalysis, RuleBasedGenerator};
use crate::domain::business::BusinessDescription;
use crate::domain::foundation::UserId;
use crate::ports::{AnalysisRecord, AnalysisStore};

use super::AnalysisError;

/// What to return when every analyzer failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalFailurePolicy {
    /// Return the consolidated record as is: score 70, no recommendations.
    #[default]
    Degraded,
    /// Return the rule-based analysis instead.
    RuleBased,
    /// Surface `AnalysisError::TotalFailure`.
    Error,
}

/// Command to run a full analysis.
#[derive(Debug, Clone)]
pub struct RunAnalysisCommand {
    pub business: BusinessDescription,
    /// When set, the result is persisted for this owner.
    pub owner: Option<UserId>,
}

/// Result of a full analysis.
#[derive(Debug)]
pub struct RunAnalysisResult {
    pub analysis: ConsolidatedAnalysis,
    /// Background save, if one was started. Never needs to be awaited.
    pub persistence: Option<JoinHandle<()>>,
}

pub struct RunAnalysisHandler {
    orchestrator: Arc<AnalysisOrchestrator>,
    fallback: RuleBasedGenerator,
    store: Arc<dyn AnalysisStore>,
    policy: TotalFailurePolicy,
}

impl RunAnalysisHandler {
    pub fn new(
        orchestrator: Arc<AnalysisOrchestrator>,
        store: Arc<dyn AnalysisStore>,
        policy: TotalFailurePolicy,
    ) -> Self {
        Self {
            orchestrator,
            fallback: RuleBasedGenerator::new(),
            store,
            policy,
        }
    }

    pub async fn handle(&self, cmd: RunAnalysisCommand) -> Result<RunAnalysisResult, AnalysisError> {
        let mut analysis = self.orchestrator.analyze(&cmd.business).await;

        let total_failure = !analysis.agent_insights.is_empty()
            && analysis.agent_insights.values().all(|p| !p.is_completed());
        if total_failure {
            warn!(
                business_type = %cmd.business.category(),
                policy = ?self.policy,
                "every analyzer failed"
            );
            match self.policy {
                TotalFailurePolicy::Degraded => {}
                TotalFailurePolicy::RuleBased => {
                    let failures = std::mem::take(&mut analysis.agent_insights);
                    analysis = self.fallback.generate(&cmd.business, analysis.generated_at);
                    analysis.agent_insights = failures;
                }
                TotalFailurePolicy::Error => {
                    return Err(AnalysisError::total_failure(analysis.agent_insights.len()));
                }
            }
        }

        info!(
            business_type = %analysis.business_type,
            score = analysis.score,
            recommendations = analysis.recommendations.len(),
            "analysis completed"
        );

        let persistence = cmd
            .owner
            .map(|owner| self.persist_in_background(owner, cmd.business, &analysis));

        Ok(RunAnalysisResult {
            analysis,
            persistence,
        })
    }

    fn persist_in_background(
        &self,
        owner: UserId,
        business: BusinessDescription,
        analysis: &ConsolidatedAnalysis,
    ) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let record = AnalysisRecord::new(owner, business, analysis.clone(), analysis.generated_at);

        tokio::spawn(async move {
            match store.save(&record).await {
                Ok(ack) => debug!(analysis_id = %ack.id, owner_id = %record.owner_id, "analysis persisted"),
                Err(e) => warn!(
                    error = %e,
                    owner_id = %record.owner_id,
                    "failed to persist analysis"
                ),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::OrchestratorConfig;
    use crate::domain::analyzers::{
        AnalyzerError, AnalyzerKind, AnalyzerRegistry, BusinessAnalyzer, Insights,
    };
    use crate::ports::{StoreAck, StoreError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockAnalysisStore {
        saved: Mutex<Vec<AnalysisRecord>>,
        fail_save: bool,
    }

    impl MockAnalysisStore {
        fn new() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_save: false,
            }
        }

        fn failing() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_save: true,
            }
        }

        fn saved(&self) -> Vec<AnalysisRecord> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AnalysisStore for MockAnalysisStore {
        async fn save(&self, record: &AnalysisRecord) -> Result<StoreAck, StoreError> {
            if self.fail_save {
                return Err(StoreError::unavailable("simulated outage"));
            }
            self.saved.lock().unwrap().push(record.clone());
            Ok(StoreAck { id: record.id })
        }

        async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<AnalysisRecord>, StoreError> {
            Ok(self
                .saved
                .lock()
                .unwrap()
                .iter()
                .filter(|r| &r.owner_id == owner_id)
                .cloned()
                .collect())
        }
    }

    struct AlwaysFails(AnalyzerKind);

    impl BusinessAnalyzer for AlwaysFails {
        fn kind(&self) -> AnalyzerKind {
            self.0
        }

        fn display_name(&self) -> &'static str {
            "Broken"
        }

        fn specialization(&self) -> &'static str {
            "Nothing"
        }

        fn analyze(&self, _: &BusinessDescription) -> Result<Insights, AnalyzerError> {
            Err(AnalyzerError::failed("broken"))
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn standard_orchestrator() -> Arc<AnalysisOrchestrator> {
        Arc::new(AnalysisOrchestrator::new(
            AnalyzerRegistry::standard(),
            OrchestratorConfig::default(),
        ))
    }

    fn broken_orchestrator() -> Arc<AnalysisOrchestrator> {
        let analyzers: Vec<Arc<dyn BusinessAnalyzer>> = AnalyzerKind::ALL
            .iter()
            .map(|k| Arc::new(AlwaysFails(*k)) as Arc<dyn BusinessAnalyzer>)
            .collect();
        Arc::new(AnalysisOrchestrator::new(
            AnalyzerRegistry::new(analyzers).unwrap(),
            OrchestratorConfig::default(),
        ))
    }

    fn command(owner: Option<&str>) -> RunAnalysisCommand {
        RunAnalysisCommand {
            business: BusinessDescription::new("saas", "Acme").unwrap(),
            owner: owner.map(|o| UserId::new(o).unwrap()),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn returns_consolidated_analysis() {
        let store = Arc::new(MockAnalysisStore::new());
        let handler =
            RunAnalysisHandler::new(standard_orchestrator(), store, TotalFailurePolicy::Degraded);

        let result = handler.handle(command(None)).await.unwrap();

        assert_eq!(result.analysis.business_name, "Acme");
        assert_eq!(result.analysis.kpis.len(), 4);
        assert!(!result.analysis.recommendations.is_empty());
        assert!(result.persistence.is_none());
    }

    #[tokio::test]
    async fn persists_for_known_owner() {
        let store = Arc::new(MockAnalysisStore::new());
        let handler = RunAnalysisHandler::new(
            standard_orchestrator(),
            store.clone(),
            TotalFailurePolicy::Degraded,
        );

        let result = handler.handle(command(Some("user-1"))).await.unwrap();
        result.persistence.unwrap().await.unwrap();

        let saved = store.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].owner_id.as_str(), "user-1");
        assert_eq!(saved[0].result, result.analysis);
        assert_eq!(saved[0].created_at, result.analysis.generated_at);
    }

    #[tokio::test]
    async fn persistence_failure_does_not_change_response() {
        let handler = RunAnalysisHandler::new(
            standard_orchestrator(),
            Arc::new(MockAnalysisStore::failing()),
            TotalFailurePolicy::Degraded,
        );

        let result = handler.handle(command(Some("user-1"))).await.unwrap();
        result.persistence.unwrap().await.unwrap();

        assert!(!result.analysis.recommendations.is_empty());
    }

    #[tokio::test]
    async fn degraded_policy_returns_baseline_record() {
        let handler = RunAnalysisHandler::new(
            broken_orchestrator(),
            Arc::new(MockAnalysisStore::new()),
            TotalFailurePolicy::Degraded,
        );

        let result = handler.handle(command(None)).await.unwrap();

        assert!(result.analysis.recommendations.is_empty());
        assert_eq!(result.analysis.score, 70);
    }

    #[tokio::test]
    async fn rule_based_policy_substitutes_fallback() {
        let handler = RunAnalysisHandler::new(
            broken_orchestrator(),
            Arc::new(MockAnalysisStore::new()),
            TotalFailurePolicy::RuleBased,
        );

        let result = handler.handle(command(None)).await.unwrap();

        assert_eq!(result.analysis.score, 75);
        assert_eq!(result.analysis.recommendations.len(), 3);
        assert_eq!(result.analysis.agent_insights.len(), 3);
        assert!(result.analysis.is_demo.is_none());
    }

    #[tokio::test]
    async fn error_policy_surfaces_total_failure() {
        let handler = RunAnalysisHandler::new(
            broken_orchestrator(),
            Arc::new(MockAnalysisStore::new()),
            TotalFailurePolicy::Error,
        );

        let err = handler.handle(command(Some("user-1"))).await.unwrap_err();

        assert_eq!(err, AnalysisError::total_failure(3));
    }

    #[test]
    fn policy_deserializes_snake_case() {
        let policy: TotalFailurePolicy = serde_json::from_str("\"rule_based\"").unwrap();
        assert_eq!(policy, TotalFailurePolicy::RuleBased);
        assert_eq!(TotalFailurePolicy::default(), TotalFailurePolicy::Degraded);
    }
}
