//! RunSingleAnalyzerHandler - one analyzer in isolation.

use std::sync::Arc;

use crate::application::AnalysisOrchestrator;
use crate::domain::analysis::PartialAnalysis;
use crate::domain::analyzers::AnalyzerKind;
use crate::domain::business::BusinessDescription;

use super::AnalysisError;

#[derive(Debug, Clone)]
pub struct RunSingleAnalyzerCommand {
    pub kind: AnalyzerKind,
    pub business: BusinessDescription,
}

pub struct RunSingleAnalyzerHandler {
    orchestrator: Arc<AnalysisOrchestrator>,
}

impl RunSingleAnalyzerHandler {
    pub fn new(orchestrator: Arc<AnalysisOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Returns the raw partial result; failures are data, not errors.
    pub async fn handle(
        &self,
        cmd: RunSingleAnalyzerCommand,
    ) -> Result<PartialAnalysis, AnalysisError> {
        self.orchestrator
            .run_single(cmd.kind, &cmd.business)
            .await
            .ok_or(AnalysisError::UnknownAnalyzer(cmd.kind))
    }
}
