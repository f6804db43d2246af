//! ListAnalyzersHandler - analyzer catalogue.

use serde::Serialize;
use std::sync::Arc;

use crate::application::AnalysisOrchestrator;
use crate::domain::analyzers::AnalyzerKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzerInfo {
    pub kind: AnalyzerKind,
    pub name: &'static str,
    pub specialization: &'static str,
}

pub struct ListAnalyzersHandler {
    orchestrator: Arc<AnalysisOrchestrator>,
}

impl ListAnalyzersHandler {
    pub fn new(orchestrator: Arc<AnalysisOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub fn handle(&self) -> Vec<AnalyzerInfo> {
        self.orchestrator
            .registry()
            .iter()
            .map(|a| AnalyzerInfo {
                kind: a.kind(),
                name: a.display_name(),
                specialization: a.specialization(),
            })
            .collect()
    }
}
