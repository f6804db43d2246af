//! GenerateDemoAnalysisHandler - rule-based analysis for anonymous callers.

use crate::domain::analysis::{ConsolidatedAnalysis, RuleBasedGenerator};
use crate::domain::business::BusinessDescription;
use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone)]
pub struct GenerateDemoAnalysisCommand {
    pub business: BusinessDescription,
}

/// Produces a demo analysis. Never persisted, never orchestrated.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenerateDemoAnalysisHandler {
    generator: RuleBasedGenerator,
}

impl GenerateDemoAnalysisHandler {
    pub fn new() -> Self {
        Self {
            generator: RuleBasedGenerator::new(),
        }
    }

    pub fn handle(&self, cmd: GenerateDemoAnalysisCommand) -> ConsolidatedAnalysis {
        self.generator
            .generate(&cmd.business, Timestamp::now())
            .into_demo()
    }
}
