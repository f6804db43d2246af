//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod analysis;

pub use analysis::{
    AnalysisError, AnalyzerInfo, GenerateDemoAnalysisCommand, GenerateDemoAnalysisHandler,
    ListAnalysesHandler, ListAnalysesQuery, ListAnalyzersHandler, RunAnalysisCommand,
    RunAnalysisHandler, RunAnalysisResult, RunSingleAnalyzerCommand, RunSingleAnalyzerHandler,
    TotalFailurePolicy,
};
