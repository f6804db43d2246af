//! Analysis command and query handlers.

mod error;
mod generate_demo_analysis;
mod list_analyses;
mod list_analyzers;
mod run_analysis;
mod run_single_analyzer;

pub use error::AnalysisError;
pub use generate_demo_analysis::{GenerateDemoAnalysisCommand, GenerateDemoAnalysisHandler};
pub use list_analyses::{ListAnalysesHandler, ListAnalysesQuery};
pub use list_analyzers::{AnalyzerInfo, ListAnalyzersHandler};
pub use run_analysis::{
    RunAnalysisCommand, RunAnalysisHandler, RunAnalysisResult, TotalFailurePolicy,
};
pub use run_single_analyzer::{RunSingleAnalyzerCommand, RunSingleAnalyzerHandler};
