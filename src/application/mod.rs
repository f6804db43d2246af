//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer coordinates the analyzer fan-out and the ports. Command
//! handlers produce analyses; query handlers read history and the catalogue.

pub mod handlers;
mod orchestrator;

pub use handlers::*;
pub use orchestrator::{
    AnalysisOrchestrator, OrchestratorConfig, DEFAULT_ANALYZER_TIMEOUT, DEFAULT_BLOCKING_LIMIT,
    DEFAULT_MAX_CONCURRENCY,
};
