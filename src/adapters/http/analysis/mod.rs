//! HTTP adapter for analysis endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnalysisHistoryItem, AnalysisHistoryResponse, AnalyzeRequest, AnalyzerCatalogResponse,
    ErrorResponse, HealthResponse, SingleAnalyzerRequest, WelcomeResponse,
};
pub use handlers::{AnalysisAppState, ApiError};
pub use routes::analysis_routes;
