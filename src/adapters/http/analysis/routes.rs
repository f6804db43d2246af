//! HTTP routes for analysis endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    analyze, analyze_demo, customer_analysis, growth_strategy, health, index, list_agents,
    list_analyses, market_research, AnalysisAppState,
};

/// Creates the analysis router with all endpoints.
///
/// Authentication is enforced per handler; the auth middleware must be
/// layered on top for `RequireAuth` to see a caller.
pub fn analysis_routes(state: AnalysisAppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/ai/comprehensive-analysis", post(analyze))
        .route("/analyze-demo", post(analyze_demo))
        .route("/analyses", get(list_analyses))
        .route("/ai/agents", get(list_agents))
        .route("/ai/market-research", post(market_research))
        .route("/ai/customer-analysis", post(customer_analysis))
        .route("/ai/growth-strategy", post(growth_strategy))
        .with_state(state)
}
