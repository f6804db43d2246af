//! HTTP handlers for analysis endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::{
    AnalysisError, AnalysisOrchestrator, GenerateDemoAnalysisCommand, GenerateDemoAnalysisHandler,
    ListAnalysesHandler, ListAnalysesQuery, ListAnalyzersHandler, RunAnalysisCommand,
    RunAnalysisHandler, RunSingleAnalyzerCommand, RunSingleAnalyzerHandler, TotalFailurePolicy,
};
use crate::domain::analysis::{ConsolidatedAnalysis, PartialAnalysis};
use crate::domain::analyzers::AnalyzerKind;
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::ports::AnalysisStore;

use super::dto::{
    AnalysisHistoryResponse, AnalyzeRequest, AnalyzerCatalogResponse, ErrorResponse,
    HealthResponse, SingleAnalyzerRequest, WelcomeResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AnalysisAppState {
    run_analysis: Arc<RunAnalysisHandler>,
    run_single: Arc<RunSingleAnalyzerHandler>,
    demo: Arc<GenerateDemoAnalysisHandler>,
    list_analyses: Arc<ListAnalysesHandler>,
    list_analyzers: Arc<ListAnalyzersHandler>,
    fan_out_budget: Duration,
}

impl AnalysisAppState {
    pub fn new(
        orchestrator: Arc<AnalysisOrchestrator>,
        store: Arc<dyn AnalysisStore>,
        policy: TotalFailurePolicy,
    ) -> Self {
        Self {
            fan_out_budget: orchestrator.fan_out_budget(),
            run_analysis: Arc::new(RunAnalysisHandler::new(
                Arc::clone(&orchestrator),
                Arc::clone(&store),
                policy,
            )),
            run_single: Arc::new(RunSingleAnalyzerHandler::new(Arc::clone(&orchestrator))),
            demo: Arc::new(GenerateDemoAnalysisHandler::new()),
            list_analyses: Arc::new(ListAnalysesHandler::new(store)),
            list_analyzers: Arc::new(ListAnalyzersHandler::new(orchestrator)),
        }
    }

    /// Worst-case duration of the orchestrated endpoints.
    pub fn fan_out_budget(&self) -> Duration {
        self.fan_out_budget
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Failure of an analysis endpoint, rendered as `{error_code, message, details?}`.
#[derive(Debug)]
pub enum ApiError {
    Analysis(AnalysisError),
    MalformedBody(JsonRejection),
}

impl From<AnalysisError> for ApiError {
    fn from(error: AnalysisError) -> Self {
        ApiError::Analysis(error)
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::Analysis(error.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::AnalyzerNotFound => StatusCode::NOT_FOUND,
        ErrorCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::TotalAnalysisFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MalformedBody(rejection) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::ValidationFailed, rejection.body_text()),
            ),
            ApiError::Analysis(error) => {
                let code = error.code();
                let status = status_for(code);
                if status.is_server_error() {
                    tracing::error!(error = %error, code = %code, "analysis request failed");
                }
                let mut body = ErrorResponse::new(code, error.to_string());
                if let AnalysisError::Validation(v) = &error {
                    body = body.with_details(serde_json::json!({ "field": v.field() }));
                }
                (status, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET / - Welcome message
pub async fn index() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Anclora Cortex API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health - Liveness
pub async fn health(State(state): State<AnalysisAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        analyzers: state.list_analyzers.handle().len(),
    })
}

/// POST /analyze - Orchestrated analysis, saved to the caller's history
pub async fn analyze(
    State(state): State<AnalysisAppState>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ConsolidatedAnalysis>, ApiError> {
    let Json(req) = payload?;
    let cmd = RunAnalysisCommand {
        business: req.into_business()?,
        owner: Some(user.id),
    };

    // The save task keeps running after its handle is dropped.
    let result = state.run_analysis.handle(cmd).await?;
    Ok(Json(result.analysis))
}

/// POST /analyze-demo - Rule-based demo analysis, no auth, not saved
pub async fn analyze_demo(
    State(state): State<AnalysisAppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ConsolidatedAnalysis>, ApiError> {
    let Json(req) = payload?;
    let cmd = GenerateDemoAnalysisCommand {
        business: req.into_business()?,
    };

    Ok(Json(state.demo.handle(cmd)))
}

/// GET /analyses - Caller's analysis history, newest first
pub async fn list_analyses(
    State(state): State<AnalysisAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<AnalysisHistoryResponse>, ApiError> {
    let records = state
        .list_analyses
        .handle(ListAnalysesQuery { owner: user.id })
        .await?;

    Ok(Json(records.into()))
}

/// GET /ai/agents - Analyzer catalogue
pub async fn list_agents(State(state): State<AnalysisAppState>) -> Json<AnalyzerCatalogResponse> {
    Json(state.list_analyzers.handle().into())
}

/// POST /ai/market-research
pub async fn market_research(
    state: State<AnalysisAppState>,
    payload: Result<Json<SingleAnalyzerRequest>, JsonRejection>,
) -> Result<Json<PartialAnalysis>, ApiError> {
    run_single(state, AnalyzerKind::Market, payload).await
}

/// POST /ai/customer-analysis
pub async fn customer_analysis(
    state: State<AnalysisAppState>,
    payload: Result<Json<SingleAnalyzerRequest>, JsonRejection>,
) -> Result<Json<PartialAnalysis>, ApiError> {
    run_single(state, AnalyzerKind::Customer, payload).await
}

/// POST /ai/growth-strategy
pub async fn growth_strategy(
    state: State<AnalysisAppState>,
    payload: Result<Json<SingleAnalyzerRequest>, JsonRejection>,
) -> Result<Json<PartialAnalysis>, ApiError> {
    run_single(state, AnalyzerKind::Growth, payload).await
}

async fn run_single(
    State(state): State<AnalysisAppState>,
    kind: AnalyzerKind,
    payload: Result<Json<SingleAnalyzerRequest>, JsonRejection>,
) -> Result<Json<PartialAnalysis>, ApiError> {
    let Json(req) = payload?;
    let cmd = RunSingleAnalyzerCommand {
        kind,
        business: req.business_data.into_business()?,
    };

    Ok(Json(state.run_single.handle(cmd).await?))
}
