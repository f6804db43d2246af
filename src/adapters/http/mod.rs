//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the public API: the analysis routes behind the
//! auth middleware, wrapped in request-id, tracing, timeout and CORS layers.
//!
//! The request timeout never undercuts the orchestrator: it is raised to the
//! fan-out budget plus [`FAN_OUT_MARGIN`] so a hung analyzer is reported as a
//! failure marker in a complete response, not as a bare 408.

pub mod analysis;
pub mod middleware;

use std::time::Duration;

use axum::{extract::Request, http::HeaderValue, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use analysis::{analysis_routes, AnalysisAppState};
pub use middleware::{auth_middleware, AuthState};

/// Slack between the slowest possible fan-out and the request deadline.
pub const FAN_OUT_MARGIN: Duration = Duration::from_secs(1);

/// Transport settings for the router.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub request_timeout: Duration,
    /// Allowed origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

pub fn app_router(state: AnalysisAppState, auth: AuthState, options: &RouterOptions) -> Router {
    let request_timeout =
        effective_request_timeout(options.request_timeout, state.fan_out_budget());

    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer(&options.cors_origins));

    analysis_routes(state)
        .layer(axum::middleware::from_fn_with_state(auth, auth_middleware))
        .layer(layers)
}

fn effective_request_timeout(configured: Duration, fan_out_budget: Duration) -> Duration {
    let floor = fan_out_budget + FAN_OUT_MARGIN;
    if configured >= floor {
        return configured;
    }
    tracing::warn!(
        configured_ms = configured.as_millis() as u64,
        effective_ms = floor.as_millis() as u64,
        "Request timeout is shorter than the analyzer fan-out; raising it"
    );
    floor
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
