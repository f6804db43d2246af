//! Integration tests for the analysis HTTP API.
//!
//! Drives the fully layered router (auth middleware, request ids, tracing,
//! timeout, CORS) with `tower::ServiceExt::oneshot`, backed by the mock
//! session validator and the in-memory analysis store.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use anclora_cortex::adapters::auth::MockSessionValidator;
use anclora_cortex::adapters::http::{app_router, AnalysisAppState, AuthState, RouterOptions};
use anclora_cortex::adapters::storage::InMemoryAnalysisStore;
use anclora_cortex::application::{AnalysisOrchestrator, OrchestratorConfig, TotalFailurePolicy};
use anclora_cortex::domain::analyzers::{
    AnalyzerError, AnalyzerKind, AnalyzerRegistry, BusinessAnalyzer, CustomerAnalyzer,
    GrowthAnalyzer, Insights, MarketAnalyzer,
};
use anclora_cortex::domain::business::BusinessDescription;
use anclora_cortex::domain::foundation::UserId;
use anclora_cortex::ports::AnalysisStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

const TOKEN: &str = "valid-token";
const USER: &str = "user-1";

/// Analyzer that always fails, registered under a chosen kind.
struct Broken(AnalyzerKind);

impl BusinessAnalyzer for Broken {
    fn kind(&self) -> AnalyzerKind {
        self.0
    }

    fn display_name(&self) -> &'static str {
        "Broken Analyzer"
    }

    fn specialization(&self) -> &'static str {
        "Always fails"
    }

    fn analyze(&self, _business: &BusinessDescription) -> Result<Insights, AnalyzerError> {
        Err(AnalyzerError::failed("upstream unavailable"))
    }
}

fn broken_registry() -> AnalyzerRegistry {
    AnalyzerRegistry::new(
        AnalyzerKind::ALL
            .iter()
            .map(|kind| Arc::new(Broken(*kind)) as Arc<dyn BusinessAnalyzer>)
            .collect(),
    )
    .unwrap()
}

/// Wraps a real analyzer and blocks its thread before delegating.
struct Hanging {
    inner: Arc<dyn BusinessAnalyzer>,
    delay: Duration,
}

impl BusinessAnalyzer for Hanging {
    fn kind(&self) -> AnalyzerKind {
        self.inner.kind()
    }

    fn display_name(&self) -> &'static str {
        self.inner.display_name()
    }

    fn specialization(&self) -> &'static str {
        self.inner.specialization()
    }

    fn analyze(&self, business: &BusinessDescription) -> Result<Insights, AnalyzerError> {
        std::thread::sleep(self.delay);
        self.inner.analyze(business)
    }
}

fn hanging(inner: Arc<dyn BusinessAnalyzer>) -> Arc<dyn BusinessAnalyzer> {
    Arc::new(Hanging {
        inner,
        delay: Duration::from_secs(1),
    })
}

struct TestApp {
    router: Router,
    store: InMemoryAnalysisStore,
}

impl TestApp {
    fn new() -> Self {
        Self::with(
            AnalyzerRegistry::standard(),
            InMemoryAnalysisStore::new(),
            TotalFailurePolicy::Degraded,
        )
    }

    fn with(
        registry: AnalyzerRegistry,
        store: InMemoryAnalysisStore,
        policy: TotalFailurePolicy,
    ) -> Self {
        Self::with_timeouts(
            registry,
            store,
            policy,
            OrchestratorConfig {
                analyzer_timeout: Duration::from_secs(5),
                max_concurrency: 3,
            },
            RouterOptions::default(),
        )
    }

    fn with_timeouts(
        registry: AnalyzerRegistry,
        store: InMemoryAnalysisStore,
        policy: TotalFailurePolicy,
        config: OrchestratorConfig,
        options: RouterOptions,
    ) -> Self {
        let orchestrator = Arc::new(AnalysisOrchestrator::new(registry, config));
        let state = AnalysisAppState::new(
            orchestrator,
            Arc::new(store.clone()) as Arc<dyn AnalysisStore>,
            policy,
        );
        let auth: AuthState = Arc::new(MockSessionValidator::new().with_test_user(TOKEN, USER));

        Self {
            router: app_router(state, auth, &options),
            store,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    async fn wait_for_saved(&self, expected: usize) {
        for _ in 0..50 {
            if self.store.len().await >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("expected {} saved analyses", expected);
    }
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    post_raw(uri, token, body.to_string())
}

fn post_raw(uri: &str, token: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

fn acme() -> Value {
    json!({"business_type": "saas", "business_name": "Acme"})
}

// =============================================================================
// Public endpoints
// =============================================================================

#[tokio::test]
async fn index_returns_welcome_message() {
    let app = TestApp::new();

    let (status, body) = app.send(get("/", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Anclora Cortex"));
}

#[tokio::test]
async fn health_reports_registered_analyzers() {
    let app = TestApp::new();

    let (status, body) = app.send(get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["analyzers"], 3);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::new();

    let response = app.router.clone().oneshot(get("/health", None)).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn agents_catalogue_lists_every_analyzer_in_order() {
    let app = TestApp::new();

    let (status, body) = app.send(get("/ai/agents", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    let kinds: Vec<&str> = body["agents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["market", "customer", "growth"]);
}

// =============================================================================
// POST /analyze
// =============================================================================

#[tokio::test]
async fn analyze_requires_a_token() {
    let app = TestApp::new();

    let (status, body) = app.send(post("/analyze", None, acme())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn analyze_rejects_an_invalid_token() {
    let app = TestApp::new();

    let (status, body) = app.send(post("/analyze", Some("forged"), acme())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn analyze_returns_consolidated_record_and_saves_it() {
    let app = TestApp::new();

    let (status, body) = app.send(post("/analyze", Some(TOKEN), acme())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["business_type"], "saas");
    assert_eq!(body["business_name"], "Acme");
    assert_eq!(body["kpis"].as_array().unwrap().len(), 4);
    assert!(body["score"].as_u64().unwrap() >= 70);
    assert!(body.get("is_demo").is_none());

    let categories: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["category"].as_str().unwrap())
        .collect();
    assert_eq!(
        categories,
        vec!["Market Analysis", "Customer Experience", "Growth Strategy"]
    );

    let insights = body["agent_insights"].as_object().unwrap();
    assert_eq!(insights.len(), 3);
    assert_eq!(insights["customer"]["outcome"]["status"], "completed");

    app.wait_for_saved(1).await;
    let saved = app
        .store
        .list_for_owner(&UserId::new(USER).unwrap())
        .await
        .unwrap();
    assert_eq!(saved[0].result.business_name, "Acme");
}

#[tokio::test]
async fn comprehensive_analysis_is_an_alias_of_analyze() {
    let app = TestApp::new();

    let (status, body) = app
        .send(post("/ai/comprehensive-analysis", Some(TOKEN), acme()))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["agent_insights"].as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn empty_business_name_is_a_400() {
    let app = TestApp::new();

    let (status, body) = app
        .send(post(
            "/analyze",
            Some(TOKEN),
            json!({"business_type": "saas", "business_name": "   "}),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["field"], "business_name");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn malformed_json_is_a_400() {
    let app = TestApp::new();

    let (status, body) = app
        .send(post_raw("/analyze", Some(TOKEN), "{not json".to_string()))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn store_failure_does_not_change_the_response() {
    let healthy = TestApp::new();
    let failing = TestApp::with(
        AnalyzerRegistry::standard(),
        InMemoryAnalysisStore::with_failure(),
        TotalFailurePolicy::Degraded,
    );

    let (ok_status, ok_body) = healthy.send(post("/analyze", Some(TOKEN), acme())).await;
    let (status, body) = failing.send(post("/analyze", Some(TOKEN), acme())).await;

    assert_eq!(status, ok_status);
    assert_eq!(body["score"], ok_body["score"]);
    assert_eq!(body["recommendations"], ok_body["recommendations"]);
    assert!(failing.store.is_empty().await);
}

#[tokio::test]
async fn total_failure_degrades_to_baseline_record() {
    let app = TestApp::with(
        broken_registry(),
        InMemoryAnalysisStore::new(),
        TotalFailurePolicy::Degraded,
    );

    let (status, body) = app.send(post("/analyze", Some(TOKEN), acme())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 70);
    assert!(body["recommendations"].as_array().unwrap().is_empty());
    assert_eq!(body["agent_insights"]["market"]["outcome"]["status"], "failed");
}

#[tokio::test]
async fn total_failure_under_error_policy_is_a_500() {
    let app = TestApp::with(
        broken_registry(),
        InMemoryAnalysisStore::new(),
        TotalFailurePolicy::Error,
    );

    let (status, body) = app.send(post("/analyze", Some(TOKEN), acme())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_code"], "TOTAL_ANALYSIS_FAILURE");
}

#[tokio::test]
async fn total_failure_under_rule_based_policy_falls_back() {
    let app = TestApp::with(
        broken_registry(),
        InMemoryAnalysisStore::new(),
        TotalFailurePolicy::RuleBased,
    );

    let (status, body) = app.send(post("/analyze", Some(TOKEN), acme())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 75);
    assert_eq!(body["estimated_roi"], "185%");
    assert_eq!(body["agent_insights"]["growth"]["outcome"]["status"], "failed");
}

// =============================================================================
// Hung analyzers under short request timeouts
// =============================================================================

fn short_request_timeout() -> RouterOptions {
    RouterOptions {
        request_timeout: Duration::from_millis(300),
        ..Default::default()
    }
}

#[tokio::test]
async fn hung_analyzer_yields_a_complete_response_when_timeouts_match() {
    let registry = AnalyzerRegistry::new(vec![
        hanging(Arc::new(MarketAnalyzer::new())),
        Arc::new(CustomerAnalyzer::new()),
        Arc::new(GrowthAnalyzer::new()),
    ])
    .unwrap();
    let app = TestApp::with_timeouts(
        registry,
        InMemoryAnalysisStore::new(),
        TotalFailurePolicy::Degraded,
        OrchestratorConfig {
            analyzer_timeout: Duration::from_millis(300),
            max_concurrency: 3,
        },
        short_request_timeout(),
    );

    let (status, body) = app.send(post("/analyze", Some(TOKEN), acme())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["agent_insights"]["market"]["outcome"]["status"], "failed");
    assert_eq!(body["agent_insights"]["customer"]["outcome"]["status"], "completed");
    assert_eq!(body["kpis"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn sequential_hung_analyzers_degrade_instead_of_timing_out() {
    let registry = AnalyzerRegistry::new(vec![
        hanging(Arc::new(MarketAnalyzer::new())),
        hanging(Arc::new(CustomerAnalyzer::new())),
        hanging(Arc::new(GrowthAnalyzer::new())),
    ])
    .unwrap();
    let app = TestApp::with_timeouts(
        registry,
        InMemoryAnalysisStore::new(),
        TotalFailurePolicy::Degraded,
        OrchestratorConfig {
            analyzer_timeout: Duration::from_millis(200),
            max_concurrency: 1,
        },
        short_request_timeout(),
    );

    let (status, body) = app.send(post("/analyze", Some(TOKEN), acme())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 70);
    assert!(body["recommendations"].as_array().unwrap().is_empty());
    for kind in ["market", "customer", "growth"] {
        assert_eq!(body["agent_insights"][kind]["outcome"]["status"], "failed");
        assert!(body["agent_insights"][kind]["outcome"]["error"]
            .as_str()
            .unwrap()
            .contains("timed out"));
    }
}

// =============================================================================
// POST /analyze-demo
// =============================================================================

#[tokio::test]
async fn demo_needs_no_token_and_is_flagged() {
    let app = TestApp::new();

    let (status, body) = app
        .send(post(
            "/analyze-demo",
            None,
            json!({
                "business_type": "ecommerce",
                "business_name": "Shop",
                "current_challenges": "poco tráfico y pocas ventas"
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_demo"], true);
    assert_eq!(body["business_type"], "ecommerce");
    assert!(body["agent_insights"].as_object().unwrap().is_empty());

    let categories: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["category"].as_str().unwrap())
        .collect();
    assert!(categories.contains(&"Traffic Generation"));
    assert!(categories.contains(&"Conversion Optimization"));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(app.store.is_empty().await);
}

// =============================================================================
// GET /analyses
// =============================================================================

#[tokio::test]
async fn history_requires_a_token() {
    let app = TestApp::new();

    let (status, _) = app.send(get("/analyses", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn history_lists_the_callers_analyses() {
    let app = TestApp::new();
    app.send(post("/analyze", Some(TOKEN), acme())).await;
    app.send(post(
        "/analyze",
        Some(TOKEN),
        json!({"business_type": "local", "business_name": "Cafe"}),
    ))
    .await;
    app.wait_for_saved(2).await;

    let (status, body) = app.send(get("/analyses", Some(TOKEN))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    let item = &body["analyses"][0];
    assert!(item["id"].is_string());
    assert!(item["business_data"]["business_name"].is_string());
    assert!(item["result"]["score"].is_number());
}

#[tokio::test]
async fn history_store_outage_is_a_503() {
    let app = TestApp::with(
        AnalyzerRegistry::standard(),
        InMemoryAnalysisStore::with_failure(),
        TotalFailurePolicy::Degraded,
    );

    let (status, body) = app.send(get("/analyses", Some(TOKEN))).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error_code"], "STORE_UNAVAILABLE");
}

// =============================================================================
// Single-analyzer endpoints
// =============================================================================

#[tokio::test]
async fn market_research_returns_market_partial() {
    let app = TestApp::new();

    let (status, body) = app
        .send(post("/ai/market-research", None, json!({"business_data": acme()})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analyzer"], "market");
    assert_eq!(body["outcome"]["status"], "completed");
    assert_eq!(body["outcome"]["insights"]["kind"], "market");
}

#[tokio::test]
async fn customer_analysis_detects_pain_points() {
    let app = TestApp::new();

    let (status, body) = app
        .send(post(
            "/ai/customer-analysis",
            None,
            json!({"business_data": {
                "business_type": "saas",
                "business_name": "Acme",
                "current_challenges": "churn alto y problemas de soporte"
            }}),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analyzer"], "customer");
    assert_eq!(
        body["outcome"]["insights"]["pain_points"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn growth_strategy_classifies_stage() {
    let app = TestApp::new();

    let (status, body) = app
        .send(post(
            "/ai/growth-strategy",
            None,
            json!({"business_data": {
                "business_type": "saas",
                "business_name": "Acme",
                "description": "Queremos validar nuestro MVP"
            }}),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["insights"]["current_stage"], "MVP/Validation");
}

#[tokio::test]
async fn single_analyzer_without_business_data_is_a_400() {
    let app = TestApp::new();

    let (status, body) = app.send(post("/ai/market-research", None, json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
}
