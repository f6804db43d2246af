//! Anclora Cortex HTTP server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use anclora_cortex::adapters::auth::JwtSessionValidator;
use anclora_cortex::adapters::http::{app_router, AnalysisAppState, AuthState, RouterOptions};
use anclora_cortex::adapters::postgres::PostgresAnalysisStore;
use anclora_cortex::adapters::storage::{InMemoryAnalysisStore, RestAnalysisStore};
use anclora_cortex::application::AnalysisOrchestrator;
use anclora_cortex::config::{AppConfig, StoreBackend, StoreConfig, ValidationError};
use anclora_cortex::domain::analyzers::AnalyzerRegistry;
use anclora_cortex::ports::AnalysisStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let store = build_store(&config.store).await?;
    let orchestrator = Arc::new(AnalysisOrchestrator::new(
        AnalyzerRegistry::standard(),
        config.analysis.orchestrator_config(),
    ));
    let state = AnalysisAppState::new(
        Arc::clone(&orchestrator),
        store,
        config.analysis.on_total_failure,
    );
    let auth: AuthState = Arc::new(JwtSessionValidator::new(&config.auth.jwt_config()));
    let options = RouterOptions {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };

    let app = app_router(state, auth, &options);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        analyzers = orchestrator.registry().len(),
        store = ?config.store.backend,
        "Anclora Cortex listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` overrides
/// the configured filter.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(fmt::layer().json().with_current_span(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

async fn build_store(config: &StoreConfig) -> Result<Arc<dyn AnalysisStore>, BoxError> {
    let store: Arc<dyn AnalysisStore> = match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory analysis store; history is lost on restart");
            Arc::new(InMemoryAnalysisStore::new())
        }
        StoreBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or(ValidationError::MissingRequired("STORE__DATABASE__URL"))?;
            Arc::new(PostgresAnalysisStore::connect(database).await?)
        }
        StoreBackend::Rest => {
            let rest = config
                .rest
                .as_ref()
                .ok_or(ValidationError::MissingRequired("STORE__REST__BASE_URL"))?;
            Arc::new(RestAnalysisStore::new(rest.store_config())?)
        }
    };
    Ok(store)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

