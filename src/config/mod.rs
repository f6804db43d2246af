//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `ANCLORA_CORTEX` prefix
//! and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use anclora_cortex::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod analysis;
mod auth;
mod database;
mod error;
mod server;
mod store;

pub use analysis::AnalysisConfig;
pub use auth::{AuthConfig, MIN_JWT_SECRET_LEN};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use store::{RestConfig, StoreBackend, StoreConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Token validation (HS256 shared secret)
    pub auth: AuthConfig,

    /// Analyzer timeout, concurrency and total-failure policy
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Analysis history backend
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` when present, then reads `ANCLORA_CORTEX__*` variables:
    ///
    /// - `ANCLORA_CORTEX__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ANCLORA_CORTEX__STORE__DATABASE__URL=...` -> `store.database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed into its field type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ANCLORA_CORTEX")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, section by section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.auth.validate()?;
        self.analysis.validate()?;
        self.store.validate(self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
