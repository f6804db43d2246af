//! Analysis history store configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::database::DatabaseConfig;
use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::storage::RestStoreConfig;

/// Which `AnalysisStore` adapter to wire at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Postgres,
    Rest,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Required when `backend = postgres`
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Required when `backend = rest`
    #[serde(default)]
    pub rest: Option<RestConfig>,
}

/// PostgREST endpoint settings (Supabase or self-hosted).
#[derive(Debug, Clone, Deserialize)]
pub struct RestConfig {
    pub base_url: String,

    pub api_key: Secret<String>,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_rest_timeout")]
    pub timeout_secs: u64,
}

impl RestConfig {
    pub fn store_config(&self) -> RestStoreConfig {
        RestStoreConfig::new(self.base_url.clone(), self.api_key.clone())
            .with_table(self.table.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| ValidationError::InvalidRestUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidRestUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }
        if environment == Environment::Production && url.scheme() != "https" {
            return Err(ValidationError::RestUrlMustBeHttps);
        }
        if self.table.trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORE__REST__TABLE"));
        }
        Ok(())
    }
}

impl StoreConfig {
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        match self.backend {
            StoreBackend::Memory => Ok(()),
            StoreBackend::Postgres => self
                .database
                .as_ref()
                .ok_or(ValidationError::MissingRequired("STORE__DATABASE__URL"))?
                .validate(),
            StoreBackend::Rest => self
                .rest
                .as_ref()
                .ok_or(ValidationError::MissingRequired("STORE__REST__BASE_URL"))?
                .validate(environment),
        }
    }
}

fn default_table() -> String {
    "analyses".to_string()
}

fn default_rest_timeout() -> u64 {
    10
}
