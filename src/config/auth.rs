//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::auth::JwtConfig;

/// Minimum length accepted for the HS256 shared secret.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Shared-secret JWT settings for the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: Secret<String>,

    /// Expected `iss` claim
    #[serde(default)]
    pub issuer: Option<String>,

    /// Clock skew tolerated on `exp`
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_JWT_SECRET_LEN));
        }
        Ok(())
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            issuer: self.issuer.clone(),
            leeway_secs: self.leeway_secs,
        }
    }
}

fn default_leeway() -> u64 {
    30
}
