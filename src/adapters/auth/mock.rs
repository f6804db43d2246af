//! Mock session validator for testing.
//!
//! Implements the `SessionValidator` port without any identity provider,
//! mapping fixed tokens to users.
//!
//! # Example
//!
//! ```ignore
//! use anclora_cortex::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new().with_test_user("valid-token", "user-123");
//! let user = validator.validate("valid-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation while set.
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a valid token for a user with the given ID and a test email.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let user = AuthenticatedUser::new(
            UserId::new(&user_id).unwrap(),
            Some(format!("{}@test.example.com", user_id)),
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    pub fn remove_token(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn validates_registered_token() {
        let validator = MockSessionValidator::new().with_test_user("token-1", "user-1");

        let user = validator.validate("token-1").await.unwrap();

        assert_eq!(user.id.as_str(), "user-1");
        assert_eq!(user.email.as_deref(), Some("user-1@test.example.com"));
    }

    #[tokio::test]
    async fn rejects_unknown_token() {
        let validator = MockSessionValidator::new();

        assert_eq!(
            validator.validate("nope").await.unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[tokio::test]
    async fn forced_error_overrides_tokens() {
        let validator = MockSessionValidator::new()
            .with_test_user("token-1", "user-1")
            .with_error(AuthError::TokenExpired);

        assert_eq!(
            validator.validate("token-1").await.unwrap_err(),
            AuthError::TokenExpired
        );

        validator.clear_error();
        assert!(validator.validate("token-1").await.is_ok());
    }

    #[tokio::test]
    async fn removed_token_becomes_invalid() {
        let validator = MockSessionValidator::new().with_test_user("token-1", "user-1");
        validator.remove_token("token-1");

        assert!(validator.validate("token-1").await.is_err());
    }
}
