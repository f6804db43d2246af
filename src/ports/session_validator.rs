//! Session validation port for access token validation.
//!
//! This port defines the contract for validating access tokens issued by the
//! external identity provider and extracting the caller's identity. It is
//! provider-agnostic: implementations exist for shared-secret JWTs and for
//! mock testing.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// HTTP middleware uses this to validate Bearer tokens before any handler
/// that needs an owner runs.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature
/// - Validate expiry and, when configured, the issuer
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
