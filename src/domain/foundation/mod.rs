//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the analysis domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{ErrorCode, ValidationError};
pub use ids::{AnalysisId, UserId};
pub use timestamp::Timestamp;
