//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session validation (HS256 JWT, mock)
//! - `http` - axum REST API
//! - `postgres` - PostgreSQL analysis history
//! - `storage` - In-memory and PostgREST analysis history

pub mod auth;
pub mod http;
pub mod postgres;
pub mod storage;

pub use auth::{JwtConfig, JwtSessionValidator, MockSessionValidator};
pub use postgres::PostgresAnalysisStore;
pub use storage::{InMemoryAnalysisStore, RestAnalysisStore, RestStoreConfig};
