//! PostgreSQL adapters - Database implementations for the store port.
//!
//! - `PostgresAnalysisStore` - Analysis history with JSONB payloads

mod analysis_store;

pub use analysis_store::PostgresAnalysisStore;
