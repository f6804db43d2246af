//! Storage Adapters
//!
//! Implementations of the AnalysisStore port.
//!
//! ## Available Adapters
//!
//! - **InMemoryAnalysisStore** - Keeps history in memory (testing/development)
//! - **RestAnalysisStore** - Writes rows through a PostgREST/Supabase REST API
//!
//! The PostgreSQL adapter lives in `adapters::postgres`.

mod in_memory_analysis_store;
mod rest_analysis_store;

pub use in_memory_analysis_store::InMemoryAnalysisStore;
pub use rest_analysis_store::{RestAnalysisStore, RestStoreConfig};
