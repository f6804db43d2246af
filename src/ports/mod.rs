//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionValidator` - trust boundary toward the identity provider
//! - `AnalysisStore` - best-effort sink and history source for analyses

mod analysis_store;
mod session_validator;

pub use analysis_store::{AnalysisRecord, AnalysisStore, StoreAck, StoreError};
pub use session_validator::SessionValidator;
