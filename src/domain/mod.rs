//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth)
//! - `business` - The business description submitted for analysis
//! - `analyzers` - Market, customer, and growth analyzers plus their registry
//! - `analysis` - Partial and consolidated records, consolidation, rule-based fallback

pub mod analysis;
pub mod analyzers;
pub mod business;
pub mod foundation;
