//! Anclora Cortex - Business analysis backend
//!
//! A business description is analysed by independent specialized analyzers
//! (market, customer, growth) running concurrently under a per-analyzer
//! timeout. Their partial results are consolidated into one scored record
//! with prioritized recommendations and KPI targets. A rule-based generator
//! serves the demo path and, optionally, the fallback when every analyzer
//! fails.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
