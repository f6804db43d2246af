//! Analysis Module - Pure domain services that build analysis records.
//!
//! # Components
//!
//! - `PartialAnalysis` - one analyzer's payload or failure marker
//! - `ConsolidatedAnalysis` - the unified record returned to callers
//! - `Consolidator` - deterministic merge of partial analyses
//! - `RuleBasedGenerator` - canned per-category fallback
//!
//! All functions are pure. Timestamps are passed in so identical inputs
//! always produce identical records.

mod consolidated;
mod consolidator;
mod keywords;
mod kpi_tables;
mod partial;
mod rule_based;

pub use consolidated::{ConsolidatedAnalysis, Kpi, Priority, Recommendation};
pub use consolidator::{
    Consolidator, BASELINE_SCORE, CONSOLIDATED_ROI, CONSOLIDATED_TIMELINE,
    MAX_ACTIONS_PER_RECOMMENDATION, RICH_ANALYSIS_BONUS, RICH_ANALYSIS_THRESHOLD,
};
pub use keywords::{extract_keywords, is_business_keyword};
pub use kpi_tables::consolidated_kpis;
pub use partial::{AnalyzerOutcome, PartialAnalysis};
pub use rule_based::{
    RuleBasedGenerator, COMPLEXITY_PENALTY, COMPLEXITY_THRESHOLD, MIN_RULE_BASED_SCORE,
};
