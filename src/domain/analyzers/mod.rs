//! Analyzers - independent rule-based evaluators of a business.
//!
//! Each analyzer is a pure function from a [`BusinessDescription`] to a
//! kind-specific [`Insights`] payload. Analyzers own no state and perform no
//! I/O; everything they know lives in static lookup tables keyed by
//! [`BusinessCategory`](crate::domain::business::BusinessCategory).
//!
//! # Components
//!
//! - `MarketAnalyzer` - market sizing, competitive landscape, website audit
//! - `CustomerAnalyzer` - customer journey, pain points, retention
//! - `GrowthAnalyzer` - business stage, strategies, channels, metrics
//! - `AnalyzerRegistry` - fixed ordered set used for fan-out and lookup

mod customer;
mod growth;
mod market;
mod registry;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::business::BusinessDescription;

pub use customer::{CustomerAnalyzer, CustomerInsights, CustomerJourney, PainPoint};
pub use growth::{
    AcquisitionChannel, BusinessStage, CostTier, Effectiveness, GrowthAnalyzer, GrowthInsights,
    GrowthMetric, GrowthStrategy, Importance, TimeHorizon,
};
pub use market::{
    CompetitionLevel, CompetitiveLandscape, MarketAnalyzer, MarketInsights, MarketOverview,
    WebsiteAudit,
};
pub use registry::{AnalyzerRegistry, RegistryError};

/// Identifies one analyzer in the closed set.
///
/// Declaration order is the consolidation order: results are always merged
/// Market first, then Customer, then Growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    Market,
    Customer,
    Growth,
}

impl AnalyzerKind {
    pub const ALL: [AnalyzerKind; 3] = [
        AnalyzerKind::Market,
        AnalyzerKind::Customer,
        AnalyzerKind::Growth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyzerKind::Market => "market",
            AnalyzerKind::Customer => "customer",
            AnalyzerKind::Growth => "growth",
        }
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyzerKind {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "market" => Ok(AnalyzerKind::Market),
            "customer" => Ok(AnalyzerKind::Customer),
            "growth" => Ok(AnalyzerKind::Growth),
            other => Err(AnalyzerError::failed(format!("unknown analyzer '{}'", other))),
        }
    }
}

/// Why a single analyzer produced no insights.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzerError {
    #[error("Analysis failed: {0}")]
    Failed(String),

    #[error("Analysis timed out after {0} ms")]
    TimedOut(u64),

    #[error("Analyzer panicked: {0}")]
    Panicked(String),
}

impl AnalyzerError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

/// Kind-specific payload of a completed analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insights {
    Market(MarketInsights),
    Customer(CustomerInsights),
    Growth(GrowthInsights),
}

impl Insights {
    /// The analyzer kind that produces this payload shape.
    pub fn kind(&self) -> AnalyzerKind {
        match self {
            Insights::Market(_) => AnalyzerKind::Market,
            Insights::Customer(_) => AnalyzerKind::Customer,
            Insights::Growth(_) => AnalyzerKind::Growth,
        }
    }
}

/// Capability shared by every analyzer.
///
/// Implementations must not panic on any input; failures are returned as
/// values. The orchestrator still contains panics so a defect in one
/// analyzer never aborts its siblings.
pub trait BusinessAnalyzer: Send + Sync {
    fn kind(&self) -> AnalyzerKind;

    /// Human-readable name reported in partial results.
    fn display_name(&self) -> &'static str;

    /// One-line description of what the analyzer covers.
    fn specialization(&self) -> &'static str;

    fn analyze(&self, business: &BusinessDescription) -> Result<Insights, AnalyzerError>;
}

pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
