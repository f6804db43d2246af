//! Consolidator - merges partial analyses into one scored record.

use std::collections::BTreeMap;

use crate::domain::analyzers::{AnalyzerKind, Insights};
use crate::domain::business::BusinessDescription;
use crate::domain::foundation::Timestamp;

use super::{consolidated_kpis, ConsolidatedAnalysis, PartialAnalysis, Priority, Recommendation};

/// Score every consolidated analysis starts from.
pub const BASELINE_SCORE: u8 = 70;

/// Flat bonus for a rich analysis.
pub const RICH_ANALYSIS_BONUS: u8 = 10;

/// The bonus applies when more recommendations than this were assembled.
pub const RICH_ANALYSIS_THRESHOLD: usize = 3;

/// Actions kept per analyzer recommendation.
pub const MAX_ACTIONS_PER_RECOMMENDATION: usize = 3;

pub const CONSOLIDATED_TIMELINE: &str = "3-6 months for full implementation";
pub const CONSOLIDATED_ROI: &str = "175%";

/// Pure merge of per-analyzer results.
///
/// Output depends only on the result map, the input, and the supplied
/// timestamp. Iteration follows [`AnalyzerKind`] order, so completion order
/// of the concurrent tasks never affects the recommendation order.
#[derive(Debug, Clone, Copy)]
pub struct Consolidator {
    participating_analyzers: usize,
}

impl Consolidator {
    /// `participating_analyzers` is the registry size reported in the summary.
    pub fn new(participating_analyzers: usize) -> Self {
        Self {
            participating_analyzers,
        }
    }

    pub fn consolidate(
        &self,
        results: &BTreeMap<AnalyzerKind, PartialAnalysis>,
        business: &BusinessDescription,
        generated_at: Timestamp,
    ) -> ConsolidatedAnalysis {
        let recommendations: Vec<Recommendation> = results
            .values()
            .filter_map(|partial| partial.insights())
            .filter_map(Self::recommendation_for)
            .collect();

        ConsolidatedAnalysis {
            business_type: business.category(),
            business_name: business.name().to_string(),
            score: Self::score_for(recommendations.len()),
            summary: format!(
                "Comprehensive analysis of {} completed using {} specialized AI analyzers.",
                business.name(),
                self.participating_analyzers
            ),
            recommendations,
            kpis: consolidated_kpis(business.category()),
            timeline: CONSOLIDATED_TIMELINE.to_string(),
            estimated_roi: CONSOLIDATED_ROI.to_string(),
            generated_at,
            is_demo: None,
            agent_insights: results.clone(),
        }
    }

    /// Baseline plus the rich-analysis bonus when the count exceeds the threshold.
    pub fn score_for(recommendation_count: usize) -> u8 {
        if recommendation_count > RICH_ANALYSIS_THRESHOLD {
            BASELINE_SCORE + RICH_ANALYSIS_BONUS
        } else {
            BASELINE_SCORE
        }
    }

    fn recommendation_for(insights: &Insights) -> Option<Recommendation> {
        let top = |actions: &[String]| -> Vec<String> {
            actions
                .iter()
                .take(MAX_ACTIONS_PER_RECOMMENDATION)
                .cloned()
                .collect()
        };

        match insights {
            Insights::Market(market) => Some(Recommendation::new(
                "Market Analysis",
                Priority::Medium,
                "Better competitive positioning",
                top(&market.recommendations),
            )),
            Insights::Customer(customer) => Some(Recommendation::new(
                "Customer Experience",
                Priority::High,
                "30% improvement in customer satisfaction",
                top(&customer.cx_recommendations),
            )),
            Insights::Growth(growth) => growth.growth_strategies.first().map(|strategy| {
                Recommendation::new(
                    "Growth Strategy",
                    Priority::High,
                    "Accelerated growth",
                    top(&strategy.tactics),
                )
            }),
        }
    }
}
