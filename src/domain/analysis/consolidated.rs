//! The unified analysis record returned to callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::analyzers::AnalyzerKind;
use crate::domain::business::BusinessCategory;
use crate::domain::foundation::Timestamp;

use super::PartialAnalysis;

/// Priority level of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,
    pub impact: String,
    pub actions: Vec<String>,
}

impl Recommendation {
    pub fn new(
        category: impl Into<String>,
        priority: Priority,
        impact: impl Into<String>,
        actions: Vec<String>,
    ) -> Self {
        Self {
            category: category.into(),
            priority,
            impact: impact.into(),
            actions,
        }
    }
}

/// A projected key performance indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub name: String,
    pub current: String,
    pub target: String,
    /// Signed percentage, e.g. `+88%` or `-39%`.
    pub improvement: String,
}

impl Kpi {
    pub fn new(name: &str, current: &str, target: &str, improvement: &str) -> Self {
        Self {
            name: name.to_string(),
            current: current.to_string(),
            target: target.to_string(),
            improvement: improvement.to_string(),
        }
    }
}

/// Final record produced by either the orchestrated or the rule-based path.
///
/// Both paths share this shape. `agent_insights` is empty for rule-based
/// results but always present on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedAnalysis {
    pub business_type: BusinessCategory,
    pub business_name: String,
    pub score: u8,
    pub summary: String,
    pub recommendations: Vec<Recommendation>,
    pub kpis: Vec<Kpi>,
    pub timeline: String,
    pub estimated_roi: String,
    pub generated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_demo: Option<bool>,
    #[serde(default)]
    pub agent_insights: BTreeMap<AnalyzerKind, PartialAnalysis>,
}

impl ConsolidatedAnalysis {
    /// Marks this record as a demo result.
    pub fn into_demo(mut self) -> Self {
        self.is_demo = Some(true);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConsolidatedAnalysis {
        let mut agent_insights = BTreeMap::new();
        agent_insights.insert(
            AnalyzerKind::Market,
            PartialAnalysis::failed(AnalyzerKind::Market, "Market Analyzer", "timeout"),
        );

        ConsolidatedAnalysis {
            business_type: BusinessCategory::Saas,
            business_name: "Acme".to_string(),
            score: 70,
            summary: "summary".to_string(),
            recommendations: vec![Recommendation::new(
                "Customer Experience",
                Priority::High,
                "impact",
                vec!["a".to_string(), "b".to_string()],
            )],
            kpis: vec![Kpi::new("NPS Score", "35", "55", "+57%")],
            timeline: "3-6 months for full implementation".to_string(),
            estimated_roi: "175%".to_string(),
            generated_at: Timestamp::now(),
            is_demo: None,
            agent_insights,
        }
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let analysis = sample();

        let json = serde_json::to_string(&analysis).unwrap();
        let parsed: ConsolidatedAnalysis = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, analysis);
    }

    #[test]
    fn json_uses_documented_keys() {
        let json = serde_json::to_value(sample()).unwrap();

        for key in [
            "business_type",
            "business_name",
            "score",
            "summary",
            "recommendations",
            "kpis",
            "timeline",
            "estimated_roi",
            "generated_at",
            "agent_insights",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert!(json.get("is_demo").is_none());
        assert_eq!(json["recommendations"][0]["priority"], "High");
        assert_eq!(json["agent_insights"]["market"]["outcome"]["status"], "failed");
    }

    #[test]
    fn into_demo_sets_flag() {
        let json = serde_json::to_value(sample().into_demo()).unwrap();
        assert_eq!(json["is_demo"], true);
    }

    #[test]
    fn missing_agent_insights_deserializes_as_empty() {
        let mut json = serde_json::to_value(sample()).unwrap();
        json.as_object_mut().unwrap().remove("agent_insights");

        let parsed: ConsolidatedAnalysis = serde_json::from_value(json).unwrap();
        assert!(parsed.agent_insights.is_empty());
    }
}
