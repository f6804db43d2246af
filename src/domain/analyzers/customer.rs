//! Customer analyzer - journey, pain points, and retention.

use serde::{Deserialize, Serialize};

use crate::domain::business::{BusinessCategory, BusinessDescription};

use super::{owned, AnalyzerError, AnalyzerKind, BusinessAnalyzer, Insights};

const BASELINE_CX_RECOMMENDATIONS: &[&str] = &[
    "Implement a continuous feedback system",
    "Create detailed customer journey maps",
    "Establish satisfaction metrics (NPS, CSAT)",
    "Develop a customer success program",
];

const CHURN_ACTIONS: &[&str] = &[
    "Implement early churn alerts",
    "Create a proactive retention program",
    "Analyze cancellation reasons",
];

const CONVERSION_ACTIONS: &[&str] = &[
    "Optimize landing pages",
    "Implement A/B testing",
    "Improve the value proposition",
];

/// A customer problem recognized from the challenges text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PainPoint {
    Churn,
    Conversion,
    Retention,
    Satisfaction,
    Support,
    Onboarding,
    Price,
    Competition,
}

/// Keyword table in detection order. Unaccented spellings are synonyms.
const PAIN_POINT_KEYWORDS: &[(PainPoint, &[&str])] = &[
    (PainPoint::Churn, &["churn"]),
    (PainPoint::Conversion, &["conversión", "conversion"]),
    (PainPoint::Retention, &["retención", "retencion"]),
    (PainPoint::Satisfaction, &["satisfacción", "satisfaccion"]),
    (PainPoint::Support, &["soporte"]),
    (PainPoint::Onboarding, &["onboarding"]),
    (PainPoint::Price, &["precio"]),
    (PainPoint::Competition, &["competencia"]),
];

impl PainPoint {
    pub fn description(&self) -> &'static str {
        match self {
            PainPoint::Churn => "Customers cancel the service",
            PainPoint::Conversion => "Visitors do not convert into customers",
            PainPoint::Retention => "Difficulty retaining customers",
            PainPoint::Satisfaction => "Low customer satisfaction",
            PainPoint::Support => "Problems with customer support",
            PainPoint::Onboarding => "Poor onboarding process",
            PainPoint::Price => "Price resistance",
            PainPoint::Competition => "Customers leave for the competition",
        }
    }

    /// Scans free text for pain-point keywords.
    ///
    /// Case-insensitive substring match. Each pain point appears at most once
    /// and results follow the keyword table order.
    pub fn detect(text: &str) -> Vec<PainPoint> {
        let text = text.to_lowercase();
        PAIN_POINT_KEYWORDS
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
            .map(|(pain_point, _)| *pain_point)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInsights {
    pub customer_journey: CustomerJourney,
    pub pain_points: Vec<String>,
    pub cx_recommendations: Vec<String>,
    pub retention_strategies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerJourney {
    pub stages: Vec<String>,
    #[serde(default)]
    pub key_touchpoints: Vec<String>,
    #[serde(default)]
    pub critical_moments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CustomerAnalyzer;

impl CustomerAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn customer_journey(category: BusinessCategory) -> CustomerJourney {
        match category {
            BusinessCategory::Saas => CustomerJourney {
                stages: owned(&[
                    "Awareness",
                    "Trial",
                    "Onboarding",
                    "Adoption",
                    "Expansion",
                    "Advocacy",
                ]),
                key_touchpoints: owned(&[
                    "Landing page visit",
                    "Free trial signup",
                    "First login",
                    "Feature discovery",
                    "Upgrade decision",
                    "Renewal",
                ]),
                critical_moments: owned(&[
                    "First 24 hours after signup",
                    "First value realization",
                    "Upgrade decision point",
                    "Renewal period",
                ]),
                note: None,
            },
            BusinessCategory::Ecommerce => CustomerJourney {
                stages: owned(&[
                    "Discovery",
                    "Consideration",
                    "Purchase",
                    "Delivery",
                    "Post-purchase",
                ]),
                key_touchpoints: owned(&[
                    "Product discovery",
                    "Product page view",
                    "Add to cart",
                    "Checkout process",
                    "Order confirmation",
                    "Delivery experience",
                ]),
                critical_moments: owned(&[
                    "First impression on site",
                    "Cart abandonment point",
                    "Checkout completion",
                    "First purchase experience",
                ]),
                note: None,
            },
            _ => CustomerJourney {
                stages: owned(&[
                    "Awareness",
                    "Consideration",
                    "Decision",
                    "Experience",
                    "Loyalty",
                ]),
                key_touchpoints: Vec::new(),
                critical_moments: Vec::new(),
                note: Some("A specific customer journey requires detailed analysis".to_string()),
            },
        }
    }

    fn cx_recommendations(pain_points: &[PainPoint]) -> Vec<String> {
        let mut recommendations = owned(BASELINE_CX_RECOMMENDATIONS);
        if pain_points.contains(&PainPoint::Churn) {
            recommendations.extend(owned(CHURN_ACTIONS));
        }
        if pain_points.contains(&PainPoint::Conversion) {
            recommendations.extend(owned(CONVERSION_ACTIONS));
        }
        recommendations
    }

    fn retention_strategies(category: BusinessCategory) -> Vec<String> {
        match category {
            BusinessCategory::Saas => owned(&[
                "Personalized onboarding",
                "Feature adoption tracking",
                "Customer health scoring",
                "Customer success program",
                "Usage-based upselling",
            ]),
            BusinessCategory::Ecommerce => owned(&[
                "Loyalty program",
                "Personalized email marketing",
                "Product recommendations",
                "Exceptional post-purchase experience",
                "Referral program",
            ]),
            BusinessCategory::Local => owned(&[
                "Local loyalty program",
                "Community events",
                "Personalized service",
                "Referral program",
                "Regular communication",
            ]),
            _ => owned(&[
                "Loyalty program",
                "Regular communication",
                "Exceptional service",
                "Referral program",
            ]),
        }
    }
}

impl BusinessAnalyzer for CustomerAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Customer
    }

    fn display_name(&self) -> &'static str {
        "Customer Analyzer"
    }

    fn specialization(&self) -> &'static str {
        "Customer and experience analysis"
    }

    fn analyze(&self, business: &BusinessDescription) -> Result<Insights, AnalyzerError> {
        let category = business.category();
        let pain_points = PainPoint::detect(business.challenges());

        Ok(Insights::Customer(CustomerInsights {
            customer_journey: Self::customer_journey(category),
            pain_points: pain_points
                .iter()
                .map(|p| p.description().to_string())
                .collect(),
            cx_recommendations: Self::cx_recommendations(&pain_points),
            retention_strategies: Self::retention_strategies(category),
        }))
    }
}
