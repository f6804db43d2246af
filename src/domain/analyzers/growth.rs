//! Growth analyzer - stage classification and growth playbooks.

use serde::{Deserialize, Serialize};

use crate::domain::business::{BusinessCategory, BusinessDescription};

use super::{owned, AnalyzerError, AnalyzerKind, BusinessAnalyzer, Insights};

/// Stage markers in precedence order; first match wins.
const STAGE_MARKERS: &[(BusinessStage, &[&str])] = &[
    (BusinessStage::MvpValidation, &["mvp", "validar"]),
    (BusinessStage::Growth, &["crecimiento", "escalar"]),
    (BusinessStage::Optimization, &["optimizar"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessStage {
    #[serde(rename = "MVP/Validation")]
    MvpValidation,
    Growth,
    Optimization,
    #[serde(rename = "Early Stage")]
    EarlyStage,
}

impl BusinessStage {
    pub fn label(&self) -> &'static str {
        match self {
            BusinessStage::MvpValidation => "MVP/Validation",
            BusinessStage::Growth => "Growth",
            BusinessStage::Optimization => "Optimization",
            BusinessStage::EarlyStage => "Early Stage",
        }
    }

    /// Classifies the business from its description and challenges.
    pub fn classify(description: &str, challenges: &str) -> Self {
        let text = format!("{} {}", description, challenges).to_lowercase();
        STAGE_MARKERS
            .iter()
            .find(|(_, markers)| markers.iter().any(|m| text.contains(m)))
            .map(|(stage, _)| *stage)
            .unwrap_or(BusinessStage::EarlyStage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTier {
    Low,
    Medium,
    High,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeHorizon {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Critical,
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthStrategy {
    pub strategy: String,
    pub description: String,
    pub tactics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionChannel {
    pub channel: String,
    pub cost: CostTier,
    pub timeline: TimeHorizon,
    pub effectiveness: Effectiveness,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthMetric {
    pub metric: String,
    pub target: String,
    pub importance: Importance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthInsights {
    pub current_stage: BusinessStage,
    pub growth_strategies: Vec<GrowthStrategy>,
    pub acquisition_channels: Vec<AcquisitionChannel>,
    pub growth_metrics: Vec<GrowthMetric>,
    pub scaling_recommendations: Vec<String>,
}

fn strategy(name: &str, description: &str, tactics: &[&str]) -> GrowthStrategy {
    GrowthStrategy {
        strategy: name.to_string(),
        description: description.to_string(),
        tactics: owned(tactics),
    }
}

fn channel(
    name: &str,
    cost: CostTier,
    timeline: TimeHorizon,
    effectiveness: Effectiveness,
) -> AcquisitionChannel {
    AcquisitionChannel {
        channel: name.to_string(),
        cost,
        timeline,
        effectiveness,
    }
}

fn metric(name: &str, target: &str, importance: Importance) -> GrowthMetric {
    GrowthMetric {
        metric: name.to_string(),
        target: target.to_string(),
        importance,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GrowthAnalyzer;

impl GrowthAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn growth_strategies(category: BusinessCategory) -> Vec<GrowthStrategy> {
        match category {
            BusinessCategory::Saas => vec![
                strategy(
                    "Product-Led Growth",
                    "Use the product as the main acquisition channel",
                    &["Free trial optimization", "In-app referrals", "Viral features"],
                ),
                strategy(
                    "Content Marketing",
                    "Attract customers with valuable content",
                    &["Technical blog", "Webinars", "Case studies", "SEO optimization"],
                ),
                strategy(
                    "Partnership Program",
                    "Grow through strategic partnerships",
                    &["Integration partnerships", "Reseller program", "Affiliate marketing"],
                ),
            ],
            BusinessCategory::Ecommerce => vec![
                strategy(
                    "Marketplace Expansion",
                    "Expand into multiple sales channels",
                    &["Amazon FBA", "eBay", "Facebook Marketplace", "Google Shopping"],
                ),
                strategy(
                    "Social Commerce",
                    "Sell directly on social networks",
                    &["Instagram Shopping", "Facebook Shop", "TikTok Shopping", "Pinterest"],
                ),
                strategy(
                    "Email & SMS Marketing",
                    "Personalized direct marketing",
                    &["Abandoned cart recovery", "Segmented campaigns", "Loyalty programs"],
                ),
            ],
            _ => vec![strategy(
                "Digital Marketing",
                "Comprehensive digital presence",
                &["SEO", "Social media", "Content marketing", "Paid advertising"],
            )],
        }
    }

    fn acquisition_channels(category: BusinessCategory) -> Vec<AcquisitionChannel> {
        use CostTier as C;
        use Effectiveness as E;
        use TimeHorizon as T;

        match category {
            BusinessCategory::Saas => vec![
                channel("Content Marketing", C::Low, T::LongTerm, E::High),
                channel("Google Ads", C::Medium, T::ShortTerm, E::Medium),
                channel("LinkedIn Ads", C::High, T::MediumTerm, E::High),
                channel("Product Hunt", C::Low, T::ShortTerm, E::Medium),
            ],
            BusinessCategory::Ecommerce => vec![
                channel("Facebook/Instagram Ads", C::Medium, T::ShortTerm, E::High),
                channel("Google Shopping", C::Medium, T::ShortTerm, E::High),
                channel("Influencer Marketing", C::Variable, T::MediumTerm, E::High),
                channel("Email Marketing", C::Low, T::LongTerm, E::Medium),
            ],
            _ => vec![
                channel("SEO", C::Low, T::LongTerm, E::High),
                channel("Social Media", C::Low, T::MediumTerm, E::Medium),
            ],
        }
    }

    fn growth_metrics(category: BusinessCategory) -> Vec<GrowthMetric> {
        match category {
            BusinessCategory::Saas => vec![
                metric("MRR Growth Rate", "15-20% monthly", Importance::Critical),
                metric("Customer Acquisition Cost (CAC)", "<3 months payback", Importance::High),
                metric("Net Revenue Retention", ">110%", Importance::High),
                metric("Product Qualified Leads (PQL)", "25% monthly growth", Importance::Medium),
            ],
            BusinessCategory::Ecommerce => vec![
                metric("Monthly Revenue Growth", "10-15% monthly", Importance::Critical),
                metric("Customer Lifetime Value (CLV)", "3x CAC", Importance::High),
                metric("Repeat Purchase Rate", ">25%", Importance::High),
                metric("Average Order Value (AOV)", "Steady growth", Importance::Medium),
            ],
            _ => vec![
                metric("Revenue Growth", "10% monthly", Importance::Critical),
                metric("Customer Acquisition Cost", "Optimize continuously", Importance::High),
            ],
        }
    }

    fn scaling_recommendations(category: BusinessCategory) -> Vec<String> {
        match category {
            BusinessCategory::Saas => owned(&[
                "Automate onboarding processes",
                "Implement scalable customer success",
                "Develop self-service capabilities",
                "Create a partner/reseller program",
                "Invest in product analytics",
            ]),
            BusinessCategory::Ecommerce => owned(&[
                "Automate fulfillment and logistics",
                "Implement advanced inventory management",
                "Expand into new geographic markets",
                "Develop private label products",
                "Invest in customer service automation",
            ]),
            _ => owned(&[
                "Automate operational processes",
                "Implement scalable systems",
                "Develop team and culture",
                "Expand the target market",
            ]),
        }
    }
}

impl BusinessAnalyzer for GrowthAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Growth
    }

    fn display_name(&self) -> &'static str {
        "Growth Strategist"
    }

    fn specialization(&self) -> &'static str {
        "Growth and scalability strategies"
    }

    fn analyze(&self, business: &BusinessDescription) -> Result<Insights, AnalyzerError> {
        let category = business.category();

        Ok(Insights::Growth(GrowthInsights {
            current_stage: BusinessStage::classify(business.description(), business.challenges()),
            growth_strategies: Self::growth_strategies(category),
            acquisition_channels: Self::acquisition_channels(category),
            growth_metrics: Self::growth_metrics(category),
            scaling_recommendations: Self::scaling_recommendations(category),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(category: &str) -> GrowthInsights {
        let business = BusinessDescription::new(category, "Acme").unwrap();
        match GrowthAnalyzer::new().analyze(&business).unwrap() {
            Insights::Growth(insights) => insights,
            other => panic!("expected growth insights, got {:?}", other.kind()),
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Stage classification
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn mvp_marker_classifies_as_validation() {
        assert_eq!(
            BusinessStage::classify("Tenemos un MVP listo", ""),
            BusinessStage::MvpValidation
        );
    }

    #[test]
    fn escalar_without_mvp_classifies_as_growth() {
        assert_eq!(
            BusinessStage::classify("", "queremos escalar el equipo"),
            BusinessStage::Growth
        );
    }

    #[test]
    fn optimizar_only_classifies_as_optimization() {
        assert_eq!(
            BusinessStage::classify("", "optimizar costes"),
            BusinessStage::Optimization
        );
    }

    #[test]
    fn no_markers_classifies_as_early_stage() {
        assert_eq!(BusinessStage::classify("cafeteria", "pocos clientes"), BusinessStage::EarlyStage);
    }

    #[test]
    fn first_match_wins_when_markers_co_occur() {
        assert_eq!(
            BusinessStage::classify("mvp", "escalar y optimizar"),
            BusinessStage::MvpValidation
        );
        assert_eq!(
            BusinessStage::classify("", "optimizar para escalar"),
            BusinessStage::Growth
        );
    }

    #[test]
    fn stage_serializes_as_label() {
        for stage in [
            BusinessStage::MvpValidation,
            BusinessStage::Growth,
            BusinessStage::Optimization,
            BusinessStage::EarlyStage,
        ] {
            assert_eq!(
                serde_json::to_string(&stage).unwrap(),
                format!("\"{}\"", stage.label())
            );
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Lookup tables
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn saas_first_strategy_is_product_led_growth() {
        let insights = analyze("saas");

        assert_eq!(insights.growth_strategies.len(), 3);
        assert_eq!(insights.growth_strategies[0].strategy, "Product-Led Growth");
        assert_eq!(insights.growth_metrics.len(), 4);
        assert_eq!(insights.acquisition_channels.len(), 4);
    }

    #[test]
    fn unknown_category_uses_digital_marketing_fallback() {
        let insights = analyze("local");

        assert_eq!(insights.growth_strategies.len(), 1);
        assert_eq!(insights.growth_strategies[0].strategy, "Digital Marketing");
        assert_eq!(insights.acquisition_channels.len(), 2);
        assert_eq!(insights.growth_metrics.len(), 2);
        assert_eq!(insights.scaling_recommendations.len(), 4);
    }

    #[test]
    fn ecommerce_channels_include_influencers_with_variable_cost() {
        let insights = analyze("ecommerce");

        let influencer = insights
            .acquisition_channels
            .iter()
            .find(|c| c.channel == "Influencer Marketing")
            .unwrap();
        assert_eq!(influencer.cost, CostTier::Variable);
    }
}
