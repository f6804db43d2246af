//! Rule-based generator - canned per-category analysis.
//!
//! Used for demo requests and as the fallback when every analyzer fails.
//! Produces the same [`ConsolidatedAnalysis`] shape as the orchestrated path.

use std::collections::BTreeMap;

use crate::domain::analyzers::owned;
use crate::domain::business::{BusinessCategory, BusinessDescription};
use crate::domain::foundation::Timestamp;

use super::{extract_keywords, ConsolidatedAnalysis, Kpi, Priority, Recommendation};

/// Score is reduced when more keywords than this are matched.
pub const COMPLEXITY_THRESHOLD: usize = 10;
pub const COMPLEXITY_PENALTY: u8 = 5;
pub const MIN_RULE_BASED_SCORE: u8 = 45;

const TRAFFIC_KEYWORDS: &[&str] = &["tráfico", "visitas", "seo"];
const CONVERSION_KEYWORDS: &[&str] = &["conversión", "ventas", "clientes"];

struct Template {
    score: u8,
    summary: String,
    recommendations: Vec<Recommendation>,
    kpis: Vec<Kpi>,
    timeline: &'static str,
    estimated_roi: &'static str,
}

fn rec(category: &str, priority: Priority, impact: &str, actions: &[&str]) -> Recommendation {
    Recommendation::new(category, priority, impact, owned(actions))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedGenerator;

impl RuleBasedGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        business: &BusinessDescription,
        generated_at: Timestamp,
    ) -> ConsolidatedAnalysis {
        let template = Self::template(business.category(), business.name());

        let challenge_keywords = extract_keywords(business.challenges());
        let goal_keywords = extract_keywords(business.goals());
        let mentions = |group: &[&str]| {
            challenge_keywords
                .iter()
                .chain(goal_keywords.iter())
                .any(|k| group.contains(&k.as_str()))
        };

        let mut recommendations = template.recommendations;
        if mentions(TRAFFIC_KEYWORDS) {
            recommendations.push(rec(
                "Traffic Generation",
                Priority::High,
                "40% increase in organic traffic",
                &[
                    "Implement a technical SEO and content strategy",
                    "Create an optimized Google Ads campaign",
                    "Develop content marketing with a regular blog",
                ],
            ));
        }
        if mentions(CONVERSION_KEYWORDS) {
            recommendations.push(rec(
                "Conversion Optimization",
                Priority::High,
                "25% increase in conversions",
                &[
                    "Implement A/B testing on landing pages",
                    "Optimize the conversion funnel",
                    "Add urgency and scarcity elements",
                ],
            ));
        }

        let complexity = challenge_keywords.len() + goal_keywords.len();

        ConsolidatedAnalysis {
            business_type: business.category(),
            business_name: business.name().to_string(),
            score: Self::adjust_score(template.score, complexity),
            summary: template.summary,
            recommendations,
            kpis: template.kpis,
            timeline: template.timeline.to_string(),
            estimated_roi: template.estimated_roi.to_string(),
            generated_at,
            is_demo: None,
            agent_insights: BTreeMap::new(),
        }
    }

    /// Applies the complexity penalty, never going below the floor.
    pub fn adjust_score(score: u8, keyword_count: usize) -> u8 {
        if keyword_count > COMPLEXITY_THRESHOLD {
            score
                .saturating_sub(COMPLEXITY_PENALTY)
                .max(MIN_RULE_BASED_SCORE)
        } else {
            score
        }
    }

    fn template(category: BusinessCategory, name: &str) -> Template {
        match category {
            BusinessCategory::Saas => Template {
                score: 75,
                summary: format!(
                    "Analysis completed for {}. We identified key opportunities to optimize SaaS metrics.",
                    name
                ),
                recommendations: vec![
                    rec(
                        "Conversion Optimization",
                        Priority::High,
                        "25-40% increase in conversions",
                        &[
                            "Implement interactive onboarding with progress tracking",
                            "Optimize the landing page with social proof and testimonials",
                            "Create an extended free trial with limited premium features",
                        ],
                    ),
                    rec(
                        "Churn Reduction",
                        Priority::High,
                        "30% reduction in cancellations",
                        &[
                            "Implement an early churn alert system",
                            "Create a proactive customer success program",
                            "Develop feature adoption tracking and nudges",
                        ],
                    ),
                    rec(
                        "Revenue Growth",
                        Priority::Medium,
                        "20% increase in ARPU",
                        &[
                            "Implement value- and usage-based pricing",
                            "Create premium tiers with advanced features",
                            "Develop an automated upselling program",
                        ],
                    ),
                ],
                kpis: vec![
                    Kpi::new("MRR Growth", "12%", "20%", "+67%"),
                    Kpi::new("Churn Rate", "7.2%", "4.5%", "-38%"),
                    Kpi::new("CAC Payback", "8.2 months", "5.1 months", "-38%"),
                    Kpi::new("NPS Score", "42", "65", "+55%"),
                ],
                timeline: "3-6 months for full implementation",
                estimated_roi: "185%",
            },
            BusinessCategory::Ecommerce => Template {
                score: 68,
                summary: format!(
                    "Analysis completed for {}. We identified opportunities to optimize conversions and AOV.",
                    name
                ),
                recommendations: vec![
                    rec(
                        "Conversion Optimization",
                        Priority::High,
                        "35% increase in conversions",
                        &[
                            "Implement abandoned cart recovery with an email sequence",
                            "Streamline checkout to 2-3 steps",
                            "Add prominent reviews and ratings on product pages",
                        ],
                    ),
                    rec(
                        "AOV Increase",
                        Priority::Medium,
                        "25% increase in average order value",
                        &[
                            "Implement smart cross-selling and upselling",
                            "Create bundles of complementary products",
                            "Offer free shipping above a minimum order",
                        ],
                    ),
                    rec(
                        "Customer Experience",
                        Priority::High,
                        "40% increase in repeat purchases",
                        &[
                            "Implement a chatbot for 24/7 support",
                            "Create a loyalty program with rewards",
                            "Personalize product recommendations with ML",
                        ],
                    ),
                ],
                kpis: vec![
                    Kpi::new("Conversion Rate", "1.8%", "2.9%", "+61%"),
                    Kpi::new("Average Order Value", "$67", "$89", "+33%"),
                    Kpi::new("Cart Abandonment", "69%", "52%", "-25%"),
                    Kpi::new("Customer LTV", "$156", "$218", "+40%"),
                ],
                timeline: "2-4 months for full implementation",
                estimated_roi: "165%",
            },
            BusinessCategory::Local => Template {
                score: 62,
                summary: format!(
                    "Analysis completed for {}. We identified opportunities to improve local digital presence.",
                    name
                ),
                recommendations: vec![
                    rec(
                        "Local Digital Presence",
                        Priority::High,
                        "50% more local visibility",
                        &[
                            "Optimize Google My Business with photos and reviews",
                            "Implement local SEO with geographic keywords",
                            "Create relevant, up-to-date local content",
                        ],
                    ),
                    rec(
                        "Customer Retention",
                        Priority::Medium,
                        "30% increase in repeat customers",
                        &[
                            "Implement a local loyalty program",
                            "Create a referral system with incentives",
                            "Develop segmented email marketing",
                        ],
                    ),
                    rec(
                        "Operations",
                        Priority::Medium,
                        "25% efficiency improvement",
                        &[
                            "Implement an online booking system",
                            "Adjust opening hours to traffic patterns",
                            "Create an operational metrics dashboard",
                        ],
                    ),
                ],
                kpis: vec![
                    Kpi::new("Local Search Ranking", "#8", "#3", "+63%"),
                    Kpi::new("Repeat Customer Rate", "23%", "35%", "+52%"),
                    Kpi::new("Average Transaction", "$34", "$45", "+32%"),
                    Kpi::new("Google Reviews Score", "4.1", "4.6", "+12%"),
                ],
                timeline: "2-3 months for full implementation",
                estimated_roi: "145%",
            },
            BusinessCategory::Startup | BusinessCategory::Other => Template {
                score: 58,
                summary: format!(
                    "Analysis completed for {}. We identified key areas for validation and growth.",
                    name
                ),
                recommendations: vec![
                    rec(
                        "Product-Market Fit",
                        Priority::High,
                        "Market validation",
                        &[
                            "Run customer development interviews",
                            "Build an MVP with validated core features",
                            "Define product-market fit metrics",
                        ],
                    ),
                    rec(
                        "Go-to-Market Strategy",
                        Priority::High,
                        "Accelerated growth",
                        &[
                            "Define a detailed Ideal Customer Profile (ICP)",
                            "Create a content marketing strategy",
                            "Run growth hacking experiments",
                        ],
                    ),
                    rec(
                        "Fundraising Preparation",
                        Priority::Medium,
                        "Investment readiness",
                        &[
                            "Build a financial model and projections",
                            "Develop a compelling pitch deck",
                            "Establish key metrics for investors",
                        ],
                    ),
                ],
                kpis: vec![
                    Kpi::new("Product-Market Fit Score", "6.2/10", "8.5/10", "+37%"),
                    Kpi::new("Monthly Growth Rate", "12%", "25%", "+108%"),
                    Kpi::new("Customer Acquisition Cost", "$67", "$42", "-37%"),
                    Kpi::new("Runway", "8 months", "14 months", "+75%"),
                ],
                timeline: "2-4 months for initial validation",
                estimated_roi: "220%",
            },
        }
    }
}
