//! Market analyzer - market sizing and competitive landscape.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::business::{BusinessCategory, BusinessDescription};

use super::{owned, AnalyzerError, AnalyzerKind, BusinessAnalyzer, Insights};

const BASE_RECOMMENDATIONS: &[&str] = &[
    "Run a detailed competitive analysis every month",
    "Monitor industry trends",
    "Identify underserved market niches",
    "Develop a differentiated value proposition",
];

const HIGH_COMPETITION_RECOMMENDATIONS: &[&str] = &[
    "Focus on niche differentiation",
    "Invest in branding and positioning",
    "Develop strategic partnerships",
];

const WEBSITE_RECOMMENDATIONS: &[&str] = &[
    "Optimize page load speed",
    "Improve on-page SEO",
    "Implement analytics",
    "Optimize for mobile",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketInsights {
    pub market_overview: MarketOverview,
    pub competitive_landscape: CompetitiveLandscape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_audit: Option<WebsiteAudit>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub market_size: String,
    pub growth_rate: String,
    pub key_trends: Vec<String>,
    pub challenges: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompetitionLevel {
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitiveLandscape {
    pub competition_level: CompetitionLevel,
    pub key_competitors: Vec<String>,
    pub differentiation_opportunities: Vec<String>,
    pub market_gaps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Result of the local website check. No request is ever made to the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WebsiteAudit {
    Analyzed {
        url: String,
        recommendations: Vec<String>,
    },
    Error {
        message: String,
    },
}

/// Looks up market data and competition by business category.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarketAnalyzer;

impl MarketAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn market_overview(category: BusinessCategory) -> MarketOverview {
        match category {
            BusinessCategory::Saas => MarketOverview {
                market_size: "$157B (2023)".to_string(),
                growth_rate: "18% CAGR".to_string(),
                key_trends: owned(&[
                    "AI-powered features integration",
                    "Vertical SaaS specialization",
                    "Product-led growth adoption",
                    "Multi-tenant architecture evolution",
                ]),
                challenges: owned(&[
                    "Increased competition",
                    "Customer acquisition costs rising",
                    "Churn rate management",
                    "Feature differentiation",
                ]),
            },
            BusinessCategory::Ecommerce => MarketOverview {
                market_size: "$6.2T (2023)".to_string(),
                growth_rate: "10.4% CAGR".to_string(),
                key_trends: owned(&[
                    "Mobile commerce dominance",
                    "Social commerce growth",
                    "Sustainability focus",
                    "Personalization at scale",
                ]),
                challenges: owned(&[
                    "Supply chain disruptions",
                    "Customer acquisition costs",
                    "Cart abandonment rates",
                    "Inventory management",
                ]),
            },
            BusinessCategory::Local => MarketOverview {
                market_size: "Variable by location".to_string(),
                growth_rate: "5-8% average".to_string(),
                key_trends: owned(&[
                    "Digital transformation acceleration",
                    "Local SEO importance",
                    "Community engagement focus",
                    "Omnichannel experiences",
                ]),
                challenges: owned(&[
                    "Digital adoption barriers",
                    "Limited marketing budgets",
                    "Competition from chains",
                    "Seasonal fluctuations",
                ]),
            },
            BusinessCategory::Startup | BusinessCategory::Other => MarketOverview {
                market_size: "Varies by sector".to_string(),
                growth_rate: "High volatility".to_string(),
                key_trends: owned(&[
                    "Remote-first operations",
                    "Lean startup methodology",
                    "MVP-first approach",
                    "Venture capital availability",
                ]),
                challenges: owned(&[
                    "Product-market fit validation",
                    "Funding acquisition",
                    "Talent acquisition",
                    "Market timing",
                ]),
            },
        }
    }

    fn competitive_landscape(category: BusinessCategory) -> CompetitiveLandscape {
        match category {
            BusinessCategory::Saas => CompetitiveLandscape {
                competition_level: CompetitionLevel::High,
                key_competitors: owned(&["Salesforce", "HubSpot", "Monday.com", "Asana"]),
                differentiation_opportunities: owned(&[
                    "Industry-specific niche",
                    "Better UX/UI",
                    "More competitive pricing",
                    "Unique integrations",
                ]),
                market_gaps: owned(&[
                    "SMB-focused solutions",
                    "Industry-specific features",
                    "Better mobile experience",
                    "AI-powered automation",
                ]),
                note: None,
            },
            BusinessCategory::Ecommerce => CompetitiveLandscape {
                competition_level: CompetitionLevel::VeryHigh,
                key_competitors: owned(&["Amazon", "Shopify stores", "Local retailers"]),
                differentiation_opportunities: owned(&[
                    "Unique or handcrafted products",
                    "Personalized experience",
                    "Superior customer service",
                    "Sustainability and values",
                ]),
                market_gaps: owned(&[
                    "Niche product categories",
                    "Local/regional focus",
                    "Sustainable products",
                    "Personalized experiences",
                ]),
                note: None,
            },
            _ => CompetitiveLandscape {
                competition_level: CompetitionLevel::Medium,
                key_competitors: Vec::new(),
                differentiation_opportunities: owned(&[
                    "Research direct competitors",
                    "Define a unique value proposition",
                ]),
                market_gaps: Vec::new(),
                note: Some("Specific competitive analysis required".to_string()),
            },
        }
    }

    fn audit_website(website: &str) -> WebsiteAudit {
        match Url::parse(website) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
                WebsiteAudit::Analyzed {
                    url: url.to_string(),
                    recommendations: owned(WEBSITE_RECOMMENDATIONS),
                }
            }
            _ => WebsiteAudit::Error {
                message: "Could not analyze the website".to_string(),
            },
        }
    }

    fn recommendations(landscape: &CompetitiveLandscape) -> Vec<String> {
        let mut recommendations = owned(BASE_RECOMMENDATIONS);
        // Only plain High; Very High markets get the base list.
        if landscape.competition_level == CompetitionLevel::High {
            recommendations.extend(owned(HIGH_COMPETITION_RECOMMENDATIONS));
        }
        recommendations
    }
}

impl BusinessAnalyzer for MarketAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Market
    }

    fn display_name(&self) -> &'static str {
        "Market Analyzer"
    }

    fn specialization(&self) -> &'static str {
        "Market and competition analysis"
    }

    fn analyze(&self, business: &BusinessDescription) -> Result<Insights, AnalyzerError> {
        let category = business.category();
        let competitive_landscape = Self::competitive_landscape(category);
        let recommendations = Self::recommendations(&competitive_landscape);

        Ok(Insights::Market(MarketInsights {
            market_overview: Self::market_overview(category),
            competitive_landscape,
            website_audit: business.website().map(Self::audit_website),
            recommendations,
        }))
    }
}
