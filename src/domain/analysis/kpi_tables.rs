//! Static KPI projections keyed by business category.

use crate::domain::business::BusinessCategory;

use super::Kpi;

/// KPIs attached to every orchestrated analysis.
pub fn consolidated_kpis(category: BusinessCategory) -> Vec<Kpi> {
    match category {
        BusinessCategory::Saas => vec![
            Kpi::new("MRR Growth", "8%", "15%", "+88%"),
            Kpi::new("Churn Rate", "8.5%", "5.2%", "-39%"),
            Kpi::new("CAC Payback", "9 months", "6 months", "-33%"),
            Kpi::new("NPS Score", "35", "55", "+57%"),
        ],
        BusinessCategory::Ecommerce => vec![
            Kpi::new("Conversion Rate", "1.9%", "3.2%", "+68%"),
            Kpi::new("AOV", "$72", "$95", "+32%"),
            Kpi::new("Customer LTV", "$165", "$235", "+42%"),
            Kpi::new("Repeat Purchase Rate", "18%", "28%", "+56%"),
        ],
        _ => vec![
            Kpi::new("Revenue Growth", "5%", "12%", "+140%"),
            Kpi::new("Customer Satisfaction", "7.2/10", "8.5/10", "+18%"),
        ],
    }
}
