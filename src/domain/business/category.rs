//! Business category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of business being analyzed.
///
/// Every lookup table in the analyzers is keyed by this value and carries a
/// fallback entry, so `Other` is always a valid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessCategory {
    Saas,
    Ecommerce,
    Local,
    Startup,
    Other,
}

impl BusinessCategory {
    /// All categories in declaration order.
    pub const ALL: [BusinessCategory; 5] = [
        BusinessCategory::Saas,
        BusinessCategory::Ecommerce,
        BusinessCategory::Local,
        BusinessCategory::Startup,
        BusinessCategory::Other,
    ];

    /// Parses a client-supplied label. Unknown labels map to `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "saas" => BusinessCategory::Saas,
            "ecommerce" | "e-commerce" => BusinessCategory::Ecommerce,
            "local" => BusinessCategory::Local,
            "startup" => BusinessCategory::Startup,
            _ => BusinessCategory::Other,
        }
    }

    /// Wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessCategory::Saas => "saas",
            BusinessCategory::Ecommerce => "ecommerce",
            BusinessCategory::Local => "local",
            BusinessCategory::Startup => "startup",
            BusinessCategory::Other => "other",
        }
    }
}

impl fmt::Display for BusinessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
