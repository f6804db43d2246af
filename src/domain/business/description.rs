//! The business description submitted for analysis.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::BusinessCategory;

/// Maximum accepted length of a business name.
pub const MAX_BUSINESS_NAME_LEN: usize = 200;

/// Input record for every analyzer.
///
/// Immutable once constructed; the orchestrator hands each analyzer its own
/// clone. Serialized with the same field names as the request payload so a
/// stored record shows exactly what the caller sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDescription {
    #[serde(rename = "business_type")]
    category: BusinessCategory,
    #[serde(rename = "business_name")]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "current_challenges")]
    challenges: String,
    #[serde(default)]
    goals: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    website: Option<String>,
}

impl BusinessDescription {
    /// Creates a description from the two required fields.
    ///
    /// # Errors
    ///
    /// - `EmptyField` when `business_type` or `business_name` is blank
    /// - `TooLong` when the name exceeds [`MAX_BUSINESS_NAME_LEN`]
    pub fn new(business_type: &str, name: impl Into<String>) -> Result<Self, ValidationError> {
        if business_type.trim().is_empty() {
            return Err(ValidationError::empty_field("business_type"));
        }

        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("business_name"));
        }
        if name.chars().count() > MAX_BUSINESS_NAME_LEN {
            return Err(ValidationError::too_long("business_name", MAX_BUSINESS_NAME_LEN));
        }

        Ok(Self {
            category: BusinessCategory::from_label(business_type),
            name,
            description: String::new(),
            challenges: String::new(),
            goals: String::new(),
            website: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_challenges(mut self, challenges: impl Into<String>) -> Self {
        self.challenges = challenges.into();
        self
    }

    pub fn with_goals(mut self, goals: impl Into<String>) -> Self {
        self.goals = goals.into();
        self
    }

    /// Sets the website. Blank values are treated as absent.
    pub fn with_website(mut self, website: Option<String>) -> Self {
        self.website = website
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty());
        self
    }

    pub fn category(&self) -> BusinessCategory {
        self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn challenges(&self) -> &str {
        &self.challenges
    }

    pub fn goals(&self) -> &str {
        &self.goals
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }
}
