//! Fixed, ordered set of analyzers.

use std::sync::Arc;
use thiserror::Error;

use super::{AnalyzerKind, BusinessAnalyzer, CustomerAnalyzer, GrowthAnalyzer, MarketAnalyzer};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Analyzer registry cannot be empty")]
    Empty,

    #[error("Analyzer '{0}' is registered more than once")]
    Duplicate(AnalyzerKind),
}

/// Immutable list of analyzers, ordered by [`AnalyzerKind`].
///
/// Built once at startup and shared by handle; there is no global instance.
#[derive(Clone)]
pub struct AnalyzerRegistry {
    analyzers: Vec<Arc<dyn BusinessAnalyzer>>,
}

impl AnalyzerRegistry {
    /// Creates a registry from the given analyzers.
    ///
    /// # Errors
    ///
    /// - `Empty` when no analyzer is supplied
    /// - `Duplicate` when two analyzers report the same kind
    pub fn new(mut analyzers: Vec<Arc<dyn BusinessAnalyzer>>) -> Result<Self, RegistryError> {
        if analyzers.is_empty() {
            return Err(RegistryError::Empty);
        }

        analyzers.sort_by_key(|a| a.kind());
        if let Some(pair) = analyzers.windows(2).find(|w| w[0].kind() == w[1].kind()) {
            return Err(RegistryError::Duplicate(pair[0].kind()));
        }

        Ok(Self { analyzers })
    }

    /// The production set: market, customer, growth.
    pub fn standard() -> Self {
        Self {
            analyzers: vec![
                Arc::new(MarketAnalyzer::new()),
                Arc::new(CustomerAnalyzer::new()),
                Arc::new(GrowthAnalyzer::new()),
            ],
        }
    }

    pub fn get(&self, kind: AnalyzerKind) -> Option<&Arc<dyn BusinessAnalyzer>> {
        self.analyzers.iter().find(|a| a.kind() == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn BusinessAnalyzer>> {
        self.analyzers.iter()
    }

    pub fn kinds(&self) -> Vec<AnalyzerKind> {
        self.analyzers.iter().map(|a| a.kind()).collect()
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}

impl std::fmt::Debug for AnalyzerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerRegistry")
            .field("analyzers", &self.kinds())
            .finish()
    }
}
