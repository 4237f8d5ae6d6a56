use std::sync::Arc;

use crate::{catalog::Catalog, config::Config};

/// Shared application state
///
/// The catalog never changes after startup, so requests read it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub limits: ResultLimits,
}

/// Result-count defaults applied to every request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLimits {
    /// Used when the request has no `n`
    pub default: usize,
    /// Larger `n` values are clamped to this
    pub max: usize,
}

impl Default for ResultLimits {
    fn default() -> Self {
        Self { default: 5, max: 50 }
    }
}

impl ResultLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default: config.default_results,
            max: config.max_results,
        }
    }

    /// Resolves the requested count against the defaults
    pub fn resolve(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default).min(self.max)
    }
}

impl AppState {
    /// Creates state over an already-loaded catalog
    pub fn new(catalog: Catalog, limits: ResultLimits) -> Self {
        Self {
            catalog: Arc::new(catalog),
            limits,
        }
    }
}
