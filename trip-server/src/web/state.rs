//! Application state for the web layer.

use std::sync::Arc;

use crate::estimate::EstimatorConfig;
use crate::places::LocationCatalog;

/// Shared application state.
///
/// Reference data only; every request reads it and none writes to it.
#[derive(Clone)]
pub struct AppState {
    /// Known cities and popular routes
    pub catalog: Arc<LocationCatalog>,

    /// Emission, route and cost factor tables
    pub factors: Arc<EstimatorConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: LocationCatalog, factors: EstimatorConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            factors: Arc::new(factors),
        }
    }
}
