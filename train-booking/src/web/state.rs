//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::AppConfig;

/// Shared application state.
///
/// The catalog is read-only; nothing a request does changes it.
#[derive(Clone)]
pub struct AppState {
    /// Stations, trains and the traveller profile
    pub catalog: Arc<Catalog>,

    /// Server configuration, including simulated latencies
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: Catalog, config: AppConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }
}
