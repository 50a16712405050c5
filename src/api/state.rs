use std::sync::Arc;

use crate::config::Config;
use crate::services::Catalog;

/// Shared application state
///
/// The catalog is loaded once at startup and only ever read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state over an already-loaded catalog
    pub fn new(catalog: Arc<Catalog>, config: Config) -> Self {
        Self {
            catalog,
            config: Arc::new(config),
        }
    }
}
