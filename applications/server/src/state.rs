/// Shared application state
use std::sync::Arc;
use sterophile_core::{Catalog, CatalogProvider};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self { catalog }
    }

    /// State serving a fixed, already validated catalog
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self::new(Arc::new(catalog))
    }
}
