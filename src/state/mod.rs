use std::sync::Arc;

use crate::dao::catalog_store::CatalogStore;

/// Reference-counted [`AppState`] shared across handlers.
pub type SharedState = Arc<AppState>;

/// Central application state handed to every handler.
pub struct AppState {
    catalog: Arc<dyn CatalogStore>,
}

impl AppState {
    /// Wrap the storage handle in an [`Arc`] so the state can be cloned cheaply.
    pub fn new(catalog: Arc<dyn CatalogStore>) -> SharedState {
        Arc::new(Self { catalog })
    }

    /// Handle to the catalog store.
    pub fn catalog(&self) -> &dyn CatalogStore {
        self.catalog.as_ref()
    }
}
