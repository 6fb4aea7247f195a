//! Shared application state

use std::sync::Arc;

use crate::catalog::CatalogService;

/// State shared by all request handlers
pub struct AppState {
    /// The catalog service (store + synonym index + failed-search log)
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self { catalog }
    }
}
