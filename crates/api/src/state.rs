//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::Catalog;
use crate::services::{CatalogService, TokenKeys};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It holds the catalog behind
/// the persistence seam, so the same router runs against `PostgreSQL` in
/// production and the in-memory catalog in tests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: CatalogService,
    tokens: TokenKeys,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Catalog persistence
    /// * `tokens` - Session token keys
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>, tokens: TokenKeys) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog: CatalogService::new(catalog),
                tokens,
            }),
        }
    }

    /// Get a reference to the catalog service.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    /// Get a reference to the session token keys.
    #[must_use]
    pub fn tokens(&self) -> &TokenKeys {
        &self.inner.tokens
    }
}
