//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;
use wholesale_core::Catalog;

use crate::{config::AdminConfig, i18n::Locale, store::ProductStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: Arc<dyn ProductStore>,
    catalog: RwLock<Catalog>,
}

impl AppState {
    /// Create state around a product store. The catalog starts empty.
    #[must_use]
    pub fn new(config: AdminConfig, store: Arc<dyn ProductStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                catalog: RwLock::new(Catalog::new()),
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get the product store.
    #[must_use]
    pub fn store(&self) -> &dyn ProductStore {
        self.inner.store.as_ref()
    }

    /// Get the operator's product list.
    #[must_use]
    pub fn catalog(&self) -> &RwLock<Catalog> {
        &self.inner.catalog
    }

    /// Language for operator pages.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.inner.config.locale
    }

    /// Number of products fetched for list views.
    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.inner.config.page_size
    }
}
