//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{CatalogCache, CatalogService, CatalogSource};
use crate::config::StorefrontConfig;
use crate::woocommerce::{WooCommerceClient, WooError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogService,
}

impl AppState {
    /// Create the state backed by the configured WooCommerce store.
    ///
    /// Without WooCommerce credentials the catalog is simply empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, WooError> {
        let client = WooCommerceClient::new(config.woocommerce.as_ref(), &config.catalog)?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Create the state over any catalog source.
    #[must_use]
    pub fn with_source(config: StorefrontConfig, source: Arc<dyn CatalogSource>) -> Self {
        let cache = CatalogCache::new(source, config.catalog.cache_ttl);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: CatalogService::new(cache),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog service.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }
}
