//! TTL cache over a [`CatalogSource`].

use std::sync::Arc;
use std::time::Duration;

use marque_core::{Category, Product};
use moka::future::Cache;
use tracing::{debug, instrument, warn};

use super::source::CatalogSource;

/// Cache key for catalog snapshots.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    Categories,
    Products,
}

/// Cached snapshot. Handing out a clone only bumps a reference count.
#[derive(Debug, Clone)]
enum CacheValue {
    Categories(Arc<[Category]>),
    Products(Arc<[Product]>),
}

/// Holds one category snapshot and one product snapshot, each expiring
/// `ttl` after it was stored.
///
/// Concurrent misses are not coalesced: each caller fetches and the last
/// write wins. Snapshots cut short by upstream failures are returned but
/// never stored.
#[derive(Clone)]
pub struct CatalogCache {
    inner: Arc<CatalogCacheInner>,
}

struct CatalogCacheInner {
    source: Arc<dyn CatalogSource>,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogCache {
    /// Create an empty cache in front of `source`.
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(2).time_to_live(ttl).build();

        Self {
            inner: Arc::new(CatalogCacheInner { source, cache }),
        }
    }

    /// Current category snapshot.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Arc<[Category]> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return categories;
        }

        let fetched = self.inner.source.fetch_categories().await;
        let snapshot: Arc<[Category]> = fetched.items.into();

        if fetched.complete {
            self.inner
                .cache
                .insert(CacheKey::Categories, CacheValue::Categories(Arc::clone(&snapshot)))
                .await;
        } else {
            warn!(count = snapshot.len(), "Category snapshot incomplete, not caching");
        }

        snapshot
    }

    /// Current product snapshot.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Arc<[Product]> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return products;
        }

        let fetched = self.inner.source.fetch_products().await;
        let snapshot: Arc<[Product]> = fetched.items.into();

        if fetched.complete {
            self.inner
                .cache
                .insert(CacheKey::Products, CacheValue::Products(Arc::clone(&snapshot)))
                .await;
        } else {
            warn!(count = snapshot.len(), "Product snapshot incomplete, not caching");
        }

        snapshot
    }

    /// Drop both snapshots. The next read of each refetches.
    pub async fn invalidate(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
        debug!("Catalog cache invalidated");
    }
}
