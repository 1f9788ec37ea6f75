//! The seam between the catalog and wherever the data comes from.

use async_trait::async_trait;
use marque_core::{Category, Product};

/// Records fetched from the upstream store.
///
/// `complete` is false when paging stopped early because a page could not be
/// fetched. The records gathered before the failure are still returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    pub items: Vec<T>,
    pub complete: bool,
}

impl<T> Fetched<T> {
    /// A full snapshot.
    #[must_use]
    pub const fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            complete: true,
        }
    }

    /// A snapshot cut short by an upstream failure.
    #[must_use]
    pub const fn partial(items: Vec<T>) -> Self {
        Self {
            items,
            complete: false,
        }
    }
}

impl<T> Default for Fetched<T> {
    fn default() -> Self {
        Self::complete(Vec::new())
    }
}

/// Supplies full category and product snapshots.
///
/// Implementations never fail outright. Upstream errors are logged and show
/// up as an incomplete (possibly empty) [`Fetched`].
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every product category, deduplicated by id.
    async fn fetch_categories(&self) -> Fetched<Category>;

    /// Every published product, deduplicated by id.
    async fn fetch_products(&self) -> Fetched<Product>;
}
