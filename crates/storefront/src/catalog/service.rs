//! Catalog queries answered from the cached snapshots.

use std::sync::Arc;

use marque_core::{
    Category, CategoryNode, MakeSelection, MakeSummary, Product, ProductId, category_tree,
    make_overview, products_in_category, select_make,
};
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};

use super::cache::CatalogCache;

/// Featured products shown when the caller does not ask for a count.
pub const DEFAULT_FEATURED_LIMIT: usize = 5;

/// Category label for products that carry none.
const FALLBACK_CATEGORY: &str = "Products";

/// Compact product card for the homepage carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturedProduct {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    /// Sale price when set, otherwise the regular price.
    pub price: Option<Decimal>,
    /// Name of the product's first category.
    pub category: String,
    /// Source URL of the first usable image.
    pub image: String,
}

impl FeaturedProduct {
    /// `None` for products without a usable image.
    fn from_product(product: &Product) -> Option<Self> {
        let image = product.primary_image()?;
        Some(Self {
            id: product.id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            price: product.effective_price(),
            category: product
                .categories
                .first()
                .map(|c| c.name.trim())
                .filter(|name| !name.is_empty())
                .unwrap_or(FALLBACK_CATEGORY)
                .to_string(),
            image: image.src.clone(),
        })
    }
}

/// Read side of the catalog.
///
/// Cheap to clone. Every query reads through the cache, so results are at
/// most one TTL old.
#[derive(Clone)]
pub struct CatalogService {
    cache: CatalogCache,
}

impl CatalogService {
    #[must_use]
    pub const fn new(cache: CatalogCache) -> Self {
        Self { cache }
    }

    /// All categories, in store order.
    pub async fn categories(&self) -> Arc<[Category]> {
        self.cache.categories().await
    }

    /// All published products, in store order.
    pub async fn products(&self) -> Arc<[Product]> {
        self.cache.products().await
    }

    /// Products tagged directly with a category slug.
    #[instrument(skip(self))]
    pub async fn products_by_category_slug(&self, category_slug: &str) -> Vec<Product> {
        let products = self.cache.products().await;
        let found = products_in_category(category_slug, &products, &[]);
        debug!(count = found.len(), "Products in category");
        found
    }

    /// Products under a make, descendants included.
    pub async fn products_by_make_slug(&self, make: &str) -> Vec<Product> {
        self.select_make(make).await.products
    }

    /// Products under a make, together with how the make was resolved.
    #[instrument(skip(self))]
    pub async fn select_make(&self, make: &str) -> MakeSelection {
        let (categories, products) = tokio::join!(self.cache.categories(), self.cache.products());
        let selection = select_make(make, &products, &categories);
        debug!(
            matched = selection.resolved.matched.as_ref().map(|c| c.slug.as_str()),
            tier = ?selection.resolved.tier,
            count = selection.products.len(),
            "Resolved make"
        );
        selection
    }

    /// Up to `limit` random products that have an image.
    pub async fn featured_products(&self, limit: usize) -> Vec<FeaturedProduct> {
        let products = self.cache.products().await;
        pick_featured(&products, limit)
    }

    /// Totals for every make.
    pub async fn make_overview(&self) -> Vec<MakeSummary> {
        let (categories, products) = tokio::join!(self.cache.categories(), self.cache.products());
        make_overview(&categories, &products)
    }

    /// The nested category forest.
    pub async fn category_tree(&self) -> Vec<CategoryNode> {
        category_tree(&self.cache.categories().await)
    }

    /// Drop cached snapshots so the next query hits the upstream.
    pub async fn invalidate_cache(&self) {
        self.cache.invalidate().await;
    }
}

fn pick_featured(products: &[Product], limit: usize) -> Vec<FeaturedProduct> {
    let mut candidates: Vec<FeaturedProduct> =
        products.iter().filter_map(FeaturedProduct::from_product).collect();
    candidates.shuffle(&mut rand::rng());
    candidates.truncate(limit);
    candidates
}
