//! Cached catalog access.
//!
//! ```text
//! handlers / CLI ──▶ CatalogService ──▶ CatalogCache (moka, TTL) ──▶ dyn CatalogSource
//!                          │                                           (WooCommerce)
//!                          └── marque_core resolution + aggregation
//! ```

mod cache;
mod service;
mod source;

pub use cache::CatalogCache;
pub use service::{CatalogService, DEFAULT_FEATURED_LIMIT, FeaturedProduct};
pub use source::{CatalogSource, Fetched};
