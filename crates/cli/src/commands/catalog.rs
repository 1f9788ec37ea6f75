//! Catalog inspection commands.
//!
//! # Environment Variables
//!
//! - `WOOCOMMERCE_URL` - Store base URL
//! - `WOOCOMMERCE_CONSUMER_KEY` / `WOOCOMMERCE_CONSUMER_SECRET` - REST API keys

use marque_core::{CategoryId, MatchTier, Product};
use marque_storefront::catalog::CatalogService;
use marque_storefront::config::{ConfigError, StorefrontConfig};
use marque_storefront::state::AppState;
use marque_storefront::woocommerce::WooError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while running catalog commands.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The WooCommerce credentials are not set.
    #[error("WooCommerce is not configured (set WOOCOMMERCE_URL, WOOCOMMERCE_CONSUMER_KEY and WOOCOMMERCE_CONSUMER_SECRET)")]
    NotConfigured,

    /// The HTTP client could not be built.
    #[error("Client error: {0}")]
    Client(#[from] WooError),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Which products to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    Make(String),
    Category(String),
    All,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductListing<'a> {
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    make: Option<MakeMatch<'a>>,
    products: &'a [Product],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MakeMatch<'a> {
    requested: &'a str,
    matched_slug: Option<&'a str>,
    tier: Option<MatchTier>,
    category_ids: Vec<CategoryId>,
}

/// Build a catalog service from the environment.
///
/// # Errors
///
/// Fails if the configuration is invalid or WooCommerce is not configured.
pub fn connect() -> Result<CatalogService, CatalogError> {
    let config = StorefrontConfig::from_env()?;
    if config.woocommerce.is_none() {
        return Err(CatalogError::NotConfigured);
    }
    Ok(AppState::new(config)?.catalog().clone())
}

/// Print every make with its totals.
///
/// # Errors
///
/// Fails if the output cannot be serialized.
pub async fn makes(catalog: &CatalogService) -> Result<(), CatalogError> {
    print_json(&catalog.make_overview().await)
}

/// Print the nested category tree.
///
/// # Errors
///
/// Fails if the output cannot be serialized.
pub async fn tree(catalog: &CatalogService) -> Result<(), CatalogError> {
    print_json(&catalog.category_tree().await)
}

/// Print the products matching `filter`.
///
/// # Errors
///
/// Fails if the output cannot be serialized.
pub async fn products(catalog: &CatalogService, filter: &ProductFilter) -> Result<(), CatalogError> {
    match filter {
        ProductFilter::Make(make) => {
            let selection = catalog.select_make(make).await;
            let mut category_ids: Vec<_> = selection.resolved.category_ids().into_iter().collect();
            category_ids.sort_unstable();

            if selection.resolved.matched.is_none() {
                tracing::warn!(make = %make, "No category matched, used substring fallback");
            }

            print_json(&ProductListing {
                count: selection.products.len(),
                make: Some(MakeMatch {
                    requested: make,
                    matched_slug: selection.resolved.matched.as_ref().map(|c| c.slug.as_str()),
                    tier: selection.resolved.tier,
                    category_ids,
                }),
                products: &selection.products,
            })
        }
        ProductFilter::Category(slug) => {
            let products = catalog.products_by_category_slug(slug).await;
            print_json(&ProductListing {
                count: products.len(),
                make: None,
                products: &products,
            })
        }
        ProductFilter::All => {
            let products = catalog.products().await;
            print_json(&ProductListing {
                count: products.len(),
                make: None,
                products: &products,
            })
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<(), CatalogError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
