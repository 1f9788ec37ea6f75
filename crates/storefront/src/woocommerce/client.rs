use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use marque_core::{Category, Product};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::catalog::{CatalogSource, Fetched};
use crate::config::{CatalogConfig, WooCommerceConfig};

use super::WooError;
use super::conversions::{convert_category, convert_product};
use super::types::{WooCategory, WooProduct};

const CATEGORIES_PATH: &str = "wp-json/wc/v3/products/categories";
const PRODUCTS_PATH: &str = "wp-json/wc/v3/products";

// =============================================================================
// WooCommerceClient
// =============================================================================

/// Client for the WooCommerce REST API.
///
/// Built without credentials it is disabled: every fetch returns an empty,
/// complete snapshot and no request is made.
#[derive(Clone)]
pub struct WooCommerceClient {
    inner: Arc<WooCommerceClientInner>,
}

struct WooCommerceClientInner {
    client: reqwest::Client,
    api: Option<ApiAccess>,
    paging: Paging,
}

struct ApiAccess {
    base_url: String,
    consumer_key: String,
    consumer_secret: SecretString,
}

#[derive(Debug, Clone, Copy)]
struct Paging {
    page_size: u32,
    category_max_pages: u32,
    product_max_pages: u32,
    retry_delay: Duration,
}

/// One decoded page. `raw_len` counts records before malformed ones were
/// dropped, so a page with a bad record still reads as full.
struct Page<T> {
    records: Vec<T>,
    raw_len: usize,
}

impl WooCommerceClient {
    /// Create a client. Pass `None` to get a disabled client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Option<&WooCommerceConfig>, catalog: &CatalogConfig) -> Result<Self, WooError> {
        let mut builder = reqwest::Client::builder();
        if let Some(config) = config {
            builder = builder.timeout(config.timeout);
        }

        let api = config.map(|config| ApiAccess {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
        });

        Ok(Self {
            inner: Arc::new(WooCommerceClientInner {
                client: builder.build()?,
                api,
                paging: Paging {
                    page_size: catalog.page_size,
                    category_max_pages: catalog.category_max_pages,
                    product_max_pages: catalog.product_max_pages,
                    retry_delay: catalog.retry_delay,
                },
            }),
        })
    }

    /// Whether credentials were supplied.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.api.is_some()
    }

    /// Fetch every product category.
    #[instrument(skip(self))]
    pub async fn fetch_all_categories(&self) -> Fetched<Category> {
        let Some(api) = &self.inner.api else {
            debug!("WooCommerce not configured, no categories");
            return Fetched::default();
        };

        let fetched = self
            .fetch_paginated::<WooCategory>(api, CATEGORIES_PATH, &[], self.inner.paging.category_max_pages)
            .await;
        let items = dedupe_by_key(
            fetched.items.into_iter().map(convert_category).collect(),
            |c: &Category| c.id,
        );

        debug!(count = items.len(), complete = fetched.complete, "Fetched categories");
        Fetched {
            items,
            complete: fetched.complete,
        }
    }

    /// Fetch every published product.
    #[instrument(skip(self))]
    pub async fn fetch_all_products(&self) -> Fetched<Product> {
        let Some(api) = &self.inner.api else {
            debug!("WooCommerce not configured, no products");
            return Fetched::default();
        };

        let fetched = self
            .fetch_paginated::<WooProduct>(
                api,
                PRODUCTS_PATH,
                &[("status", "publish")],
                self.inner.paging.product_max_pages,
            )
            .await;
        let items = dedupe_by_key(
            fetched.items.into_iter().map(convert_product).collect(),
            |p: &Product| p.id,
        );

        debug!(count = items.len(), complete = fetched.complete, "Fetched products");
        Fetched {
            items,
            complete: fetched.complete,
        }
    }

    /// Walk pages `1..=max_pages` until a short page.
    async fn fetch_paginated<T: DeserializeOwned>(
        &self,
        api: &ApiAccess,
        path: &str,
        filters: &[(&str, &str)],
        max_pages: u32,
    ) -> Fetched<T> {
        let paging = self.inner.paging;
        let full_page = usize::try_from(paging.page_size).unwrap_or(usize::MAX);
        let mut items = Vec::new();

        for page in 1..=max_pages {
            let result = match self.fetch_page::<T>(api, path, filters, page).await {
                Ok(fetched) => Ok(fetched),
                Err(error) => {
                    warn!(path, page, error = %error, "WooCommerce page failed, retrying once");
                    tokio::time::sleep(paging.retry_delay).await;
                    self.fetch_page::<T>(api, path, filters, page).await
                }
            };

            let fetched = match result {
                Ok(fetched) => fetched,
                Err(error) => {
                    warn!(
                        path,
                        page,
                        error = %error,
                        kept = items.len(),
                        "WooCommerce page failed twice, returning partial results"
                    );
                    return Fetched::partial(items);
                }
            };

            debug!(path, page, records = fetched.raw_len, "Fetched WooCommerce page");
            let last = fetched.raw_len < full_page;
            items.extend(fetched.records);
            if last {
                return Fetched::complete(items);
            }
            if page == max_pages {
                warn!(path, max_pages, "Page cap reached, results may be truncated");
            }
        }

        Fetched::complete(items)
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        api: &ApiAccess,
        path: &str,
        filters: &[(&str, &str)],
        page: u32,
    ) -> Result<Page<T>, WooError> {
        let mut url = Url::parse(&format!("{}/{path}", api.base_url))?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in filters {
                query.append_pair(key, value);
            }
            query.append_pair("per_page", &self.inner.paging.page_size.to_string());
            query.append_pair("page", &page.to_string());
        }

        let response = self
            .inner
            .client
            .get(url)
            .basic_auth(&api.consumer_key, Some(api.consumer_secret.expose_secret()))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(WooError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let raw = match serde_json::from_str::<Value>(&body)? {
            Value::Array(raw) => raw,
            Value::Null => Vec::new(),
            other => return Err(WooError::UnexpectedShape(json_kind(&other))),
        };

        let raw_len = raw.len();
        let records = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<T>(record) {
                Ok(record) => Some(record),
                Err(error) => {
                    warn!(path, page, index, error = %error, "Skipping malformed record");
                    None
                }
            })
            .collect();

        Ok(Page { records, raw_len })
    }
}

#[async_trait]
impl CatalogSource for WooCommerceClient {
    async fn fetch_categories(&self) -> Fetched<Category> {
        self.fetch_all_categories().await
    }

    async fn fetch_products(&self) -> Fetched<Product> {
        self.fetch_all_products().await
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Keep one record per key. The last record seen wins, placed where the
/// key first appeared.
fn dedupe_by_key<T, K>(items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T>
where
    K: Eq + Hash,
{
    let mut positions: HashMap<K, usize> = HashMap::with_capacity(items.len());
    let mut unique: Vec<T> = Vec::with_capacity(items.len());

    for item in items {
        match positions.entry(key(&item)) {
            Entry::Occupied(slot) => {
                if let Some(existing) = unique.get_mut(*slot.get()) {
                    *existing = item;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(item);
            }
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_last_wins_at_first_position() {
        let items = vec![(1, "a"), (2, "b"), (1, "c"), (3, "d"), (2, "e")];
        let unique = dedupe_by_key(items, |(id, _)| *id);
        assert_eq!(unique, vec![(1, "c"), (2, "e"), (3, "d")]);
    }

    #[test]
    fn test_dedupe_without_duplicates_is_identity() {
        let items = vec![(3, "x"), (1, "y"), (2, "z")];
        assert_eq!(dedupe_by_key(items.clone(), |(id, _)| *id), items);
    }

    #[tokio::test]
    async fn test_disabled_client_returns_empty_complete() {
        let client = WooCommerceClient::new(None, &CatalogConfig::default()).unwrap_or_else(|e| panic!("{e}"));
        assert!(!client.is_enabled());
        assert_eq!(client.fetch_all_categories().await, Fetched::complete(Vec::new()));
        assert_eq!(client.fetch_all_products().await, Fetched::complete(Vec::new()));
    }
}
