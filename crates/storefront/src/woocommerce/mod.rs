//! WooCommerce REST API client.
//!
//! # Architecture
//!
//! - Read-only access to `wc/v3` product categories and published products
//! - HTTP Basic auth with a consumer key and secret
//! - Results are paged (`per_page`/`page`); a page shorter than `per_page`
//!   is the last one, and a hard page cap bounds runaway stores
//! - A failed page is retried once; a second failure ends paging and the
//!   records collected so far are returned as an incomplete snapshot
//!
//! Caching is not done here; see [`crate::catalog::CatalogCache`].

mod client;
mod conversions;
pub mod types;

pub use client::WooCommerceClient;

use thiserror::Error;

/// Errors that can occur when talking to the WooCommerce API.
///
/// These never escape the client's public fetch operations, which degrade to
/// partial results instead. They surface in logs and in page-level helpers.
#[derive(Debug, Error)]
pub enum WooError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The body was not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The body was JSON but not a list of records.
    #[error("Unexpected response: expected a JSON array, got {0}")]
    UnexpectedShape(&'static str),

    /// The configured store URL cannot be joined with an API path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
