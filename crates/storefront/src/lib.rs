//! Marque storefront library.
//!
//! Serves the catalog of the upstream WooCommerce store as a cached JSON
//! API. Exposed as a library so the binary, the CLI and the integration
//! tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod woocommerce;
