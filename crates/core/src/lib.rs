//! Marque Core - Catalog types and category-hierarchy engine.
//!
//! This crate provides the pieces of the storefront that do not talk to the
//! network:
//! - `storefront` - Public catalog API proxying the upstream WooCommerce store
//! - `cli` - Operator tooling for inspecting the catalog
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no caches. Everything here operates on already-fetched snapshots,
//! which keeps the resolution rules deterministic and easy to test.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, categories, products and price parsing
//! - [`catalog`] - Slug normalization, make resolution, product aggregation
//!   and whole-catalog views

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use catalog::{
    CategoryIndex, CategoryNode, MakeSelection, MakeSummary, MatchTier, ResolvedMake,
    category_tree, descendant_ids, make_overview, normalize, products_in_category,
    products_in_make, resolve_make, select_make,
};
pub use types::*;
