//! Category-hierarchy resolution and product aggregation.
//!
//! Answers "which products belong to this make?" over a snapshot of the
//! upstream catalog. The upstream data is not trusted to be tidy: slugs are
//! formatted inconsistently, products are tagged only with leaf categories,
//! and the parent pointers may contain orphans or even cycles.
//!
//! # Flow
//!
//! ```text
//! make input ──normalize──▶ resolve_make ──▶ {root} ∪ descendants ──▶ filter products
//!                                 │
//!                                 └─ no match ──▶ substring scan of product categories
//! ```
//!
//! [`overview`] adds whole-catalog views used by the API and the CLI.
//!
//! All functions are pure and preserve the order of the input products.

pub mod aggregate;
pub mod hierarchy;
pub mod overview;
pub mod slug;

pub use aggregate::{MakeSelection, products_in_category, products_in_make, select_make};
pub use hierarchy::{CategoryIndex, MatchTier, ResolvedMake, descendant_ids, resolve_make};
pub use overview::{CategoryNode, MakeSummary, UNCATEGORIZED_SLUG, category_tree, make_overview};
pub use slug::normalize;
