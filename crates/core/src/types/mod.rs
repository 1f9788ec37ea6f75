//! Core types for the Marque catalog.
//!
//! These mirror the records served by the upstream store after validation:
//! every field is present and strongly typed, so the catalog engine never has
//! to deal with missing or loosely-typed JSON.

pub mod category;
pub mod id;
pub mod price;
pub mod product;

pub use category::Category;
pub use id::*;
pub use price::parse_amount;
pub use product::{CategoryRef, Product, ProductImage};
