//! JSON catalog API.

pub mod categories;
pub mod products;
