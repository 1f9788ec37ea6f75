//! Product category records.

use serde::{Deserialize, Serialize};

use super::id::CategoryId;

/// A product category from the upstream store.
///
/// Categories form a forest through `parent`: a category whose parent is
/// [`CategoryId::ROOT`] is a top-level "make" (vehicle brand), and models or
/// generations nest beneath it to arbitrary depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Upstream-assigned unique ID.
    pub id: CategoryId,
    /// URL slug (e.g., `x5-g05`).
    pub slug: String,
    /// Display name (e.g., `X5 G05`).
    pub name: String,
    /// Parent category, or [`CategoryId::ROOT`] for a make.
    pub parent: CategoryId,
    /// Product count reported by the upstream store. Informational only.
    pub count: i64,
}

impl Category {
    /// Whether this category sits at the top of the forest.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_root()
    }
}
