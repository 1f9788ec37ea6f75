//! Whole-catalog views: the make overview and the nested category tree.

use std::collections::HashSet;

use serde::Serialize;

use super::hierarchy::CategoryIndex;
use crate::types::{Category, CategoryId, Product};

/// Root category slug WooCommerce uses for untagged products.
pub const UNCATEGORIZED_SLUG: &str = "uncategorized";

/// Per-make totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeSummary {
    pub id: CategoryId,
    pub slug: String,
    pub name: String,
    /// Categories under the make, the make itself included.
    pub category_count: usize,
    /// Products tagged with the make or any category below it.
    pub product_count: usize,
}

/// A category with its children, recursively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub slug: String,
    pub name: String,
    pub count: i64,
    pub children: Vec<Self>,
}

/// Summarize every make (root category) except the uncategorized bucket.
///
/// Makes appear in store order.
#[must_use]
pub fn make_overview(categories: &[Category], products: &[Product]) -> Vec<MakeSummary> {
    let index = CategoryIndex::new(categories);

    index
        .roots()
        .filter(|root| !root.slug.eq_ignore_ascii_case(UNCATEGORIZED_SLUG))
        .map(|root| {
            let mut ids = index.descendants(root.id);
            ids.insert(root.id);
            MakeSummary {
                id: root.id,
                slug: root.slug.clone(),
                name: root.name.clone(),
                category_count: ids.len(),
                product_count: products.iter().filter(|p| p.in_any_category(&ids)).count(),
            }
        })
        .collect()
}

/// Build the category forest, children in store order.
///
/// Each category appears at most once, so cycles and self-parents cannot
/// recurse forever. Orphans are left out.
#[must_use]
pub fn category_tree(categories: &[Category]) -> Vec<CategoryNode> {
    let index = CategoryIndex::new(categories);
    let mut placed = HashSet::new();

    index
        .roots()
        .filter_map(|root| build_node(&index, root, &mut placed))
        .collect()
}

fn build_node(
    index: &CategoryIndex<'_>,
    category: &Category,
    placed: &mut HashSet<CategoryId>,
) -> Option<CategoryNode> {
    if !placed.insert(category.id) {
        return None;
    }

    let children = index
        .children(category.id)
        .filter_map(|child| build_node(index, child, placed))
        .collect();

    Some(CategoryNode {
        id: category.id,
        slug: category.slug.clone(),
        name: category.name.clone(),
        count: category.count,
        children,
    })
}
