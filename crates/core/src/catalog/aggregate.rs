//! Product filtering by category and by make.

use super::hierarchy::{ResolvedMake, resolve_make};
use super::slug::normalize;
use crate::types::{Category, Product};

/// Products for a make together with how the make was resolved.
///
/// `resolved.matched` tells a make that does not exist apart from a make that
/// exists but has no products; the product list alone cannot.
#[derive(Debug, Clone)]
pub struct MakeSelection {
    pub resolved: ResolvedMake,
    pub products: Vec<Product>,
}

/// Products tagged directly with `category_slug`.
///
/// Compares slugs case-insensitively after trimming the input. There is no
/// descendant expansion: a product tagged only `x5-g05` is not returned for
/// `x5`. Use [`products_in_make`] for transitive queries.
#[must_use]
pub fn products_in_category(
    category_slug: &str,
    products: &[Product],
    _categories: &[Category],
) -> Vec<Product> {
    let wanted = category_slug.trim();
    if wanted.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|p| p.has_category_slug(wanted))
        .cloned()
        .collect()
}

/// Products under a make, including every descendant category.
#[must_use]
pub fn products_in_make(make_slug: &str, products: &[Product], categories: &[Category]) -> Vec<Product> {
    select_make(make_slug, products, categories).products
}

/// Resolve a make and collect its products.
///
/// When the make resolves to a category, keeps products attached to that
/// category or any descendant. When it does not, falls back to products whose
/// own category slug or name contains the normalized make, bypassing the tree.
#[must_use]
pub fn select_make(make_slug: &str, products: &[Product], categories: &[Category]) -> MakeSelection {
    let resolved = resolve_make(make_slug, categories);

    let products = if resolved.matched.is_some() {
        let ids = resolved.category_ids();
        products
            .iter()
            .filter(|p| p.in_any_category(&ids))
            .cloned()
            .collect()
    } else {
        substring_fallback(make_slug, products)
    };

    MakeSelection { resolved, products }
}

fn substring_fallback(make_slug: &str, products: &[Product]) -> Vec<Product> {
    let wanted = normalize(make_slug);
    if wanted.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|p| {
            p.categories.iter().any(|c| {
                normalize(&c.slug).contains(&wanted) || normalize(&c.name).contains(&wanted)
            })
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CategoryId, CategoryRef, ProductId};

    fn cat(id: i64, slug: &str, name: &str, parent: i64) -> Category {
        Category {
            id: CategoryId::new(id),
            slug: slug.to_string(),
            name: name.to_string(),
            parent: CategoryId::new(parent),
            count: 0,
        }
    }

    fn tag(id: i64, slug: &str, name: &str) -> CategoryRef {
        CategoryRef {
            id: CategoryId::new(id),
            slug: slug.to_string(),
            name: name.to_string(),
        }
    }

    fn product(id: i64, categories: Vec<CategoryRef>) -> Product {
        Product {
            id: ProductId::new(id),
            slug: format!("product-{id}"),
            name: format!("Product {id}"),
            price: "100.00".to_string(),
            sale_price: String::new(),
            categories,
            images: Vec::new(),
        }
    }

    fn product_ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    fn bmw_categories() -> Vec<Category> {
        vec![
            cat(1, "bmw", "BMW", 0),
            cat(2, "x5", "X5", 1),
            cat(3, "x5-g05", "X5 G05", 2),
        ]
    }

    #[test]
    fn test_make_includes_grandchildren() {
        let products = vec![product(100, vec![tag(3, "x5-g05", "X5 G05")])];
        let found = products_in_make("bmw", &products, &bmw_categories());
        assert_eq!(product_ids(&found), vec![100]);
    }

    #[test]
    fn test_make_input_is_normalized() {
        let products = vec![product(100, vec![tag(3, "x5-g05", "X5 G05")])];
        let categories = bmw_categories();
        assert_eq!(
            products_in_make("BMW ", &products, &categories),
            products_in_make("bmw", &products, &categories)
        );
    }

    #[test]
    fn test_category_is_exact_not_transitive() {
        let products = vec![product(100, vec![tag(3, "x5-g05", "X5 G05")])];
        assert!(products_in_category("x5", &products, &bmw_categories()).is_empty());
        assert_eq!(
            product_ids(&products_in_category(" X5-G05 ", &products, &bmw_categories())),
            vec![100]
        );
    }

    #[test]
    fn test_make_includes_root_tagged_products() {
        let products = vec![product(7, vec![tag(1, "bmw", "BMW")])];
        assert_eq!(
            product_ids(&products_in_make("bmw", &products, &bmw_categories())),
            vec![7]
        );
    }

    #[test]
    fn test_filters_preserve_input_order() {
        let categories = bmw_categories();
        let products = vec![
            product(5, vec![tag(3, "x5-g05", "X5 G05")]),
            product(1, vec![tag(50, "audi-r8", "Audi R8")]),
            product(9, vec![tag(2, "x5", "X5")]),
            product(3, vec![tag(1, "bmw", "BMW"), tag(3, "x5-g05", "X5 G05")]),
            product(2, vec![tag(3, "x5-g05", "X5 G05")]),
        ];
        assert_eq!(
            product_ids(&products_in_make("bmw", &products, &categories)),
            vec![5, 9, 3, 2]
        );
        assert_eq!(
            product_ids(&products_in_category("x5-g05", &products, &categories)),
            vec![5, 3, 2]
        );
    }

    #[test]
    fn test_products_without_categories_never_match() {
        let products = vec![product(1, Vec::new()), product(2, vec![tag(2, "x5", "X5")])];
        let categories = bmw_categories();
        assert_eq!(product_ids(&products_in_make("bmw", &products, &categories)), vec![2]);
        assert_eq!(product_ids(&products_in_make("ghost", &products, &categories)), Vec::<i64>::new());
        assert!(products_in_category("x5", &products[..1], &categories).is_empty());
    }

    #[test]
    fn test_empty_products() {
        assert!(products_in_make("bmw", &[], &bmw_categories()).is_empty());
        assert!(products_in_category("bmw", &[], &bmw_categories()).is_empty());
    }

    #[test]
    fn test_fallback_when_no_category_matches() {
        let categories = bmw_categories();
        let products = vec![
            product(1, vec![tag(80, "range-rover-sport-l494", "L494")]),
            product(2, vec![tag(81, "misc", "Range Rover Sport Wheels")]),
            product(3, vec![tag(3, "x5-g05", "X5 G05")]),
        ];
        let selection = select_make("Range Rover Sport", &products, &categories);
        assert!(selection.resolved.matched.is_none());
        assert_eq!(product_ids(&selection.products), vec![1, 2]);
    }

    #[test]
    fn test_fallback_matches_direct_substring_scan() {
        let categories = bmw_categories();
        let products = vec![
            product(1, vec![tag(80, "urus-exhaust", "Urus Exhaust")]),
            product(2, vec![tag(81, "huracan", "Huracan")]),
            product(3, vec![tag(82, "lambo_urus", "Lamborghini")]),
            product(4, Vec::new()),
            product(5, vec![tag(83, "wheels", "URUS wheels")]),
        ];
        let make = "Urus";
        let wanted = normalize(make);
        let expected: Vec<i64> = products
            .iter()
            .filter(|p| {
                p.categories
                    .iter()
                    .any(|c| normalize(&c.slug).contains(&wanted) || normalize(&c.name).contains(&wanted))
            })
            .map(|p| p.id.as_i64())
            .collect();

        let found = products_in_make(make, &products, &categories);
        assert_eq!(product_ids(&found), expected);
        assert_eq!(expected, vec![1, 3, 5]);
    }

    #[test]
    fn test_unknown_make_is_silent_empty() {
        let products = vec![product(100, vec![tag(3, "x5-g05", "X5 G05")])];
        let selection = select_make("pagani", &products, &bmw_categories());
        assert!(selection.resolved.matched.is_none());
        assert!(selection.products.is_empty());
    }

    #[test]
    fn test_blank_make_returns_nothing() {
        let products = vec![product(100, vec![tag(3, "x5-g05", "X5 G05")])];
        assert!(products_in_make("  ", &products, &bmw_categories()).is_empty());
    }

    #[test]
    fn test_existing_make_without_products_is_distinguishable() {
        let mut categories = bmw_categories();
        categories.push(cat(40, "porsche", "Porsche", 0));
        let products = vec![product(100, vec![tag(3, "x5-g05", "X5 G05")])];
        let selection = select_make("porsche", &products, &categories);
        assert!(selection.resolved.matched.is_some());
        assert!(selection.products.is_empty());
    }

    #[test]
    fn test_make_over_cyclic_categories() {
        let categories = vec![cat(1, "a", "A", 2), cat(2, "b", "B", 1)];
        let products = vec![product(1, vec![tag(2, "b", "B")])];
        assert_eq!(product_ids(&products_in_make("a", &products, &categories)), vec![1]);
    }
}
