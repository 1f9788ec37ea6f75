//! Product records and category membership lookups.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ImageId, ProductId};
use super::price::parse_amount;

/// A category attached directly to a product.
///
/// Only the leaf categories a merchant ticked are listed; ancestors are not
/// implied and must be resolved through the category forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub slug: String,
    pub name: String,
}

/// Product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: ImageId,
    /// Image URL. May be empty when the upstream record is incomplete.
    pub src: String,
    /// Alt text for accessibility.
    pub alt: String,
}

/// A published product from the upstream store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Upstream-assigned unique ID.
    pub id: ProductId,
    /// URL slug.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Current price as a decimal string.
    pub price: String,
    /// Sale price as a decimal string, empty when not on sale.
    pub sale_price: String,
    /// Categories attached directly to this product, in upstream order.
    pub categories: Vec<CategoryRef>,
    /// Product images, in upstream order.
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Whether any attached category has one of the given IDs.
    #[must_use]
    pub fn in_any_category(&self, ids: &HashSet<CategoryId>) -> bool {
        self.categories.iter().any(|c| ids.contains(&c.id))
    }

    /// Whether any attached category has this slug, ignoring case.
    #[must_use]
    pub fn has_category_slug(&self, slug: &str) -> bool {
        let wanted = slug.to_lowercase();
        self.categories
            .iter()
            .any(|c| c.slug.to_lowercase() == wanted)
    }

    /// Price the customer pays: the sale price when set, otherwise the price.
    ///
    /// Returns `None` when neither value parses as a decimal.
    #[must_use]
    pub fn effective_price(&self) -> Option<Decimal> {
        parse_amount(&self.sale_price).or_else(|| parse_amount(&self.price))
    }

    /// First image with a usable URL.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images.iter().find(|i| !i.src.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: &str, sale_price: &str) -> Product {
        Product {
            id: ProductId::new(1),
            slug: "front-splitter".to_string(),
            name: "Front Splitter".to_string(),
            price: price.to_string(),
            sale_price: sale_price.to_string(),
            categories: vec![CategoryRef {
                id: CategoryId::new(3),
                slug: "X5-G05".to_string(),
                name: "X5 G05".to_string(),
            }],
            images: Vec::new(),
        }
    }

    #[test]
    fn test_effective_price_prefers_sale() {
        let p = product("100.00", "80.00");
        assert_eq!(p.effective_price(), Some(Decimal::new(8000, 2)));
    }

    #[test]
    fn test_effective_price_falls_back_to_price() {
        let p = product("100.00", "");
        assert_eq!(p.effective_price(), Some(Decimal::new(10000, 2)));
    }

    #[test]
    fn test_effective_price_unparseable() {
        assert_eq!(product("", "").effective_price(), None);
    }

    #[test]
    fn test_has_category_slug_ignores_case() {
        let p = product("1", "");
        assert!(p.has_category_slug("x5-g05"));
        assert!(!p.has_category_slug("x5"));
    }

    #[test]
    fn test_in_any_category() {
        let p = product("1", "");
        let ids: HashSet<_> = [CategoryId::new(3)].into_iter().collect();
        assert!(p.in_any_category(&ids));
        assert!(!p.in_any_category(&HashSet::new()));
    }

    #[test]
    fn test_primary_image_skips_blank_src() {
        let mut p = product("1", "");
        p.images = vec![
            ProductImage {
                id: ImageId::new(1),
                src: String::new(),
                alt: String::new(),
            },
            ProductImage {
                id: ImageId::new(2),
                src: "https://cdn.example/splitter.jpg".to_string(),
                alt: "Splitter".to_string(),
            },
        ];
        assert_eq!(p.primary_image().map(|i| i.id), Some(ImageId::new(2)));
    }
}
