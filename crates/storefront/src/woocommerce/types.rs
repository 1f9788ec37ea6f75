//! Wire types for the WooCommerce REST API (v3).
//!
//! Every field except `id` is optional on the wire. Missing values and
//! explicit `null`s both fall back to the type's default so that one sparse
//! record never poisons the page it arrived in.

use serde::{Deserialize, Deserializer};

/// Category as returned by `GET /wc/v3/products/categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct WooCategory {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: String,
    #[serde(default, deserialize_with = "nullable")]
    pub parent: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub count: i64,
}

/// Product as returned by `GET /wc/v3/products`.
///
/// Only the fields the catalog uses are decoded; everything else in the
/// (large) upstream record is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WooProduct {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sale_price: String,
    #[serde(default, deserialize_with = "nullable")]
    pub categories: Vec<WooCategoryRef>,
    #[serde(default, deserialize_with = "nullable")]
    pub images: Vec<WooImage>,
}

/// Category reference embedded in a product.
#[derive(Debug, Clone, Deserialize)]
pub struct WooCategoryRef {
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: String,
}

/// Image embedded in a product.
#[derive(Debug, Clone, Deserialize)]
pub struct WooImage {
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub src: String,
    #[serde(default, deserialize_with = "nullable")]
    pub alt: String,
}

/// Treat `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a decimal sent as a string or a bare number.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_defaults_missing_and_null_fields() {
        let category: WooCategory =
            serde_json::from_value(json!({ "id": 4, "name": null, "slug": "x5" })).unwrap();
        assert_eq!(category.id, 4);
        assert_eq!(category.name, "");
        assert_eq!(category.slug, "x5");
        assert_eq!(category.parent, 0);
        assert_eq!(category.count, 0);
    }

    #[test]
    fn test_category_without_id_is_rejected() {
        let result = serde_json::from_value::<WooCategory>(json!({ "slug": "bmw" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_product_null_categories_become_empty() {
        let product: WooProduct = serde_json::from_value(json!({
            "id": 9,
            "name": "Carbon Mirror Caps",
            "categories": null,
            "images": null
        }))
        .unwrap();
        assert!(product.categories.is_empty());
        assert!(product.images.is_empty());
        assert_eq!(product.price, "");
    }

    #[test]
    fn test_product_numeric_price_is_kept() {
        let product: WooProduct = serde_json::from_value(json!({
            "id": 9,
            "price": 149.5,
            "sale_price": "",
            "status": "publish",
            "permalink": "https://shop.example.com/product/caps"
        }))
        .unwrap();
        assert_eq!(product.price, "149.5");
        assert_eq!(product.sale_price, "");
    }
}
