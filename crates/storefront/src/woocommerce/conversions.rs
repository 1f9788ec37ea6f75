//! Conversions from WooCommerce wire types to catalog types.

use marque_core::{
    Category, CategoryId, CategoryRef, ImageId, Product, ProductId, ProductImage,
};

use super::types::{WooCategory, WooCategoryRef, WooImage, WooProduct};

/// Convert a wire category into a catalog category.
pub fn convert_category(raw: WooCategory) -> Category {
    Category {
        id: CategoryId::new(raw.id),
        slug: raw.slug,
        name: raw.name,
        parent: CategoryId::new(raw.parent),
        count: raw.count,
    }
}

/// Convert a wire product into a catalog product.
pub fn convert_product(raw: WooProduct) -> Product {
    Product {
        id: ProductId::new(raw.id),
        slug: raw.slug,
        name: raw.name,
        price: raw.price,
        sale_price: raw.sale_price,
        categories: raw.categories.into_iter().map(convert_category_ref).collect(),
        images: raw.images.into_iter().map(convert_image).collect(),
    }
}

fn convert_category_ref(raw: WooCategoryRef) -> CategoryRef {
    CategoryRef {
        id: CategoryId::new(raw.id),
        slug: raw.slug,
        name: raw.name,
    }
}

fn convert_image(raw: WooImage) -> ProductImage {
    ProductImage {
        id: ImageId::new(raw.id),
        src: raw.src,
        alt: raw.alt,
    }
}
