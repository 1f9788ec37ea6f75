//! Product API handlers.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use marque_core::{CategoryId, MatchTier, Product, ResolvedMake};
use serde::{Deserialize, Serialize};

use crate::catalog::{DEFAULT_FEATURED_LIMIT, FeaturedProduct};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    pub mode: Option<String>,
    pub category_slug: Option<String>,
}

/// Which products to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMode {
    All,
    Make,
    Category,
}

impl ListMode {
    /// Unknown or missing modes list everything.
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(mode) if mode.eq_ignore_ascii_case("make") => Self::Make,
            Some(mode) if mode.eq_ignore_ascii_case("category") => Self::Category,
            _ => Self::All,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Make => "make",
            Self::Category => "category",
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductList<'a> {
    products: &'a [Product],
    count: usize,
    mode: ListMode,
    category_slug: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    make: Option<MakeResolution>,
}

/// How `mode=make` resolved its input.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MakeResolution {
    matched: Option<MatchedMake>,
    tier: Option<MatchTier>,
    /// Sorted for stable output.
    category_ids: Vec<CategoryId>,
}

#[derive(Debug, Serialize)]
struct MatchedMake {
    id: CategoryId,
    slug: String,
    name: String,
}

impl From<&ResolvedMake> for MakeResolution {
    fn from(resolved: &ResolvedMake) -> Self {
        let mut category_ids: Vec<_> = resolved.category_ids().into_iter().collect();
        category_ids.sort_unstable();

        Self {
            matched: resolved.matched.as_ref().map(|c| MatchedMake {
                id: c.id,
                slug: c.slug.clone(),
                name: c.name.clone(),
            }),
            tier: resolved.tier,
            category_ids,
        }
    }
}

/// List products: everything, one make (with descendants) or one category.
///
/// `GET /api/products?mode=all|make|category&categorySlug=...`
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Response> {
    let mode = ListMode::parse(query.mode.as_deref());
    let slug = query
        .category_slug
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let response = match mode {
        ListMode::All => {
            let products = state.catalog().products().await;
            list_response(&products, mode, slug, None)
        }
        ListMode::Category => {
            let slug = require_slug(slug, mode)?;
            let products = state.catalog().products_by_category_slug(slug).await;
            list_response(&products, mode, Some(slug), None)
        }
        ListMode::Make => {
            let slug = require_slug(slug, mode)?;
            let selection = state.catalog().select_make(slug).await;
            tracing::info!(
                make = slug,
                count = selection.products.len(),
                matched = selection.resolved.matched.is_some(),
                "Listed make"
            );
            list_response(
                &selection.products,
                mode,
                Some(slug),
                Some(MakeResolution::from(&selection.resolved)),
            )
        }
    };

    Ok(response)
}

/// Random products with images for the homepage carousel.
///
/// `GET /api/products/featured`
pub async fn featured(State(state): State<AppState>) -> Json<Vec<FeaturedProduct>> {
    Json(state.catalog().featured_products(DEFAULT_FEATURED_LIMIT).await)
}

fn require_slug(slug: Option<&str>, mode: ListMode) -> Result<&str> {
    slug.ok_or_else(|| {
        AppError::BadRequest(format!("categorySlug is required for mode={}", mode.as_str()))
    })
}

fn list_response(
    products: &[Product],
    mode: ListMode,
    category_slug: Option<&str>,
    make: Option<MakeResolution>,
) -> Response {
    Json(ProductList {
        products,
        count: products.len(),
        mode,
        category_slug,
        make,
    })
    .into_response()
}
