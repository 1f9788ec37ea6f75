//! Category API handlers.

use axum::{Json, extract::State};
use marque_core::{CategoryNode, MakeSummary};

use crate::state::AppState;

/// The nested category forest.
///
/// `GET /api/categories`
pub async fn tree(State(state): State<AppState>) -> Json<Vec<CategoryNode>> {
    Json(state.catalog().category_tree().await)
}

/// Per-make category and product totals.
///
/// `GET /api/makes`
pub async fn makes(State(state): State<AppState>) -> Json<Vec<MakeSummary>> {
    Json(state.catalog().make_overview().await)
}
