//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Catalog API (Cache-Control: public, s-maxage=<ttl>)
//! GET  /api/products           - Products (?mode=all|make|category&categorySlug=)
//! GET  /api/products/featured  - Random products with images
//! GET  /api/categories         - Nested category tree
//! GET  /api/makes              - Per-make totals
//! ```

pub mod api;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::from_fn,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::middleware::{cache_control_layer, request_id_middleware};
use crate::state::AppState;

/// Create the catalog API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(api::products::index))
        .route("/products/featured", get(api::products::featured))
        .route("/categories", get(api::categories::tree))
        .route("/makes", get(api::categories::makes))
}

/// Create all routes for the storefront.
pub fn routes(state: &AppState) -> Router<AppState> {
    let cache_ttl = state.config().catalog.cache_ttl;

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes().layer(cache_control_layer(cache_ttl)))
}

/// Build the application with its per-request middleware.
///
/// Sentry layers are added by the binary, outside of this.
pub fn app(state: AppState) -> Router {
    routes(&state)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = Empty
            )
        }))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the upstream store.
async fn health() -> &'static str {
    "ok"
}
