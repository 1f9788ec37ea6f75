//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction per route)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Cache-Control on `/api` routes

pub mod cache_control;
pub mod request_id;

pub use cache_control::cache_control_layer;
pub use request_id::request_id_middleware;
