//! Shared-cache headers for the catalog API.

use std::time::Duration;

use axum::http::{HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;

/// `Cache-Control` value letting CDNs serve a response for `ttl` and keep
/// serving it stale for twice that while revalidating.
#[must_use]
pub fn cache_control_value(ttl: Duration) -> HeaderValue {
    let ttl = ttl.as_secs();
    let value = format!(
        "public, s-maxage={ttl}, stale-while-revalidate={}",
        ttl.saturating_mul(2)
    );
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("no-store"))
}

/// Adds [`cache_control_value`] to responses that did not set their own.
#[must_use]
pub fn cache_control_layer(ttl: Duration) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(header::CACHE_CONTROL, cache_control_value(ttl))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_doubles_ttl_for_stale_window() {
        assert_eq!(
            cache_control_value(Duration::from_secs(300)),
            "public, s-maxage=300, stale-while-revalidate=600"
        );
    }

    #[test]
    fn test_sub_second_ttl_rounds_down() {
        assert_eq!(
            cache_control_value(Duration::from_millis(500)),
            "public, s-maxage=0, stale-while-revalidate=0"
        );
    }
}
