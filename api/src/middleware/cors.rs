use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// Build a CORS layer for the given browser origins.
///
/// Returns `None` when no origins are configured; the gateway is meant for
/// agents and server-side callers, so cross-origin access is opt-in.
pub fn build_cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();
    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([HeaderName::from_static("content-type")])
            .max_age(std::time::Duration::from_secs(3600)),
    )
}
