//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. CORS (the demo UI may be served from another origin)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (add unique ID to each request)

pub mod request_id;

use tower_http::cors::{Any, CorsLayer};

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};

/// Allow any origin to call the JSON API.
///
/// There are no cookies or credentials to protect.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([axum::http::HeaderName::from_static(REQUEST_ID_HEADER)])
}
