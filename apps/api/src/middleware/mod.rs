//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. `TraceLayer` (request spans, latency, status)
//! 2. `CorsLayer` (browser access from the frontend origin)
//! 3. Extractors in [`auth`] (per-route token and role checks)

pub mod auth;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub use auth::{AdminUser, AuthUser};

/// Builds the CORS layer. `None` allows any origin.
pub fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let origin = match allow_origin.and_then(|o| HeaderValue::from_str(o).ok()) {
        Some(value) => AllowOrigin::exact(value),
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
