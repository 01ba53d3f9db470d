//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`        - Configuration health check (public, not rate limited)
//! - `GET /api/images`    - Scraped images with Wikipedia fallback
//! - `GET /api/photos`    - Ranked curated photos
//! - `GET /api/search`    - Both legs combined
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Panic recovery** - A panicking handler answers `500 internal_error`
//! - **Rate limiting** - Per-IP token bucket on `/api/*`, when configured
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::RateLimitLayer;
use crate::api::middleware::{catch_panic, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - limiter for `/api/*`; when present the server must be
///   started with connect info
pub fn app_router(state: AppState, rate_limit: Option<RateLimitLayer>) -> NormalizePath<Router> {
    let mut api_router = api::routes::routes();
    if let Some(limiter) = rate_limit {
        api_router = api_router.layer(limiter);
    }

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(catch_panic::layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
