//! API route configuration.

use crate::api::handlers::{images_handler, photos_handler, search_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Retrieval routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET /images` - Scraped images with Wikipedia fallback
/// - `GET /photos` - Ranked curated photos
/// - `GET /search` - Both legs combined
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/images", get(images_handler))
        .route("/photos", get(photos_handler))
        .route("/search", get(search_handler))
}
