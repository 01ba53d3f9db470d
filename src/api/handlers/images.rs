//! Handler for the scraped image endpoint.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::images::{ImagesResponse, PlaceParams};
use crate::error::AppError;
use crate::state::AppState;

/// Returns scraped images for a place, falling back to Wikipedia.
///
/// # Endpoint
///
/// `GET /api/images?q=<place>&max=<n>&consensus=<bool>`
///
/// # Fallback Chain
///
/// 1. Travel site scrape (search page, then place page)
/// 2. Wikipedia article images, only if the scrape found nothing
///
/// Failures of either source are logged and treated as "no images"; this
/// endpoint never fails because an upstream is down.
///
/// `consensus=true` downloads the winning images and drops visual outliers;
/// `consensus=false` skips that even when `CONSENSUS_FILTER` is on.
///
/// # Response
///
/// ```json
/// {
///   "query": "Eiffel Tower",
///   "source": "scrape",
///   "count": 1,
///   "images": [
///     { "src": "https://dynamic-media-cdn.tripadvisor.com/media/photo-o/...jpg", "alt": "Eiffel Tower" }
///   ]
/// }
/// ```
///
/// `source` is `scrape`, `encyclopedia` or `none`.
///
/// # Errors
///
/// Returns 400 Bad Request if `q` is missing or blank, or `max` is not an
/// integer in 1..=50, or `consensus` is not `true`/`false`.
pub async fn images_handler(
    State(state): State<AppState>,
    params: Result<Query<PlaceParams>, QueryRejection>,
) -> Result<Json<ImagesResponse>, AppError> {
    let Query(params) = params?;
    let consensus = params.consensus;
    let (query, max) = params.into_query(state.retrieval.default_max())?;

    let (images, source) = state
        .retrieval
        .scraped_images_with(&query, max, consensus)
        .await;

    Ok(Json(ImagesResponse {
        query: query.as_str().to_string(),
        source,
        count: images.len(),
        images,
    }))
}
