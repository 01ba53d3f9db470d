//! Handler for the combined retrieval endpoint.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::images::PlaceParams;
use crate::domain::entities::RetrievalResult;
use crate::error::AppError;
use crate::state::AppState;

/// Runs the curated leg and the fallback chain concurrently.
///
/// # Endpoint
///
/// `GET /api/search?q=<place>&max=<n>&consensus=<bool>`
///
/// `consensus` applies to the scraped images only, as on `/api/images`.
///
/// # Response
///
/// ```json
/// {
///   "query": "Eiffel Tower",
///   "curated": [ { "id": 338515, "width": 4000, "height": 6000, "...": "..." } ],
///   "scraped": [ { "src": "https://upload.wikimedia.org/...jpg", "alt": "Eiffel Tower (Wikipedia)" } ],
///   "scraped_source": "encyclopedia"
/// }
/// ```
///
/// # Errors
///
/// Same as [`super::photos_handler`]: the curated leg is the primary content,
/// so its failure fails the request. Scrape and Wikipedia failures never do.
pub async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<PlaceParams>, QueryRejection>,
) -> Result<Json<RetrievalResult>, AppError> {
    let Query(params) = params?;
    let consensus = params.consensus;
    let (query, max) = params.into_query(state.retrieval.default_max())?;

    let result = state
        .retrieval
        .resolve_with(&query, max, consensus)
        .await?;

    Ok(Json(result))
}
