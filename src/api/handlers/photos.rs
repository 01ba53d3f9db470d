//! Handler for the curated photo endpoint.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::images::{PhotosResponse, PlaceParams};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the five best curated photos for a place.
///
/// # Endpoint
///
/// `GET /api/photos?q=<place>`
///
/// Photos of at least 2000×1200 are preferred, largest first; smaller ones
/// only fill the remaining slots.
///
/// # Errors
///
/// - **400 Bad Request**: `q` missing or blank
/// - **500 Internal Server Error** (`configuration_error`): no API key configured
/// - **502 Bad Gateway**: the photo API failed or timed out
pub async fn photos_handler(
    State(state): State<AppState>,
    params: Result<Query<PlaceParams>, QueryRejection>,
) -> Result<Json<PhotosResponse>, AppError> {
    let Query(params) = params?;
    let (query, _) = params.into_query(state.retrieval.default_max())?;

    let photos = state.retrieval.curated_photos(&query).await?;

    Ok(Json(PhotosResponse {
        query: query.as_str().to_string(),
        count: photos.len(),
        photos,
    }))
}
