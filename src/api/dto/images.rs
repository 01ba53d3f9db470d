//! DTOs for the image retrieval endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::{CuratedPhoto, ImageDescriptor, PlaceQuery, SourceKind};
use crate::error::AppError;

/// Upper bound accepted for the `max` parameter.
pub const MAX_IMAGES_LIMIT: usize = 50;

/// Query string shared by `/api/images`, `/api/photos` and `/api/search`.
///
/// `q` is optional at the deserialization level so a missing parameter
/// produces the same validation error body as a blank one.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct PlaceParams {
    #[serde(default)]
    #[validate(length(max = 200, message = "Query must be at most 200 characters"))]
    pub q: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 50, message = "max must be between 1 and 50"))]
    pub max: Option<usize>,

    /// Per-request switch for the visual consensus filter.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub consensus: Option<bool>,
}

impl PlaceParams {
    /// Validates the parameters and returns the query with the effective image cap.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `q` is missing or blank, or `max` is out of range.
    pub fn into_query(self, default_max: usize) -> Result<(PlaceQuery, usize), AppError> {
        self.validate()?;
        let query = PlaceQuery::parse(self.q.as_deref().unwrap_or_default())?;
        Ok((query, self.max.unwrap_or(default_max)))
    }
}

/// Response of `GET /api/images`.
#[derive(Debug, Serialize)]
pub struct ImagesResponse {
    pub query: String,
    pub source: SourceKind,
    pub count: usize,
    pub images: Vec<ImageDescriptor>,
}

/// Response of `GET /api/photos`.
#[derive(Debug, Serialize)]
pub struct PhotosResponse {
    pub query: String,
    pub count: usize,
    pub photos: Vec<CuratedPhoto>,
}
