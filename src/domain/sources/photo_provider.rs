//! Trait for the curated stock-photo leg.

use async_trait::async_trait;

use super::SourceError;
use crate::domain::entities::{CuratedPhoto, PlaceQuery};

/// The primary, authoritative photo source.
///
/// # Implementations
///
/// - [`crate::infrastructure::curated::PexelsClient`] - Pexels search API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoProvider: Send + Sync {
    /// Fetches and ranks photos for the query.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingApiKey`] before any network activity when
    /// no credential is configured, and a transport variant when the request fails.
    async fn photos(&self, query: &PlaceQuery) -> Result<Vec<CuratedPhoto>, SourceError>;
}
