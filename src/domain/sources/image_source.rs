//! Trait for one strategy of the scraped-image fallback chain.

use async_trait::async_trait;

use crate::domain::entities::{ImageDescriptor, PlaceQuery, SourceKind};

/// A best-effort image source.
///
/// Implementations never fail: transport and parse problems are logged and
/// reported as an empty list, which tells the chain to try the next source.
///
/// # Implementations
///
/// - [`crate::infrastructure::scrape::ScrapeSource`] - Travel site HTML scraping
/// - [`crate::infrastructure::encyclopedia::EncyclopediaSource`] - Wikipedia API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Provenance tag reported when this source wins the chain.
    fn kind(&self) -> SourceKind;

    /// Returns at most `max` de-duplicated images for the query.
    async fn images(&self, query: &PlaceQuery, max: usize) -> Vec<ImageDescriptor>;
}
