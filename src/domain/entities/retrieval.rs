//! Retrieval result entity.

use serde::Serialize;

use super::{CuratedPhoto, ImageDescriptor, PlaceQuery};

/// Which strategy of the fallback chain produced the scraped images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Scrape,
    Encyclopedia,
    None,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Scrape => "scrape",
            SourceKind::Encyclopedia => "encyclopedia",
            SourceKind::None => "none",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combined output of one retrieval.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalResult {
    pub query: String,
    pub curated: Vec<CuratedPhoto>,
    pub scraped: Vec<ImageDescriptor>,
    pub scraped_source: SourceKind,
}

impl RetrievalResult {
    pub fn new(
        query: &PlaceQuery,
        curated: Vec<CuratedPhoto>,
        scraped: Vec<ImageDescriptor>,
        scraped_source: SourceKind,
    ) -> Self {
        Self {
            query: query.as_str().to_string(),
            curated,
            scraped,
            scraped_source,
        }
    }
}
