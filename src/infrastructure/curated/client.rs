//! Pexels search API client.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::info;

use super::ranking::select_photos;
use crate::domain::entities::{CuratedPhoto, PlaceQuery};
use crate::domain::sources::{PhotoProvider, SourceError};

/// Results requested per query; ranking happens client-side.
const PER_PAGE: &str = "50";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<CuratedPhoto>,
}

/// Curated photo provider backed by the Pexels API.
pub struct PexelsClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl PexelsClient {
    /// Creates a client for `api_url` (e.g. `https://api.pexels.com/v1`).
    ///
    /// A `None` key is accepted here so the service can start without it;
    /// every lookup then fails with [`SourceError::MissingApiKey`].
    pub fn new(http: reqwest::Client, api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetches one page of raw search results without ranking.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingApiKey`] without touching the network
    /// when no key is configured.
    pub async fn search(&self, query: &PlaceQuery) -> Result<Vec<CuratedPhoto>, SourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SourceError::MissingApiKey("pexels"))?;

        let response: SearchResponse = self
            .http
            .get(format!("{}/search", self.api_url))
            .header(AUTHORIZATION, api_key)
            .query(&[("query", query.as_str()), ("per_page", PER_PAGE)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.photos)
    }
}

#[async_trait]
impl PhotoProvider for PexelsClient {
    async fn photos(&self, query: &PlaceQuery) -> Result<Vec<CuratedPhoto>, SourceError> {
        let results = self.search(query).await?;
        let total = results.len();
        let selected = select_photos(results);

        info!(
            query = %query,
            total,
            selected = selected.len(),
            "Curated photo search complete"
        );
        Ok(selected)
    }
}
