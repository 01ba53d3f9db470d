//! Scraped image source: search page, then place page.

use async_trait::async_trait;
use reqwest::header::REFERER;
use tracing::{info, warn};
use url::Url;

use super::image_extractor::extract_images;
use super::link_resolver::resolve_place_link;
use crate::domain::entities::{ImageDescriptor, PlaceQuery, SourceKind};
use crate::domain::sources::{ImageSource, SourceError};

const SEARCH_PATH: &str = "/Search";

/// Scrapes place photos from the travel site.
///
/// The two requests are strictly sequential: the place page URL comes out of
/// the search page. Any failure along the way ends the attempt with an empty
/// list; nothing is retried.
pub struct ScrapeSource {
    http: reqwest::Client,
    base_url: Url,
}

impl ScrapeSource {
    /// Creates a source scraping `base_url`.
    ///
    /// `http` should be a client built with
    /// [`crate::infrastructure::http::browser_client`]; the site rejects
    /// requests without a browser identity.
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// URL of the site search page for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidUrl`] if the configured base cannot be joined.
    pub fn search_url(&self, query: &PlaceQuery) -> Result<Url, SourceError> {
        let mut url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("q", query.as_str());
        Ok(url)
    }

    /// Runs the scrape and reports failures instead of absorbing them.
    ///
    /// An empty list with `Ok` means the site answered but had no usable
    /// link or images.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on timeouts, network errors and non-2xx statuses.
    pub async fn try_images(
        &self,
        query: &PlaceQuery,
        max: usize,
    ) -> Result<Vec<ImageDescriptor>, SourceError> {
        let search_url = self.search_url(query)?;
        let search_html = self.fetch_html(&search_url, None).await?;

        let Some(candidate) = resolve_place_link(&search_html, query, &self.base_url) else {
            info!(query = %query, "Scrape found no place link");
            return Ok(Vec::new());
        };

        let place_html = self.fetch_html(&candidate.url, Some(&search_url)).await?;
        Ok(extract_images(&place_html, max))
    }

    async fn fetch_html(&self, url: &Url, referer: Option<&Url>) -> Result<String, SourceError> {
        let mut request = self.http.get(url.clone());
        if let Some(referer) = referer {
            request = request.header(REFERER, referer.as_str());
        }

        let body = request.send().await?.error_for_status()?.text().await?;
        Ok(body)
    }
}

#[async_trait]
impl ImageSource for ScrapeSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Scrape
    }

    async fn images(&self, query: &PlaceQuery, max: usize) -> Vec<ImageDescriptor> {
        match self.try_images(query, max).await {
            Ok(images) => {
                info!(query = %query, count = images.len(), "Scrape complete");
                images
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Scrape failed, treating as empty");
                Vec::new()
            }
        }
    }
}
