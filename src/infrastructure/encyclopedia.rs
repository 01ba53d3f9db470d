//! Wikipedia fallback source.
//!
//! Used when scraping yields nothing. Two MediaWiki API calls: a full-text
//! search for the best-matching article, then the images embedded in it.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use crate::domain::entities::{ImageDescriptor, ImageSet, PlaceQuery, SourceKind};
use crate::domain::sources::{ImageSource, SourceError};

/// Upper bound on images requested for the resolved article.
const IMAGE_LIMIT: &str = "50";

/// Raster formats worth showing; SVG icons, maps and logos are excluded.
const RASTER_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    query: Option<ImagesQuery>,
}

/// Pages keyed by page id, kept in response order.
#[derive(Debug, Deserialize)]
struct ImagesQuery {
    #[serde(default)]
    pages: IndexMap<String, ImagePage>,
}

#[derive(Debug, Deserialize)]
struct ImagePage {
    #[serde(default)]
    imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    #[serde(default)]
    url: Option<String>,
}

/// Image source backed by the MediaWiki action API.
pub struct EncyclopediaSource {
    http: reqwest::Client,
    api_url: Url,
}

impl EncyclopediaSource {
    pub fn new(http: reqwest::Client, api_url: Url) -> Self {
        Self { http, api_url }
    }

    /// Runs both API calls and reports failures instead of absorbing them.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on timeouts, network errors, non-2xx statuses
    /// and malformed JSON.
    pub async fn try_images(
        &self,
        query: &PlaceQuery,
        max: usize,
    ) -> Result<Vec<ImageDescriptor>, SourceError> {
        let Some(title) = self.search_title(query).await? else {
            info!(query = %query, "Wikipedia search returned no results");
            return Ok(Vec::new());
        };

        let urls = self.image_urls(&title).await?;
        let alt = format!("{title} (Wikipedia)");

        let mut images = ImageSet::with_max(max);
        for url in urls.into_iter().filter(|u| has_raster_extension(u)) {
            if images.is_full() {
                break;
            }
            images.insert(ImageDescriptor::new(url, alt.as_str()));
        }

        Ok(images.into_vec())
    }

    async fn search_title(&self, query: &PlaceQuery) -> Result<Option<String>, SourceError> {
        let params = [
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query.as_str()),
            ("srlimit", "1"),
            ("format", "json"),
        ];

        let response: SearchResponse = self.get_json(&params).await?;
        Ok(response
            .query
            .and_then(|q| q.search.into_iter().next())
            .map(|hit| hit.title))
    }

    async fn image_urls(&self, title: &str) -> Result<Vec<String>, SourceError> {
        let params = [
            ("action", "query"),
            ("titles", title),
            ("generator", "images"),
            ("gimlimit", IMAGE_LIMIT),
            ("prop", "imageinfo"),
            ("iiprop", "url|mime"),
            ("format", "json"),
        ];

        let response: ImagesResponse = self.get_json(&params).await?;
        let urls = response
            .query
            .map(|q| q.pages)
            .unwrap_or_default()
            .into_values()
            .filter_map(|page| page.imageinfo.into_iter().next())
            .filter_map(|info| info.url)
            .collect();

        Ok(urls)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, SourceError> {
        let body = self
            .http
            .get(self.api_url.clone())
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await?;
        Ok(body)
    }
}

#[async_trait]
impl ImageSource for EncyclopediaSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Encyclopedia
    }

    async fn images(&self, query: &PlaceQuery, max: usize) -> Vec<ImageDescriptor> {
        match self.try_images(query, max).await {
            Ok(images) => {
                info!(query = %query, count = images.len(), "Wikipedia lookup complete");
                images
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Wikipedia lookup failed, treating as empty");
                Vec::new()
            }
        }
    }
}

/// True when the URL path ends in a JPEG or PNG extension, case-insensitively.
fn has_raster_extension(file_url: &str) -> bool {
    let path = Url::parse(file_url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| file_url.to_string());

    path.rsplit_once('.')
        .map(|(_, ext)| {
            RASTER_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
