//! Curated photo entity.

use serde::{Deserialize, Serialize};

/// A stock photo returned by the curated photo API.
///
/// Field names follow the upstream JSON so the same struct is used for
/// decoding the API response and for our own responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedPhoto {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub url: String,
    #[serde(default)]
    pub photographer: String,
    #[serde(default)]
    pub photographer_url: String,
    pub src: PhotoSources,
}

/// Size variants of a curated photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSources {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub large2x: String,
    #[serde(default)]
    pub medium: String,
}

impl CuratedPhoto {
    /// Minimum width for a photo to count as large.
    pub const LARGE_MIN_WIDTH: u32 = 2000;
    /// Minimum height for a photo to count as large.
    pub const LARGE_MIN_HEIGHT: u32 = 1200;

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_large(&self) -> bool {
        self.width >= Self::LARGE_MIN_WIDTH && self.height >= Self::LARGE_MIN_HEIGHT
    }

    /// Best display URL, preferring the 2x variant.
    pub fn display_src(&self) -> &str {
        [
            &self.src.large2x,
            &self.src.large,
            &self.src.medium,
            &self.src.original,
        ]
        .into_iter()
        .find(|s| !s.is_empty())
        .map(String::as_str)
        .unwrap_or(&self.url)
    }
}
