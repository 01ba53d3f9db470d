//! Best-effort scraping of the travel site.
//!
//! - [`link_resolver`] - Picks the place page out of a search-results page
//! - [`image_extractor`] - Pulls CDN images out of the place page
//! - [`source`] - Runs both steps over HTTP as an [`crate::domain::sources::ImageSource`]

pub mod image_extractor;
pub mod link_resolver;
pub mod source;

pub use image_extractor::extract_images;
pub use link_resolver::{CandidateLink, LinkMatch, resolve_place_link};
pub use source::ScrapeSource;
