//! Infrastructure layer for upstream integrations.
//!
//! This layer implements the source traits defined by the domain layer on top
//! of `reqwest`, `scraper` and the upstream JSON APIs.
//!
//! # Modules
//!
//! - [`http`] - Shared HTTP client construction (timeouts, browser header set)
//! - [`scrape`] - Travel site scraping: link resolution, image extraction, source
//! - [`encyclopedia`] - Wikipedia API fallback source
//! - [`curated`] - Pexels client and resolution-based ranking
//! - [`consensus`] - Perceptual-hash filter that drops visual outliers

pub mod consensus;
pub mod curated;
pub mod encyclopedia;
pub mod http;
pub mod scrape;
