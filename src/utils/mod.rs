//! Utility functions shared by the scraping sources.
//!
//! - [`url_normalizer`] - URL resolution against a base and canonicalization

pub mod url_normalizer;
