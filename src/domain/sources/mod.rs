//! Source trait definitions for the domain layer.
//!
//! These traits abstract the upstream services images come from. Concrete
//! HTTP-backed implementations live in `crate::infrastructure`.
//!
//! # Available Sources
//!
//! - [`ImageSource`] - One strategy of the scrape/encyclopedia fallback chain
//! - [`PhotoProvider`] - The curated stock-photo leg
//! - [`ImageFilter`] - Optional post-filter over the chain result
//!
//! # Failure Policy
//!
//! `ImageSource` implementations absorb their own failures and report an
//! empty list, so the chain can move on to the next strategy.
//! `PhotoProvider` failures are returned as [`SourceError`] and reach the caller.
//!
//! # Testing
//!
//! Mock implementations are generated with `mockall` for unit tests.

pub mod error;
pub mod image_filter;
pub mod image_source;
pub mod photo_provider;

pub use error::SourceError;
pub use image_filter::ImageFilter;
pub use image_source::ImageSource;
pub use photo_provider::PhotoProvider;

#[cfg(test)]
pub use image_filter::MockImageFilter;
#[cfg(test)]
pub use image_source::MockImageSource;
#[cfg(test)]
pub use photo_provider::MockPhotoProvider;
