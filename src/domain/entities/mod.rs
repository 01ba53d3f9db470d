//! Core domain entities representing the retrieval data model.
//!
//! All entities are request-scoped: they are built for one place query and
//! discarded once the response has been written.
//!
//! # Entity Types
//!
//! - [`PlaceQuery`] - A validated, trimmed place name
//! - [`ImageDescriptor`] - A normalized `(src, alt)` pair from a scraped or encyclopedic source
//! - [`CuratedPhoto`] - A stock photo with dimensions and attribution
//! - [`RetrievalResult`] - The combined output of one retrieval

pub mod image;
pub mod photo;
pub mod query;
pub mod retrieval;

pub use image::{ImageDescriptor, ImageSet};
pub use photo::{CuratedPhoto, PhotoSources};
pub use query::PlaceQuery;
pub use retrieval::{RetrievalResult, SourceKind};
