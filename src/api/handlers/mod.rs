//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one endpoint.

pub mod health;
pub mod images;
pub mod photos;
pub mod search;

pub use health::health_handler;
pub use images::images_handler;
pub use photos::photos_handler;
pub use search::search_handler;
