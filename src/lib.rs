//! # Place Photos
//!
//! Representative photographs for a free-text place name, gathered from three
//! upstreams with independent failure handling.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Request-scoped entities and source traits
//! - **Application Layer** ([`application`]) - Retrieval orchestration and fallback chain
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP clients, scraping, upstream APIs
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Sources
//!
//! - **Curated** - Pexels search API, ranked by resolution (primary content)
//! - **Scrape** - TripAdvisor search page, then place page (best effort)
//! - **Encyclopedia** - Wikipedia article images, only when scraping finds nothing
//!
//! ## Quick Start
//!
//! ```bash
//! export PEXELS_API_KEY="..."
//! cargo run
//! curl 'http://localhost:3000/api/search?q=Eiffel%20Tower'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;
pub mod telemetry;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::RetrievalService;
    pub use crate::domain::entities::{
        CuratedPhoto, ImageDescriptor, PlaceQuery, RetrievalResult, SourceKind,
    };
    pub use crate::domain::sources::{ImageSource, PhotoProvider, SourceError};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
