//! Domain layer containing the retrieval data model and source contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Request-scoped data structures (queries, images, photos, results)
//! - [`sources`] - Trait definitions implemented by the infrastructure layer
//!
//! # Design Principles
//!
//! - Nothing here performs I/O or knows about HTTP
//! - Source traits are the seams the application layer depends on
//! - Every entity lives for a single request; nothing is persisted
//!
//! # Retrieval Flow
//!
//! 1. HTTP handler parses a [`entities::PlaceQuery`]
//! 2. [`crate::application::services::RetrievalService`] fans out to the curated
//!    [`sources::PhotoProvider`] and the ordered [`sources::ImageSource`] chain
//! 3. A [`entities::RetrievalResult`] is assembled and handed back

pub mod entities;
pub mod sources;
