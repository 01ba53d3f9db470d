//! Curated stock-photo source.
//!
//! - [`client`] - Pexels search API client
//! - [`ranking`] - Resolution-based selection of the photos to show

pub mod client;
pub mod ranking;

pub use client::PexelsClient;
pub use ranking::{SELECTION_SIZE, select_photos};
