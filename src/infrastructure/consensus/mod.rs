//! Visual consensus filtering for scraped images.
//!
//! - [`selection`] - Medoid and percentile rule over Hamming distances
//! - [`filter`] - Download, hash and apply the rule

pub mod filter;
pub mod selection;

pub use filter::ConsensusFilter;
