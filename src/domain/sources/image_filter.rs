//! Trait for post-filters applied to the winning chain result.

use async_trait::async_trait;

use crate::domain::entities::ImageDescriptor;

/// Narrows a scraped image list down to the images worth showing.
///
/// Like [`super::ImageSource`], a filter never fails. Images it cannot judge
/// are dropped and the survivors keep their relative order.
///
/// # Implementations
///
/// - [`crate::infrastructure::consensus::ConsensusFilter`] - Perceptual-hash outlier removal
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageFilter: Send + Sync {
    async fn filter(&self, images: Vec<ImageDescriptor>) -> Vec<ImageDescriptor>;
}
