//! Downloads scraped images and keeps the ones that look alike.

use async_trait::async_trait;
use image_hasher::{HashAlg, HasherConfig, ImageHash};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::selection::consensus_indices;
use crate::domain::entities::ImageDescriptor;
use crate::domain::sources::{ImageFilter, SourceError};

/// Perceptual-hash consensus filter.
///
/// Every image is downloaded and hashed with a DCT mean hash. The image
/// closest to all others (the medoid) stands for what the place looks like,
/// and pictures far away from it (logos, maps, menus, unrelated ads) are
/// dropped. See [`consensus_indices`] for the exact selection rule.
///
/// Images that cannot be downloaded or decoded are dropped as well. Downloads
/// run concurrently; decoding and hashing run on the blocking pool.
pub struct ConsensusFilter {
    http: reqwest::Client,
}

impl ConsensusFilter {
    /// Creates a filter downloading through `http`.
    ///
    /// Image CDNs behind the scraped site expect the same browser identity as
    /// the site itself, so `http` should come from
    /// [`crate::infrastructure::http::browser_client`].
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Hashes every image it can, returning `(position, hash)` in input order.
    async fn hash_all(&self, images: &[ImageDescriptor]) -> Vec<(usize, ImageHash)> {
        let mut tasks = JoinSet::new();
        for (index, image) in images.iter().enumerate() {
            let http = self.http.clone();
            let src = image.src.clone();
            tasks.spawn(async move { (index, fingerprint(&http, &src).await) });
        }

        let mut hashed = Vec::with_capacity(images.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(hash))) => hashed.push((index, hash)),
                Ok((index, Err(e))) => {
                    debug!(src = %images[index].src, error = %e, "Image left out of consensus");
                }
                Err(e) => warn!(error = %e, "Consensus hashing task failed"),
            }
        }

        hashed.sort_unstable_by_key(|(index, _)| *index);
        hashed
    }
}

#[async_trait]
impl ImageFilter for ConsensusFilter {
    async fn filter(&self, images: Vec<ImageDescriptor>) -> Vec<ImageDescriptor> {
        if images.is_empty() {
            return images;
        }

        let total = images.len();
        let hashed = self.hash_all(&images).await;
        let hashes: Vec<&ImageHash> = hashed.iter().map(|(_, hash)| hash).collect();
        let keep = consensus_indices(&distance_matrix(&hashes));

        let mut slots: Vec<Option<ImageDescriptor>> = images.into_iter().map(Some).collect();
        let kept: Vec<ImageDescriptor> = keep
            .into_iter()
            .filter_map(|k| slots[hashed[k].0].take())
            .collect();

        info!(
            total,
            hashed = hashed.len(),
            kept = kept.len(),
            "Consensus filter applied"
        );
        kept
    }
}

/// Downloads one image and computes its perceptual hash.
async fn fingerprint(http: &reqwest::Client, src: &str) -> Result<ImageHash, SourceError> {
    let bytes = http.get(src).send().await?.error_for_status()?.bytes().await?;

    tokio::task::spawn_blocking(move || perceptual_hash(&bytes))
        .await
        .map_err(|e| SourceError::Decode(e.to_string()))?
}

/// 64-bit DCT mean hash of an encoded image.
///
/// # Errors
///
/// Returns [`SourceError::Decode`] if the bytes are not a supported image format.
pub fn perceptual_hash(bytes: &[u8]) -> Result<ImageHash, SourceError> {
    let image = image::load_from_memory(bytes).map_err(|e| SourceError::Decode(e.to_string()))?;
    let hasher = HasherConfig::new()
        .hash_alg(HashAlg::Mean)
        .preproc_dct()
        .to_hasher();

    Ok(hasher.hash_image(&image))
}

/// Symmetric matrix of Hamming distances between hashes.
pub fn distance_matrix(hashes: &[&ImageHash]) -> Vec<Vec<u32>> {
    hashes
        .iter()
        .map(|a| hashes.iter().map(|b| a.dist(b)).collect())
        .collect()
}
