//! Resolution-based photo selection.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::domain::entities::CuratedPhoto;

/// Number of curated photos returned per query.
pub const SELECTION_SIZE: usize = 5;

/// Selects [`SELECTION_SIZE`] photos, preferring large ones.
///
/// # Policy
///
/// 1. Keep photos that are at least 2000×1200 ([`CuratedPhoto::is_large`])
/// 2. Order them by area, largest first
/// 3. If there are enough, return the top ones
/// 4. Otherwise backfill with the remaining photos, also largest first
///
/// Sorting is stable, so photos with equal area keep the API order. A photo
/// already taken as large is not repeated by the backfill. The result has
/// exactly [`SELECTION_SIZE`] photos whenever the input has at least that many.
pub fn select_photos(photos: Vec<CuratedPhoto>) -> Vec<CuratedPhoto> {
    let mut selected: Vec<CuratedPhoto> =
        photos.iter().filter(|p| p.is_large()).cloned().collect();
    selected.sort_by_key(|p| Reverse(p.area()));

    if selected.len() >= SELECTION_SIZE {
        selected.truncate(SELECTION_SIZE);
        return selected;
    }

    let taken: HashSet<u64> = selected.iter().map(|p| p.id).collect();
    let mut backfill: Vec<CuratedPhoto> = photos
        .into_iter()
        .filter(|p| !taken.contains(&p.id))
        .collect();
    backfill.sort_by_key(|p| Reverse(p.area()));

    selected.extend(backfill);
    selected.truncate(SELECTION_SIZE);
    selected
}
