//! Medoid-based outlier selection over a pairwise distance matrix.
//!
//! Works on plain Hamming distances so it can be tested without decoding
//! any images.

/// Percentile of distances to the medoid that an image may sit at and still be kept.
const KEEP_PERCENTILE: f64 = 0.85;

/// Share of hashed images that survives even when the threshold is strict.
const MIN_KEEP_SHARE: f64 = 0.7;

/// Absolute floor for the number of survivors.
const MIN_KEEP: usize = 3;

/// Lists of this size or smaller are returned untouched.
const MIN_CONSENSUS_SIZE: usize = 2;

/// Returns the indices of the images that agree with the visual consensus.
///
/// `distances` is a symmetric `n x n` matrix with a zero diagonal. The medoid
/// is the image with the smallest total distance to all others (the first one
/// on ties). Images whose distance to the medoid is at or below the 85th
/// percentile of all distances to the medoid are kept in their original order.
/// When fewer than `max(floor(0.7 * n), 3)` images pass, the closest ones to
/// the medoid are taken instead, nearest first.
pub fn consensus_indices(distances: &[Vec<u32>]) -> Vec<usize> {
    let n = distances.len();
    if n <= MIN_CONSENSUS_SIZE {
        return (0..n).collect();
    }

    let Some(center) = medoid(distances) else {
        return (0..n).collect();
    };
    let to_center = &distances[center];

    let threshold = percentile(to_center, KEEP_PERCENTILE);
    let kept: Vec<usize> = (0..n)
        .filter(|&i| f64::from(to_center[i]) <= threshold)
        .collect();

    let min_keep = min_keep(n);
    if kept.len() >= min_keep {
        return kept;
    }

    let mut by_distance: Vec<usize> = (0..n).collect();
    by_distance.sort_by_key(|&i| to_center[i]);
    by_distance.truncate(min_keep);
    by_distance
}

/// Index of the row with the smallest sum, which is also the smallest mean.
pub fn medoid(distances: &[Vec<u32>]) -> Option<usize> {
    distances
        .iter()
        .map(|row| row.iter().map(|&d| u64::from(d)).sum::<u64>())
        .enumerate()
        .min_by_key(|&(_, total)| total)
        .map(|(i, _)| i)
}

/// Percentile with linear interpolation between the two nearest ranks.
///
/// `q` is in `0.0..=1.0`. An empty slice yields `0.0`.
pub fn percentile(values: &[u32], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let low = f64::from(sorted[lower]);
    let high = f64::from(sorted[upper]);

    low + (high - low) * (rank - lower as f64)
}

fn min_keep(n: usize) -> usize {
    ((MIN_KEEP_SHARE * n as f64) as usize).max(MIN_KEEP)
}
