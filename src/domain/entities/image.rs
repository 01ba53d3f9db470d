//! Image descriptor entity and its order-preserving de-duplicating set.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// One extracted image: a normalized source URL and its alt text.
///
/// Identity is the `(src, alt)` pair; the same URL with two different alt
/// texts counts as two descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub src: String,
    pub alt: String,
}

impl ImageDescriptor {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// Insertion-ordered set of descriptors with a hard cap.
///
/// Later duplicates are ignored and inserts beyond the cap are dropped, so the
/// output keeps first-seen order and never exceeds `max`.
#[derive(Debug)]
pub struct ImageSet {
    items: IndexSet<ImageDescriptor>,
    max: usize,
}

impl ImageSet {
    pub fn with_max(max: usize) -> Self {
        Self {
            items: IndexSet::with_capacity(max),
            max,
        }
    }

    /// Inserts a descriptor, returning `false` if it was a duplicate or the set is full.
    pub fn insert(&mut self, image: ImageDescriptor) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.insert(image)
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<ImageDescriptor> {
        self.items.into_iter().collect()
    }
}
