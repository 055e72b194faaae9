//! Face Counters

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Per-trace intersection counts indexed by registry face index. Workers
/// each fill their own partial counters which are merged after a stage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceCounters {
    counts: Vec<u64>,
}

impl FaceCounters {
    /// Create zeroed counters for `n` faces.
    ///
    /// * `n` - Number of faces in the registry.
    pub fn new(n: usize) -> Self {
        Self { counts: vec![0; n] }
    }

    /// Returns the number of faces tracked.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no faces are tracked.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count one intersection on `face`. Unknown faces are ignored.
    ///
    /// * `face` - Registry index.
    pub fn increment(&mut self, face: usize) {
        if let Some(c) = self.counts.get_mut(face) {
            *c += 1;
        }
    }

    /// Returns the count for `face`, zero if unknown.
    ///
    /// * `face` - Registry index.
    pub fn get(&self, face: usize) -> u64 {
        self.counts.get(face).copied().unwrap_or(0)
    }

    /// Returns the total count over all faces.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Returns an iterator over `(face, count)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().copied().enumerate()
    }
}

impl AddAssign<&FaceCounters> for FaceCounters {
    /// Merge partial counts.
    ///
    /// * `other` - Partial counts from a worker.
    fn add_assign(&mut self, other: &FaceCounters) {
        if self.counts.len() < other.counts.len() {
            self.counts.resize(other.counts.len(), 0);
        }
        for (c, o) in self.counts.iter_mut().zip(&other.counts) {
            *c += o;
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
