//! Traced Rays

use super::RayCollection;
use serde::{Deserialize, Serialize};

/// All generations of a single source's trace, stored in order. A batch's
/// `parent` is the index of the previous generation in this arena.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TracedRays {
    /// Name of the ray source that seeded the trace.
    pub source: String,

    /// Generations in trace order; the first is the seed batch.
    generations: Vec<RayCollection>,

    /// True if the trace stopped at the recursion limit with rays still live.
    pub truncated: bool,
}

impl TracedRays {
    /// Create a new, empty trace result.
    ///
    /// * `source` - Name of the ray source.
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            generations: vec![],
            truncated: false,
        }
    }

    /// Append a generation and return its index.
    ///
    /// * `batch` - The generation.
    pub fn push(&mut self, batch: RayCollection) -> usize {
        self.generations.push(batch);
        self.generations.len() - 1
    }

    /// Returns the number of generations.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Returns true if no generations were recorded.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Returns the generations in trace order.
    pub fn generations(&self) -> &[RayCollection] {
        &self.generations
    }

    /// Returns generation `gen`.
    ///
    /// * `gen` - Generation index.
    pub fn get(&self, gen: usize) -> Option<&RayCollection> {
        self.generations.get(gen)
    }

    /// Returns the batch that spawned generation `gen`.
    ///
    /// * `gen` - Generation index.
    pub fn parent_of(&self, gen: usize) -> Option<&RayCollection> {
        self.get(gen)
            .and_then(|b| b.parent)
            .and_then(|p| self.get(p))
    }

    /// Returns the path of `(generation, ray)` pairs from the seed ray to the
    /// given ray, seed first. Empty if the ray does not exist.
    ///
    /// * `gen` - Generation index.
    /// * `ray` - Ray index within the generation.
    pub fn lineage(&self, gen: usize, ray: usize) -> Vec<(usize, usize)> {
        let mut path = vec![];
        let mut cursor = Some((gen, ray));
        while let Some((g, r)) = cursor {
            match self.get(g) {
                Some(batch) if r < batch.len() => {
                    path.push((g, r));
                    cursor = batch.parent.map(|p| (p, batch.parent_ids[r]));
                }
                _ => return vec![],
            }
        }
        path.reverse();
        path
    }

    /// Returns the number of rays across all generations that terminated on
    /// the face with registry index `face`.
    ///
    /// * `face` - Registry index.
    pub fn count_on(&self, face: usize) -> usize {
        self.generations
            .iter()
            .map(|b| b.end_face.iter().filter(|&&f| f == Some(face)).count())
            .sum()
    }

    /// Returns the total number of rays across all generations.
    pub fn total_rays(&self) -> usize {
        self.generations.iter().map(|b| b.len()).sum()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
