//! Trace Engine

use crate::parallel::parallel_chunks;
use crate::registry::{FaceHit, Registry};
use optics_core::app::TraceConfig;
use optics_core::error::*;
use optics_core::rays::*;
use optics_core::stats::FaceCounters;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Outcome of resolving one generation: the children grouped by face in
/// registry order, and the intersection counts of the generation.
pub(crate) struct Generation {
    pub(crate) children: Vec<Ray>,
    pub(crate) counters: FaceCounters,
}

/// Work done on a chunk of rays.
struct ChunkResult {
    hits: Vec<(usize, FaceHit)>,
    children: Vec<(usize, Ray)>,
    counters: FaceCounters,
}

/// Generational (non-sequential) trace engine. Each generation is
/// intersected against every face in the registry; the nearest face decides
/// the children.
#[derive(Clone, Debug, Default)]
pub struct Tracer {
    /// Trace parameters.
    pub config: TraceConfig,

    /// Checked between generations; when set the trace stops with
    /// `TraceError::Cancelled`.
    cancel: Option<Arc<AtomicBool>>,
}

impl Tracer {
    /// Create a new `Tracer`.
    ///
    /// * `config` - Trace parameters.
    pub fn new(config: TraceConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Returns the tracer observing a cancellation token.
    ///
    /// * `cancel` - Cancellation token.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Returns an error if the trace has been cancelled.
    pub(crate) fn check_cancelled(&self) -> TraceResult<()> {
        match &self.cancel {
            Some(c) if c.load(Ordering::Relaxed) => Err(TraceError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Trace a seed batch to completion or the recursion limit. Intersection
    /// counts are added to the registry's counters.
    ///
    /// * `registry` - Faces to trace against.
    /// * `source`   - Name of the ray source.
    /// * `seed`     - The seed batch.
    pub fn trace(
        &self,
        registry: &mut Registry,
        source: &str,
        seed: RayCollection,
    ) -> TraceResult<TracedRays> {
        self.config.validate()?;
        if registry.is_empty() {
            return Err(TraceError::EmptyRegistry);
        }

        let candidates = registry.all_indices();
        let limit = self.config.recursion_limit;
        let mut traced = TracedRays::new(source);
        let mut counters = FaceCounters::new(registry.len());

        let mut rays = seed;
        rays.reset_length();
        rays.parent = None;

        let mut count = 0;
        while !rays.is_empty() && count < limit {
            self.check_cancelled()?;

            let generation = self.resolve(registry, &candidates, &mut rays);
            counters += &generation.counters;
            debug!(
                "Generation {}: {} rays, {} hits, {} children, intensity {:.6}",
                count,
                rays.len(),
                rays.hits(),
                generation.children.len(),
                rays.total_intensity()
            );

            let gen = traced.len();
            let next = RayCollection::from_parent(&rays, gen, generation.children);
            traced.push(rays);
            rays = next;
            count += 1;
        }

        traced.truncated = count == limit && !rays.is_empty();
        registry.counters += &counters;

        info!(
            "Traced source '{}': {} generations, {} rays{}",
            source,
            traced.len(),
            traced.total_rays(),
            if traced.truncated { " (truncated)" } else { "" }
        );
        Ok(traced)
    }

    /// Find the nearest face among `candidates` for every ray, record the
    /// terminations on `rays` and evaluate the children. Rays with no hit
    /// keep an infinite length and have no children.
    ///
    /// * `registry`   - Faces to trace against.
    /// * `candidates` - Registry indices to test, ascending.
    /// * `rays`       - The current generation.
    pub(crate) fn resolve(
        &self,
        registry: &Registry,
        candidates: &[usize],
        rays: &mut RayCollection,
    ) -> Generation {
        let epsilon = self.config.epsilon;
        let batch: &RayCollection = rays;

        let chunks = parallel_chunks(
            batch.len(),
            self.config.n_threads,
            self.config.chunk_size,
            |range| {
                let mut result = ChunkResult {
                    hits: vec![],
                    children: vec![],
                    counters: FaceCounters::new(registry.len()),
                };
                let mut out = vec![];
                for i in range {
                    let ray = batch.ray(i);
                    let Some(hit) = registry.nearest(candidates, &ray.origin, &ray.direction, epsilon)
                    else {
                        continue;
                    };
                    result.counters.increment(hit.face);
                    result.hits.push((i, hit));

                    if let Some(face) = registry.face(hit.face) {
                        out.clear();
                        face.eval_children(&ray, &ray.at(hit.t), &hit.normal, i, &mut out);
                        result.children.extend(out.drain(..).map(|c| (hit.face, c)));
                    }
                }
                result
            },
        );

        let mut counters = FaceCounters::new(registry.len());
        let mut children = vec![];
        for chunk in chunks {
            for (i, hit) in chunk.hits {
                rays.set_hit(i, hit.t, hit.face, hit.normal);
            }
            counters += &chunk.counters;
            children.extend(chunk.children);
        }

        // Children are grouped by face; within a face they keep ray order.
        children.sort_by_key(|(face, _)| *face);

        Generation {
            children: children.into_iter().map(|(_, c)| c).collect(),
            counters,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
