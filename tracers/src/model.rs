//! Ray Trace Model

use crate::registry::Registry;
use crate::results::{FaceStats, Measurement};
use crate::tracer::Tracer;
use arc_swap::ArcSwapOption;
use crossbeam_channel::{bounded, Receiver};
use optics_core::app::TraceConfig;
use optics_core::error::*;
use optics_core::raytrace::*;
use optics_core::rays::{RaySource, TracedRays};
use serde::{Deserialize, Serialize};
use shapes::ArcTraceable;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Atomic reference counted `RaySource`.
pub type ArcRaySource = Arc<dyn RaySource>;

/// Everything a completed trace produces.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceOutcome {
    /// Generations traced for each source, in source order.
    pub traced: Vec<TracedRays>,

    /// Intersection counts per face.
    pub face_stats: FaceStats,

    /// Named values of the measurements.
    pub results: Vec<(String, Float)>,
}

impl TraceOutcome {
    /// Returns true if any source hit the recursion limit.
    pub fn truncated(&self) -> bool {
        self.traced.iter().any(|t| t.truncated)
    }

    /// Returns the value of a measurement by name.
    ///
    /// * `name` - Name of the measurement.
    pub fn result(&self, name: &str) -> Option<Float> {
        self.results.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }
}

/// The parts of a model a trace reads. Cloning copies the element and source
/// handles, so edits to the live model after a snapshot is taken are not
/// seen by the trace.
#[derive(Clone)]
struct Snapshot {
    optics: Vec<ArcTraceable>,
    sources: Vec<ArcRaySource>,
    results: Vec<Measurement>,
    tracer: Tracer,
}

impl Snapshot {
    /// Build a fresh registry, trace every source and evaluate the
    /// measurements.
    fn run(&self) -> TraceResult<TraceOutcome> {
        let mut registry = Registry::build(&self.optics)?;

        let mut traced = Vec::with_capacity(self.sources.len());
        for source in self.sources.iter() {
            let rays = source.input_rays();
            traced.push(self.tracer.trace(&mut registry, source.name(), rays)?);
        }

        let results = self
            .results
            .iter()
            .map(|m| (m.name(), m.evaluate(&registry, &traced)))
            .collect();

        Ok(TraceOutcome {
            traced,
            face_stats: FaceStats::from_registry(&registry),
            results,
        })
    }
}

/// The live optical configuration: elements, sources, measurements and the
/// most recently published trace outcome.
pub struct RayTraceModel {
    /// Optical elements.
    pub optics: Vec<ArcTraceable>,

    /// Ray sources.
    pub sources: Vec<ArcRaySource>,

    /// Measurements evaluated after each trace.
    pub results: Vec<Measurement>,

    /// Trace parameters.
    pub config: TraceConfig,

    /// Last published outcome.
    outcome: Arc<ArcSwapOption<TraceOutcome>>,
}

impl RayTraceModel {
    /// Create a new `RayTraceModel`.
    ///
    /// * `optics`  - Optical elements.
    /// * `sources` - Ray sources.
    /// * `results` - Measurements.
    /// * `config`  - Trace parameters.
    pub fn new(
        optics: Vec<ArcTraceable>,
        sources: Vec<ArcRaySource>,
        results: Vec<Measurement>,
        config: TraceConfig,
    ) -> Self {
        Self {
            optics,
            sources,
            results,
            config,
            outcome: Arc::new(ArcSwapOption::const_empty()),
        }
    }

    /// Returns the last published outcome, if any.
    pub fn outcome(&self) -> Option<Arc<TraceOutcome>> {
        self.outcome.load_full()
    }

    fn snapshot(&self, tracer: Tracer) -> Snapshot {
        Snapshot {
            optics: self.optics.clone(),
            sources: self.sources.clone(),
            results: self.results.clone(),
            tracer,
        }
    }

    /// Trace every source on the calling thread and publish the outcome.
    /// On error the previously published outcome is kept.
    pub fn trace_all(&self) -> TraceResult<Arc<TraceOutcome>> {
        let outcome = Arc::new(self.snapshot(Tracer::new(self.config)).run()?);
        self.outcome.store(Some(Arc::clone(&outcome)));
        Ok(outcome)
    }

    /// Trace a snapshot of the model, on a background thread if `background`
    /// is set. The outcome is published when the trace succeeds.
    ///
    /// * `background` - Run on a separate thread.
    pub fn trace_detail(&self, background: bool) -> DetailTrace {
        self.trace_detail_with(background, Arc::new(AtomicBool::new(false)))
    }

    /// Like `trace_detail` but observing a caller supplied cancellation
    /// token.
    ///
    /// * `background` - Run on a separate thread.
    /// * `cancel`     - Cancellation token checked between generations.
    pub fn trace_detail_with(&self, background: bool, cancel: Arc<AtomicBool>) -> DetailTrace {
        let tracer = Tracer::new(self.config).with_cancel(Arc::clone(&cancel));
        let snapshot = self.snapshot(tracer);
        let slot = Arc::clone(&self.outcome);
        let (tx, rx) = bounded(1);

        let job = move || {
            let result = snapshot.run().map(|outcome| {
                let outcome = Arc::new(outcome);
                slot.store(Some(Arc::clone(&outcome)));
                outcome
            });
            if let Err(e) = &result {
                warn!("Detail trace failed: {}", e);
            }
            // The handle may already be gone.
            let _ = tx.send(result);
        };

        let handle = if background {
            Some(thread::spawn(job))
        } else {
            job();
            None
        };

        DetailTrace { cancel, rx, handle }
    }
}

/// Handle to a detail trace.
pub struct DetailTrace {
    cancel: Arc<AtomicBool>,
    rx: Receiver<TraceResult<Arc<TraceOutcome>>>,
    handle: Option<JoinHandle<()>>,
}

impl DetailTrace {
    /// Request cancellation. Takes effect at the next generation boundary.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Block until the trace finishes and return its outcome.
    pub fn wait(mut self) -> TraceResult<Arc<TraceOutcome>> {
        let result = self.rx.recv();
        if let Some(handle) = self.handle.take() {
            if let Err(panic) = handle.join() {
                std::panic::resume_unwind(panic);
            }
        }
        result.unwrap_or(Err(TraceError::Cancelled))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
