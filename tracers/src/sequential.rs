//! Sequential Trace Engine

use crate::registry::Registry;
use crate::tracer::Tracer;
use optics_core::error::*;
use optics_core::rays::*;
use optics_core::stats::FaceCounters;

/// One step of an optical train.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// A single face.
    Single(usize),

    /// Several faces evaluated together; the nearest wins, equal distances
    /// resolve to the lowest registry index.
    Set(Vec<usize>),
}

impl Stage {
    /// Returns the registry indices of the stage in ascending order.
    fn candidates(&self) -> Vec<usize> {
        match self {
            Self::Single(idx) => vec![*idx],
            Self::Set(faces) => {
                let mut faces = faces.clone();
                faces.sort_unstable();
                faces.dedup();
                faces
            }
        }
    }
}

/// Traces rays through faces in a fixed order instead of searching the
/// whole registry. Rays that miss a stage leave the train.
#[derive(Clone, Debug, Default)]
pub struct SequentialTracer {
    /// The generational tracer supplying parameters and cancellation.
    pub tracer: Tracer,

    /// The optical train.
    pub stages: Vec<Stage>,
}

impl SequentialTracer {
    /// Create a new `SequentialTracer`.
    ///
    /// * `tracer` - Supplies parameters and cancellation.
    /// * `stages` - The optical train.
    pub fn new(tracer: Tracer, stages: Vec<Stage>) -> Self {
        Self { tracer, stages }
    }

    /// Returns an error if a stage is empty or references an unknown face.
    ///
    /// * `registry` - Faces to trace against.
    fn validate(&self, registry: &Registry) -> TraceResult<()> {
        for (i, stage) in self.stages.iter().enumerate() {
            let candidates = stage.candidates();
            if candidates.is_empty() {
                return Err(TraceError::InvalidConfig(format!("stage {} is empty", i)));
            }
            if let Some(bad) = candidates.iter().find(|&&idx| idx >= registry.len()) {
                return Err(TraceError::InvalidConfig(format!(
                    "stage {} references unknown face {}",
                    i, bad
                )));
            }
        }
        Ok(())
    }

    /// Trace the seed batch through the stages. The result holds the seed
    /// followed by the rays leaving each stage; it is truncated if the
    /// recursion limit ends the train early.
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
        self.tracer.config.validate()?;
        self.validate(registry)?;

        let limit = self.tracer.config.recursion_limit;
        let mut traced = TracedRays::new(source);
        let mut counters = FaceCounters::new(registry.len());

        let mut rays = seed;
        rays.reset_length();
        rays.parent = None;

        let mut count = 0;
        for stage in self.stages.iter() {
            if rays.is_empty() || count == limit {
                break;
            }
            self.tracer.check_cancelled()?;

            let generation = self.tracer.resolve(registry, &stage.candidates(), &mut rays);
            counters += &generation.counters;
            debug!(
                "Stage {}: {} rays, {} passed",
                count,
                rays.len(),
                rays.hits()
            );

            let gen = traced.len();
            let next = RayCollection::from_parent(&rays, gen, generation.children);
            traced.push(rays);
            rays = next;
            count += 1;
        }

        traced.truncated = count == limit && count < self.stages.len() && !rays.is_empty();
        if !rays.is_empty() {
            traced.push(rays);
        }
        registry.counters += &counters;

        info!(
            "Sequential trace of '{}': {} stages, {} generations",
            source,
            count,
            traced.len()
        );
        Ok(traced)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use components::*;
    use optics_core::app::TraceConfig;
    use optics_core::geometry::*;
    use optics_core::raytrace::*;
    use shapes::ArcTraceable;
    use std::sync::Arc;

    fn screens() -> Vec<ArcTraceable> {
        (1..=3)
            .map(|i| {
                let mut s = RectTarget::new(&format!("screen{}", i), 4.0, 4.0);
                s.faces.set_material(materials::Material::glass(real(1.0)));
                s.placement = Placement::new(
                    Point3f::new(0.0, 0.0, i as Float),
                    Vector3f::Z,
                    Vector3f::X,
                );
                Arc::new(s) as ArcTraceable
            })
            .collect()
    }

    fn seed() -> RayCollection {
        RayCollection::new(
            vec![Point3f::ORIGIN, Point3f::new(3.0, 0.0, 0.0)],
            vec![Vector3f::Z; 2],
            100.0,
        )
    }

    #[test]
    fn rays_follow_the_given_order() {
        let mut registry = Registry::build(&screens()).unwrap();
        let tracer = SequentialTracer::new(
            Tracer::default(),
            vec![Stage::Single(0), Stage::Set(vec![2, 1])],
        );
        let traced = tracer.trace(&mut registry, "src", seed()).unwrap();

        // The off-axis ray misses the first stage and leaves the train.
        let first = &traced.generations()[0];
        assert_eq!(first.end_face, vec![Some(0), None]);

        // Index matched glass: reflected amplitude is zero but both
        // children are kept; the transmitted one reaches face 1 first.
        let second = &traced.generations()[1];
        assert_eq!(second.len(), 2);
        assert_eq!(second.end_face[1], Some(1));
        assert!(!traced.truncated);
        assert_eq!(registry.counters.get(0), 1);
        assert_eq!(registry.counters.get(1), 1);
        assert_eq!(registry.counters.get(2), 0);
    }

    #[test]
    fn unknown_face_is_a_configuration_error() {
        let mut registry = Registry::build(&screens()).unwrap();
        let tracer = SequentialTracer::new(Tracer::default(), vec![Stage::Single(9)]);
        assert!(matches!(
            tracer.trace(&mut registry, "src", seed()),
            Err(TraceError::InvalidConfig(_))
        ));

        let tracer = SequentialTracer::new(Tracer::default(), vec![Stage::Set(vec![])]);
        assert!(matches!(
            tracer.trace(&mut registry, "src", seed()),
            Err(TraceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn recursion_limit_truncates_the_train() {
        let mut registry = Registry::build(&screens()).unwrap();
        let config = TraceConfig {
            recursion_limit: 1,
            ..TraceConfig::default()
        };
        let tracer = SequentialTracer::new(
            Tracer::new(config),
            vec![Stage::Single(0), Stage::Single(1), Stage::Single(2)],
        );
        let traced = tracer.trace(&mut registry, "src", seed()).unwrap();
        assert!(traced.truncated);
        assert_eq!(traced.len(), 2);
    }
}
