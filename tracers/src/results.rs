//! Results

use crate::registry::Registry;
use optics_core::geometry::*;
use optics_core::rays::TracedRays;
use optics_core::raytrace::*;
use optics_core::stats::StatsAccumulator;
use serde::{Deserialize, Serialize};

/// Identifies a face by its owner and name, independent of registry
/// indices which change from trace to trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceId {
    /// Name of the owning element.
    pub owner: String,

    /// Name of the face within the element.
    pub face: String,
}

impl FaceId {
    /// Create a new `FaceId`.
    ///
    /// * `owner` - Name of the owning element.
    /// * `face`  - Name of the face within the element.
    pub fn new(owner: &str, face: &str) -> Self {
        Self {
            owner: owner.to_string(),
            face: face.to_string(),
        }
    }

    /// Returns the registry index of the face, if present.
    ///
    /// * `registry` - The registry.
    pub fn resolve(&self, registry: &Registry) -> Option<usize> {
        registry.find(&self.owner, &self.face)
    }
}

/// Ratio of the intersections on one face to those on another.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ratio {
    /// Face counted in the numerator.
    pub numerator: FaceId,

    /// Face counted in the denominator.
    pub denominator: FaceId,
}

impl Ratio {
    /// Returns the ratio; `+inf` if nothing reached the denominator.
    ///
    /// * `registry` - Registry the trace ran against.
    /// * `traced`   - Trace results of every source.
    pub fn evaluate(&self, registry: &Registry, traced: &[TracedRays]) -> Float {
        let num = intersections(registry, traced, &self.numerator);
        let denom = intersections(registry, traced, &self.denominator);
        safe_ratio(num as Float, denom as Float)
    }
}

/// Rays entering through an aperture relative to the rays collected on a
/// target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TotalEfficiency {
    /// Face the rays enter through.
    pub aperture: FaceId,

    /// Face collecting the rays.
    pub target: FaceId,
}

impl TotalEfficiency {
    /// Returns the efficiency; `+inf` if nothing reached the target.
    ///
    /// * `registry` - Registry the trace ran against.
    /// * `traced`   - Trace results of every source.
    pub fn evaluate(&self, registry: &Registry, traced: &[TracedRays]) -> Float {
        let entries = match self.aperture.resolve(registry) {
            Some(face) => traced
                .iter()
                .flat_map(|t| t.generations())
                .map(|b| {
                    (0..b.len())
                        .filter(|&i| b.end_face[i] == Some(face) && b.direction[i].dot(&b.normal[i]) < 0.0)
                        .count()
                })
                .sum(),
            None => 0,
        };
        let collected = intersections(registry, traced, &self.target);
        safe_ratio(entries as Float, collected as Float)
    }
}

/// A quantity derived from a completed trace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Measurement {
    Ratio(Ratio),
    TotalEfficiency(TotalEfficiency),
}

impl Measurement {
    /// Returns a descriptive name.
    pub fn name(&self) -> String {
        match self {
            Self::Ratio(r) => format!(
                "ratio {}:{} / {}:{}",
                r.numerator.owner, r.numerator.face, r.denominator.owner, r.denominator.face
            ),
            Self::TotalEfficiency(e) => format!(
                "efficiency {}:{} -> {}:{}",
                e.aperture.owner, e.aperture.face, e.target.owner, e.target.face
            ),
        }
    }

    /// Returns the value of the measurement.
    ///
    /// * `registry` - Registry the trace ran against.
    /// * `traced`   - Trace results of every source.
    pub fn evaluate(&self, registry: &Registry, traced: &[TracedRays]) -> Float {
        match self {
            Self::Ratio(r) => r.evaluate(registry, traced),
            Self::TotalEfficiency(e) => e.evaluate(registry, traced),
        }
    }
}

/// Returns the number of rays terminating on a face across all traces.
fn intersections(registry: &Registry, traced: &[TracedRays], id: &FaceId) -> usize {
    id.resolve(registry)
        .map_or(0, |face| traced.iter().map(|t| t.count_on(face)).sum())
}

/// Intersection counts per face, labelled `owner: face`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceStats {
    /// Face labels and counts in registry order.
    pub faces: Vec<(String, u64)>,
}

impl FaceStats {
    /// Collect the counts of a registry after tracing.
    ///
    /// * `registry` - The registry.
    pub fn from_registry(registry: &Registry) -> Self {
        let faces = registry
            .faces()
            .iter()
            .map(|face| (face.label(), registry.counters.get(face.idx)))
            .collect();
        Self { faces }
    }

    /// Returns the count of a face by label.
    ///
    /// * `label` - The label `owner: face`.
    pub fn get(&self, label: &str) -> Option<u64> {
        self.faces.iter().find(|(l, _)| l == label).map(|(_, c)| *c)
    }

    /// Report one counter per face under the `Faces` category.
    ///
    /// * `accum` - The stats accumulator.
    pub fn report(&self, accum: &mut StatsAccumulator) {
        for (label, count) in self.faces.iter() {
            accum.report_counter(&format!("Faces/{}", label), *count as i64);
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::Tracer;
    use components::*;
    use materials::Material;
    use optics_core::rays::RayCollection;
    use shapes::ArcTraceable;
    use std::sync::Arc;

    fn screen(name: &str, z: Float) -> ArcTraceable {
        let mut s = RectTarget::new(name, 4.0, 4.0);
        s.faces.set_material(Material::glass(real(1.0)));
        s.placement = Placement::new(Point3f::new(0.0, 0.0, z), Vector3f::Z, Vector3f::X);
        Arc::new(s)
    }

    fn traced(registry: &mut Registry) -> Vec<TracedRays> {
        // Three rays through the wide screen, one of which also crosses the
        // narrow one.
        let rays = RayCollection::new(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.5, 0.0, 0.0),
                Point3f::new(-1.5, 0.0, 0.0),
            ],
            vec![Vector3f::Z; 3],
            100.0,
        );
        vec![Tracer::default().trace(registry, "src", rays).unwrap()]
    }

    fn setup() -> Registry {
        let mut narrow = RectTarget::new("narrow", 1.0, 1.0);
        narrow.faces.set_material(Material::Opaque);
        narrow.placement = Placement::new(Point3f::new(0.0, 0.0, 2.0), Vector3f::Z, Vector3f::X);
        let optics: Vec<ArcTraceable> = vec![screen("wide", 1.0), Arc::new(narrow)];
        Registry::build(&optics).unwrap()
    }

    #[test]
    fn ratio_of_counts() {
        let mut registry = setup();
        let traced = traced(&mut registry);
        let ratio = Ratio {
            numerator: FaceId::new("narrow", "target"),
            denominator: FaceId::new("wide", "target"),
        };
        assert_eq!(ratio.evaluate(&registry, &traced), 1.0 / 3.0);
    }

    #[test]
    fn zero_denominator_is_infinite() {
        let mut registry = setup();
        let traced = traced(&mut registry);
        let ratio = Measurement::Ratio(Ratio {
            numerator: FaceId::new("wide", "target"),
            denominator: FaceId::new("missing", "target"),
        });
        assert_eq!(ratio.evaluate(&registry, &traced), INFINITY);
    }

    #[test]
    fn efficiency_counts_entries_only() {
        let mut registry = setup();
        let traced = traced(&mut registry);
        let eff = TotalEfficiency {
            aperture: FaceId::new("wide", "target"),
            target: FaceId::new("narrow", "target"),
        };
        assert_eq!(eff.evaluate(&registry, &traced), 3.0);
    }

    #[test]
    fn face_stats_report() {
        let mut registry = setup();
        traced(&mut registry);
        let stats = FaceStats::from_registry(&registry);
        assert_eq!(stats.get("narrow: target"), Some(1));

        let mut accum = StatsAccumulator::new();
        stats.report(&mut accum);
        assert_eq!(accum.counter("Faces/wide: target"), Some(3));
        assert_eq!(accum.counter("Faces/narrow: target"), Some(1));
    }
}
