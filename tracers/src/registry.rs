//! Surface Registry

use optics_core::error::*;
use optics_core::geometry::*;
use optics_core::raytrace::*;
use optics_core::stats::FaceCounters;
use shapes::*;
use std::ops::Range;

/// The contiguous range of registry indices belonging to one element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceSet {
    /// Name of the element.
    pub owner: String,

    /// Registry indices of the element's faces.
    pub faces: Range<usize>,
}

/// The nearest intersection of a ray with a set of faces.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FaceHit {
    /// Registry index of the face.
    pub face: usize,

    /// Distance along the ray.
    pub t: Float,

    /// World-space unit outward normal.
    pub normal: Normal3f,
}

/// All faces of all elements taking part in one trace, positioned in world
/// coordinates and indexed `0..len`, together with the intersection counts
/// accumulated while tracing.
#[derive(Clone, Debug)]
pub struct Registry {
    /// Faces in registry order.
    faces: Vec<Face>,

    /// Per-element groupings.
    face_sets: Vec<FaceSet>,

    /// Intersection counts for the current trace.
    pub counters: FaceCounters,
}

impl Registry {
    /// Flatten the faces of the given elements, synchronising each face with
    /// its owner's placement and assigning indices in element order.
    ///
    /// * `optics` - The optical elements.
    pub fn build(optics: &[ArcTraceable]) -> TraceResult<Self> {
        let mut faces = vec![];
        let mut face_sets = Vec::with_capacity(optics.len());

        for optic in optics {
            let start = faces.len();
            for mut face in optic.world_faces() {
                if face.material.is_none() {
                    return Err(TraceError::MissingMaterial {
                        face: face.name,
                        owner: face.owner,
                    });
                }
                face.idx = faces.len();
                faces.push(face);
            }
            face_sets.push(FaceSet {
                owner: optic.name().to_string(),
                faces: start..faces.len(),
            });
        }

        if faces.is_empty() {
            return Err(TraceError::EmptyRegistry);
        }

        info!(
            "Registry built with {} faces from {} elements",
            faces.len(),
            face_sets.len()
        );

        let counters = FaceCounters::new(faces.len());
        Ok(Self {
            faces,
            face_sets,
            counters,
        })
    }

    /// Returns the number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if there are no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Returns the faces in registry order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the face with registry index `idx`.
    ///
    /// * `idx` - Registry index.
    pub fn face(&self, idx: usize) -> Option<&Face> {
        self.faces.get(idx)
    }

    /// Returns the per-element groupings.
    pub fn face_sets(&self) -> &[FaceSet] {
        &self.face_sets
    }

    /// Returns the registry index of a face by owner and face name.
    ///
    /// * `owner` - Name of the element.
    /// * `name`  - Name of the face.
    pub fn find(&self, owner: &str, name: &str) -> Option<usize> {
        self.faces
            .iter()
            .position(|f| f.owner == owner && f.name == name)
    }

    /// Returns the nearest hit further than `epsilon` among `candidates`.
    /// Equal distances resolve to the candidate listed first, which for
    /// ascending candidates is the lowest registry index.
    ///
    /// * `candidates` - Registry indices to test.
    /// * `origin`     - Ray origin.
    /// * `direction`  - Unit ray direction.
    /// * `epsilon`    - Minimum valid distance.
    pub fn nearest(
        &self,
        candidates: &[usize],
        origin: &Point3f,
        direction: &Vector3f,
        epsilon: Float,
    ) -> Option<FaceHit> {
        let mut best: Option<FaceHit> = None;
        for &idx in candidates {
            let Some(face) = self.faces.get(idx) else {
                continue;
            };
            if let Some(hit) = face.intersect(origin, direction, epsilon) {
                if best.map_or(true, |b| hit.t < b.t) {
                    best = Some(FaceHit {
                        face: idx,
                        t: hit.t,
                        normal: hit.normal,
                    });
                }
            }
        }
        best
    }

    /// Returns all registry indices in ascending order.
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.faces.len()).collect()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
