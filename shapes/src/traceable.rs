//! Traceable Elements

use crate::face::{Face, FaceList};
use optics_core::geometry::Transform;
use std::fmt::Debug;
use std::sync::Arc;

/// An optical element that contributes faces to a trace.
pub trait Traceable: Debug + Send + Sync {
    /// Returns the element's name.
    fn name(&self) -> &str;

    /// Returns the element's local to world transformation.
    fn transform(&self) -> Transform;

    /// Returns the element's faces in local coordinates.
    fn faces(&self) -> &FaceList;

    /// Returns the faces positioned in world coordinates and tagged with the
    /// element's name.
    fn world_faces(&self) -> Vec<Face> {
        let transform = self.transform();
        self.faces()
            .iter()
            .map(|f| f.placed(&transform, self.name()))
            .collect()
    }
}

/// Atomic reference counted `Traceable`.
pub type ArcTraceable = Arc<dyn Traceable>;
