//! Beam Stops

use crate::placement::Placement;
use materials::Material;
use optics_core::geometry::*;
use optics_core::raytrace::*;
use shapes::*;

/// An opaque rectangle that absorbs every ray reaching it.
#[derive(Clone, Debug)]
pub struct BeamStop {
    /// Element name.
    pub name: String,

    /// Position and orientation.
    pub placement: Placement,

    /// The single `stop` face.
    pub faces: FaceList,
}

impl BeamStop {
    /// Create a new `BeamStop` at the origin facing +z.
    ///
    /// * `name`   - Element name.
    /// * `width`  - Extent along local x.
    /// * `height` - Extent along local y.
    pub fn new(name: &str, width: Float, height: Float) -> Self {
        let face = Face::new("stop", Rectangular::new(width, height), Some(Material::Opaque));
        Self {
            name: name.to_string(),
            placement: Placement::default(),
            faces: FaceList::new(vec![face]),
        }
    }
}

traceable_element!(BeamStop);

/// An opaque rectangular detector. Same as a `BeamStop`; the face is named
/// `target` so results can refer to it.
#[derive(Clone, Debug)]
pub struct RectTarget {
    /// Element name.
    pub name: String,

    /// Position and orientation.
    pub placement: Placement,

    /// The single `target` face.
    pub faces: FaceList,
}

impl RectTarget {
    /// Create a new `RectTarget` at the origin facing +z.
    ///
    /// * `name`   - Element name.
    /// * `width`  - Extent along local x.
    /// * `height` - Extent along local y.
    pub fn new(name: &str, width: Float, height: Float) -> Self {
        let face = Face::new("target", Rectangular::new(width, height), Some(Material::Opaque));
        Self {
            name: name.to_string(),
            placement: Placement::default(),
            faces: FaceList::new(vec![face]),
        }
    }
}

traceable_element!(RectTarget);

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_are_opaque() {
        let stop = BeamStop::new("stop", 1.0, 1.0);
        let target = RectTarget::new("det", 1.0, 1.0);
        assert_eq!(stop.faces.get("stop").unwrap().material, Some(Material::Opaque));
        assert_eq!(target.faces.get("target").unwrap().material, Some(Material::Opaque));
        assert_eq!(Traceable::name(&target), "det");
    }
}
