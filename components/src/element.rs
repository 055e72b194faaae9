//! Common Element Plumbing

/// Implements `Traceable` and `with_placement` for an element struct with
/// `name`, `placement` and `faces` fields.
macro_rules! traceable_element {
    ($t: ty) => {
        impl $t {
            /// Returns the element moved to a new placement.
            ///
            /// * `placement` - The new placement.
            pub fn with_placement(mut self, placement: Placement) -> Self {
                self.placement = placement;
                self
            }
        }

        impl Traceable for $t {
            fn name(&self) -> &str {
                &self.name
            }

            fn transform(&self) -> Transform {
                self.placement.transform()
            }

            fn faces(&self) -> &FaceList {
                &self.faces
            }
        }
    };
}
