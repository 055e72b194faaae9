//! Shapes

#[macro_use]
extern crate log;

mod extruded;
mod face;
mod planar;
mod shape;
mod spherical;
mod traceable;

// Re-export
pub use extruded::*;
pub use face::*;
pub use planar::*;
pub use shape::*;
pub use spherical::*;
pub use traceable::*;
