//! Optical Components

#[macro_use]
extern crate log;

#[macro_use]
mod element;

mod beamstop;
mod lenses;
mod mirrors;
mod placement;
mod prisms;
mod sources;

// Re-export
pub use beamstop::*;
pub use lenses::*;
pub use mirrors::*;
pub use placement::*;
pub use prisms::*;
pub use sources::*;
