//! Statistics

mod accumulator;
mod face_counters;

pub use accumulator::*;
pub use face_counters::*;
