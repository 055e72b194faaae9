//! Tracers

#[macro_use]
extern crate log;

mod model;
mod parallel;
mod registry;
mod results;
mod sequential;
mod tracer;

// Re-export
pub use model::*;
pub use parallel::*;
pub use registry::*;
pub use results::*;
pub use sequential::*;
pub use tracer::*;
