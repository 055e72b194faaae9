//! Materials

#[macro_use]
extern crate log;

mod dielectric;
mod fresnel;
mod material;
mod mirror;

// Re-export
pub use dielectric::*;
pub use fresnel::*;
pub use material::*;
pub use mirror::*;
