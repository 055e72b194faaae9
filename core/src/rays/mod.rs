//! Rays

mod ray;
mod ray_collection;
mod source;
mod traced_rays;

// Re-export
pub use ray::*;
pub use ray_collection::*;
pub use source::*;
pub use traced_rays::*;
