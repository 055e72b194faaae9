//! Core

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod app;
pub mod error;
#[macro_use]
pub mod geometry;
pub mod rays;
pub mod raytrace;
pub mod stats;
