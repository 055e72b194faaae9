//! Ray Sources

use super::RayCollection;

/// A provider of the seed generation of rays for a trace.
pub trait RaySource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Returns the seed batch of rays. Lengths are reset to infinity by the
    /// trace engine before the first intersection search.
    fn input_rays(&self) -> RayCollection;
}
