//! Errors

use thiserror::Error;

/// Errors that prevent a trace from starting or completing. Failures local
/// to a single ray or surface never surface here; they degrade that ray to
/// "no intersection" instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// A face has no material assigned.
    #[error("face '{face}' of '{owner}' has no material")]
    MissingMaterial { face: String, owner: String },

    /// There are no faces to trace against.
    #[error("no faces to trace against")]
    EmptyRegistry,

    /// Trace parameters are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The trace was cancelled between generations.
    #[error("trace cancelled")]
    Cancelled,
}

/// Result type for trace operations.
pub type TraceResult<T> = Result<T, TraceError>;
