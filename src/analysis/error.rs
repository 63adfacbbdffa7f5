use thiserror::Error;

use crate::geom::UvPoint;

/// Result type for constructing and validating sample sets.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Faults reported by a [`super::SurfaceEvaluator`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("surface parameter ({u}, {v}) is not finite")]
    NonFiniteParameter { u: f64, v: f64 },
    #[error("surface evaluation at ({u}, {v}) produced a non-finite point")]
    NonFinitePoint { u: f64, v: f64 },
    #[error("distance to surface is not finite")]
    NonFiniteDistance,
    /// Failure reported by an injected geometry engine.
    #[error("{0}")]
    Other(String),
}

impl From<String> for EvaluationError {
    fn from(message: String) -> Self {
        Self::Other(message)
    }
}

/// Errors raised while building or validating sample sets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Evaluating calculation location `index` failed; the whole pass is aborted.
    #[error("calculation location {index} at ({}, {}) could not be evaluated: {source}", .location.u, .location.v)]
    Evaluation {
        index: usize,
        location: UvPoint,
        #[source]
        source: EvaluationError,
    },
    #[error("on-surface tolerance must be finite and > 0, got {0}")]
    InvalidTolerance(f64),
    #[error("result series `{name}` has {actual} values for {expected} calculation locations")]
    SeriesLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}
