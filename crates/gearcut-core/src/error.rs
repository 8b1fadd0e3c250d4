//! Error types for the geometry kernel.
//!
//! Only contract violations surface here: a root search without a sign
//! change, a non-positive radius or step, a construction that has no
//! solution for the supplied points. Geometry that is merely awkward is
//! left to the profile generators to describe.

use thiserror::Error;

/// Errors raised by the geometry kernel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The bracket handed to a root search does not straddle a root.
    #[error("No sign change between f({lower}) and f({upper})")]
    NoSignChange { lower: f64, upper: f64 },

    /// An argument is outside the domain of the operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two curves that were expected to meet do not.
    #[error("No intersection: {0}")]
    NoIntersection(String),

    /// The inputs collapse to a degenerate shape (zero length, zero radius).
    #[error("Degenerate geometry: {0}")]
    Degenerate(String),
}

/// Result type alias for geometry kernel operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Rejects values that are not finite and strictly positive.
pub fn require_positive(name: &str, value: f64) -> GeometryResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidArgument(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

/// Rejects values that are not finite.
pub fn require_finite(name: &str, value: f64) -> GeometryResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::InvalidArgument(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}
