//! Error types for the profile generators.
//!
//! These cover caller mistakes only: a zero tooth count, a negative module,
//! a non-finite shift, asking for the contact ratio of gears that cannot
//! mesh. A design that is geometrically impossible is not an error at this
//! level; the profile is still returned and its `errors()` text explains why
//! the outline is empty.

use gearcut_core::GeometryError;
use thiserror::Error;

/// Errors that can occur while building a gear profile.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Invalid parameters were provided to a generator.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Two profiles cannot be paired (different module or pressure angle).
    #[error("Incompatible gears: {0}")]
    Incompatible(String),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// A kernel contract was violated.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

/// Errors related to generator parameter validation.
#[derive(Error, Debug)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Dimensions are invalid (zero or negative).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type alias for profile generation.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

/// Requires a finite value strictly greater than zero.
pub(crate) fn positive(name: &str, value: f64) -> ParameterResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::InvalidDimensions(format!(
            "{} must be greater than zero, got {}",
            name, value
        )))
    }
}

/// Requires a finite value that is zero or more.
pub(crate) fn non_negative(name: &str, value: f64) -> ParameterResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::InvalidDimensions(format!(
            "{} must not be negative, got {}",
            name, value
        )))
    }
}

/// Requires a finite value inside `min..=max`.
pub(crate) fn within(name: &str, value: f64, min: f64, max: f64) -> ParameterResult<f64> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(ParameterError::OutOfRange {
            name: name.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Requires at least `min` teeth.
pub(crate) fn tooth_count(name: &str, value: usize, min: usize) -> ParameterResult<usize> {
    if value >= min {
        Ok(value)
    } else {
        Err(ParameterError::InvalidValue {
            name: name.to_string(),
            reason: format!("at least {} teeth are required, got {}", min, value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_error_display() {
        let err = ProfileError::InvalidParameters("module must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameters: module must be positive");

        let err = ProfileError::Incompatible("module 1 vs 2".to_string());
        assert_eq!(err.to_string(), "Incompatible gears: module 1 vs 2");
    }

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::OutOfRange {
            name: "blunting".to_string(),
            value: 1.5,
            min: 0.0,
            max: 1.0,
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'blunting' out of range: 1.5 (valid: 0..1)"
        );

        let err = ParameterError::InvalidDimensions("module must be greater than zero, got 0".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: module must be greater than zero, got 0"
        );
    }

    #[test]
    fn test_error_conversion() {
        let param_err = ParameterError::InvalidDimensions("pitch".to_string());
        let err: ProfileError = param_err.into();
        assert!(matches!(err, ProfileError::Parameter(_)));

        let geo_err = GeometryError::InvalidArgument("step".to_string());
        let err: ProfileError = geo_err.into();
        assert!(matches!(err, ProfileError::Geometry(_)));
    }

    #[test]
    fn test_validators() {
        assert!(positive("module", 1.0).is_ok());
        assert!(positive("module", 0.0).is_err());
        assert!(non_negative("backlash", 0.0).is_ok());
        assert!(non_negative("backlash", -0.1).is_err());
        assert!(within("blunting", 0.5, 0.0, 1.0).is_ok());
        assert!(within("blunting", f64::NAN, 0.0, 1.0).is_err());
        assert!(tooth_count("teeth", 3, 3).is_ok());
        assert!(tooth_count("teeth", 2, 3).is_err());
    }
}
