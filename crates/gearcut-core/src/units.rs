//! Unit conversion utilities
//!
//! All geometry is computed in millimetres. Chain pitches and roller sizes are
//! commonly quoted in inches, so values arriving from either system are
//! converted here. Supports decimal and fractional inch parsing.

use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres in one inch
pub const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(GeometryError::InvalidArgument(format!(
                "Unknown measurement system: {}",
                s
            ))),
        }
    }
}

impl MeasurementSystem {
    /// Unit suffix used in information text
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Metric => "mm",
            Self::Imperial => "in",
        }
    }

    /// Convert a value expressed in this system to millimetres
    pub fn to_mm(&self, value: f64) -> f64 {
        match self {
            Self::Metric => value,
            Self::Imperial => inches_to_mm(value),
        }
    }
}

pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Format length value for display
///
/// * `value_mm` - Value in millimeters
/// * `system` - Target measurement system
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.3}", value_mm),
        MeasurementSystem::Imperial => format!("{:.4}", mm_to_inches(value_mm)),
    }
}

/// Parse length string to millimeters
///
/// A trailing "mm", "in" or `"` overrides `system`. Imperial input accepts
/// decimals ("0.625") and mixed fractions ("1 1/4").
///
/// * `input` - String to parse
/// * `system` - Measurement system assumed when no unit is given
pub fn parse_length(input: &str, system: MeasurementSystem) -> GeometryResult<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(GeometryError::InvalidArgument("Empty length".to_string()));
    }

    let invalid = |reason: &str| GeometryError::InvalidArgument(format!("{}: '{}'", reason, input));

    let (number, system) = split_unit(input, system);
    let mut total = 0.0;
    let mut parts = 0;
    for part in number.split_whitespace() {
        parts += 1;
        if let Some((num, den)) = part.split_once('/') {
            if system == MeasurementSystem::Metric {
                return Err(invalid("Fractions are only accepted in inches"));
            }
            let num = num
                .parse::<f64>()
                .map_err(|_| invalid("Invalid numerator"))?;
            let den = den
                .parse::<f64>()
                .map_err(|_| invalid("Invalid denominator"))?;
            if den == 0.0 {
                return Err(invalid("Division by zero"));
            }
            total += num / den;
        } else {
            if parts > 1 && system == MeasurementSystem::Metric {
                return Err(invalid("Invalid number"));
            }
            total += part
                .parse::<f64>()
                .map_err(|_| invalid("Invalid number part"))?;
        }
    }
    if parts == 0 {
        return Err(invalid("Missing number"));
    }

    let value = system.to_mm(total);
    if !value.is_finite() {
        return Err(invalid("Length is not finite"));
    }
    Ok(value)
}

fn split_unit(input: &str, system: MeasurementSystem) -> (&str, MeasurementSystem) {
    if let Some(number) = input.strip_suffix('"') {
        return (number.trim_end(), MeasurementSystem::Imperial);
    }
    for candidate in [MeasurementSystem::Metric, MeasurementSystem::Imperial] {
        if let Some(number) = input.strip_suffix(candidate.suffix()) {
            return (number.trim_end(), candidate);
        }
    }
    (input, system)
}
