//! Angular sampling resolution shared by every point generator.

use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Number of samples taken per full revolution when curves are generated.
///
/// Passed explicitly into every generator so tests can run coarse and
/// accuracy checks can run fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Points generated for a full 360 degree sweep
    pub points_per_rotation: u32,
}

impl Resolution {
    /// Smallest resolution that still resolves a tooth of a small gear.
    pub const MIN_POINTS_PER_ROTATION: u32 = 16;

    /// Create a validated resolution.
    pub fn new(points_per_rotation: u32) -> GeometryResult<Self> {
        let resolution = Self {
            points_per_rotation,
        };
        resolution.validate()?;
        Ok(resolution)
    }

    /// One degree steps, good enough for tests and previews.
    pub fn coarse() -> Self {
        Self {
            points_per_rotation: 360,
        }
    }

    /// Resolution used for accuracy checks.
    pub fn fine() -> Self {
        Self {
            points_per_rotation: 14_400,
        }
    }

    /// Angle between consecutive samples, in radians.
    pub fn angle_step(&self) -> f64 {
        TAU / f64::from(self.points_per_rotation.max(1))
    }

    /// Number of whole steps needed to cover `sweep` radians.
    ///
    /// A sweep within rounding of an exact multiple of the step does not
    /// gain an extra sliver step.
    pub fn steps_for(&self, sweep: f64) -> usize {
        (sweep.abs() / self.angle_step() - 1e-9).ceil().max(0.0) as usize
    }

    pub fn validate(&self) -> GeometryResult<()> {
        if self.points_per_rotation < Self::MIN_POINTS_PER_ROTATION {
            return Err(GeometryError::InvalidArgument(format!(
                "points per rotation must be at least {}, got {}",
                Self::MIN_POINTS_PER_ROTATION,
                self.points_per_rotation
            )));
        }
        Ok(())
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            points_per_rotation: 3600,
        }
    }
}
