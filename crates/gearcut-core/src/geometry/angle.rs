//! Angles held as a unit vector.

use super::Coordinate;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// An angle stored as its cosine and sine.
///
/// Composing rotations multiplies the pairs instead of calling the trig
/// functions again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    cos: f64,
    sin: f64,
}

impl Angle {
    pub const ZERO: Angle = Angle { cos: 1.0, sin: 0.0 };

    pub fn from_radians(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self { cos, sin }
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    /// Direction of a vector; `None` for the zero vector.
    pub fn from_vector(v: Coordinate) -> Option<Self> {
        v.normalized().map(|u| Self { cos: u.x, sin: u.y })
    }

    pub fn radians(&self) -> f64 {
        self.sin.atan2(self.cos)
    }

    pub fn degrees(&self) -> f64 {
        self.radians().to_degrees()
    }

    pub fn cos(&self) -> f64 {
        self.cos
    }

    pub fn sin(&self) -> f64 {
        self.sin
    }

    pub fn tan(&self) -> f64 {
        self.sin / self.cos
    }

    pub fn cot(&self) -> f64 {
        self.cos / self.sin
    }

    pub fn sec(&self) -> f64 {
        1.0 / self.cos
    }

    pub fn csc(&self) -> f64 {
        1.0 / self.sin
    }

    /// Half of this angle, in (-π/2, π/2].
    pub fn half(&self) -> Self {
        Self::from_radians(self.radians() / 2.0)
    }

    /// Rescales the pair back onto the unit circle after long chains of
    /// composition.
    pub fn normalized(&self) -> Self {
        let length = self.cos.hypot(self.sin);
        if length == 0.0 {
            return Self::ZERO;
        }
        Self {
            cos: self.cos / length,
            sin: self.sin / length,
        }
    }

    /// Unit vector pointing along this angle.
    pub fn unit_vector(&self) -> Coordinate {
        Coordinate::new(self.cos, self.sin)
    }
}

impl Default for Angle {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle {
            cos: self.cos * rhs.cos - self.sin * rhs.sin,
            sin: self.sin * rhs.cos + self.cos * rhs.sin,
        }
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle {
            cos: self.cos,
            sin: -self.sin,
        }
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        self + (-rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_and_normalized() {
        let angle = Angle::from_degrees(120.0);
        assert!((angle.half().degrees() - 60.0).abs() < 1e-12);
        assert!((Angle::from_degrees(-90.0).half().degrees() + 45.0).abs() < 1e-12);

        let mut drifted = Angle::ZERO;
        for _ in 0..1000 {
            drifted = drifted + Angle::from_degrees(0.36);
        }
        let fixed = drifted.normalized();
        assert!((fixed.cos().hypot(fixed.sin()) - 1.0).abs() < 1e-15);
        assert!(fixed.degrees().abs() < 1e-6);
    }

    #[test]
    fn test_trig_ratios() {
        let a = Angle::from_degrees(30.0);
        assert!((a.sin() - 0.5).abs() < 1e-12);
        assert!((a.csc() - 2.0).abs() < 1e-12);
        assert!((a.tan() * a.cot() - 1.0).abs() < 1e-12);
        assert!((a.sec() - 1.0 / 30f64.to_radians().cos()).abs() < 1e-12);
        assert!((a.degrees() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_composition() {
        let a = Angle::from_degrees(50.0) + Angle::from_degrees(25.0);
        assert!((a.degrees() - 75.0).abs() < 1e-12);
        let b = Angle::from_degrees(50.0) - Angle::from_degrees(80.0);
        assert!((b.degrees() + 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_vector() {
        let a = Angle::from_vector(Coordinate::new(0.0, -3.0)).unwrap();
        assert!((a.degrees() + 90.0).abs() < 1e-12);
        assert!(Angle::from_vector(Coordinate::ORIGIN).is_none());
    }
}
