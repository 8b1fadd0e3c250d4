//! Immutable 2D points in millimetres.

use super::Angle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A point (or vector) in the drawing plane.
///
/// Equality is exact. Callers that need a tolerance use [`Coordinate::approx_eq`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from the origin in direction `angle` (radians).
    pub fn from_polar(radius: f64, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(radius * cos, radius * sin)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Rotate about the origin by `angle` radians.
    pub fn rotate(self, angle: f64) -> Self {
        self.rotated_by(Angle::from_radians(angle))
    }

    /// Rotate about the origin using a precomputed angle.
    pub fn rotated_by(self, angle: Angle) -> Self {
        Self::new(
            self.x * angle.cos() - self.y * angle.sin(),
            self.x * angle.sin() + self.y * angle.cos(),
        )
    }

    /// Rotate about `pivot` by `angle` radians.
    pub fn rotate_about(self, pivot: Coordinate, angle: f64) -> Self {
        (self - pivot).rotate(angle) + pivot
    }

    /// Mirror image in the line through the origin at `angle` radians.
    pub fn reflected_about(self, angle: f64) -> Self {
        self.rotate(-angle).conjugate().rotate(angle)
    }

    /// Distance from the origin.
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction from the origin in radians, in (-π, π].
    pub fn phase(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Mirror image in the X axis.
    pub fn conjugate(self) -> Self {
        Self::new(self.x, -self.y)
    }

    pub fn distance_to(self, other: Coordinate) -> f64 {
        (other - self).magnitude()
    }

    pub fn dot(self, other: Coordinate) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product; positive when `other` lies
    /// counter-clockwise of `self`.
    pub fn cross(self, other: Coordinate) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn lerp(self, other: Coordinate, t: f64) -> Self {
        self + (other - self) * t
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(self) -> Option<Self> {
        let len = self.magnitude();
        (len > 0.0 && len.is_finite()).then(|| self.scale(1.0 / len))
    }

    /// Counter-clockwise perpendicular.
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn approx_eq(self, other: Coordinate, tolerance: f64) -> bool {
        self.distance_to(other) <= tolerance
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Coordinate {
    type Output = Coordinate;

    fn neg(self) -> Coordinate {
        Coordinate::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Coordinate {
    type Output = Coordinate;

    fn mul(self, rhs: f64) -> Coordinate {
        self.scale(rhs)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_polar_round_trip() {
        let p = Coordinate::from_polar(2.0, 0.75);
        assert!((p.magnitude() - 2.0).abs() < 1e-12);
        assert!((p.phase() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_about_pivot() {
        let p = Coordinate::new(2.0, 1.0);
        let r = p.rotate_about(Coordinate::new(1.0, 1.0), FRAC_PI_2);
        assert!(r.approx_eq(Coordinate::new(1.0, 2.0), 1e-12));
    }

    #[test]
    fn test_conjugate_and_ops() {
        let p = Coordinate::new(3.0, 4.0);
        assert_eq!(p.conjugate(), Coordinate::new(3.0, -4.0));
        assert_eq!(p.magnitude(), 5.0);
        assert_eq!(p + Coordinate::new(1.0, 1.0), Coordinate::new(4.0, 5.0));
        assert_eq!(p - p, Coordinate::ORIGIN);
        assert_eq!(-p * 2.0, Coordinate::new(-6.0, -8.0));
        assert_eq!(p.offset(-3.0, 1.0), Coordinate::new(0.0, 5.0));
    }

    #[test]
    fn test_exact_equality() {
        let p = Coordinate::new(1.0, 0.0);
        let q = p.rotate(2.0 * PI);
        assert_ne!(p, q);
        assert!(p.approx_eq(q, 1e-12));
    }

    #[test]
    fn test_reflected_about() {
        let p = Coordinate::new(1.0, 0.0);
        assert!(p.reflected_about(FRAC_PI_2 / 2.0).approx_eq(Coordinate::new(0.0, 1.0), 1e-12));
        assert!(Coordinate::new(3.0, 4.0).reflected_about(0.0) == Coordinate::new(3.0, -4.0));
    }

    #[test]
    fn test_cross_sign() {
        let x = Coordinate::new(1.0, 0.0);
        let y = Coordinate::new(0.0, 1.0);
        assert_eq!(x.cross(y), 1.0);
        assert_eq!(y.cross(x), -1.0);
        assert_eq!(x.perpendicular(), y);
        assert!(Coordinate::ORIGIN.normalized().is_none());
    }
}
