//! Axis-aligned bounding rectangles.

use super::Coordinate;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box. An empty box has inverted infinite limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn from_points<I: IntoIterator<Item = Coordinate>>(points: I) -> Self {
        let mut bounds = Self::empty();
        for p in points {
            bounds.include(p);
        }
        bounds
    }

    pub fn include(&mut self, p: Coordinate) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    pub fn centre(&self) -> Coordinate {
        Coordinate::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains(&self, p: Coordinate, tolerance: f64) -> bool {
        p.x >= self.min_x - tolerance
            && p.x <= self.max_x + tolerance
            && p.y >= self.min_y - tolerance
            && p.y <= self.max_y + tolerance
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds() {
        let b = Bounds::empty();
        assert!(b.is_empty());
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), 0.0);
    }

    #[test]
    fn test_from_points_and_union() {
        let a = Bounds::from_points([Coordinate::new(1.0, 2.0), Coordinate::new(-1.0, 5.0)]);
        assert_eq!(a.width(), 2.0);
        assert_eq!(a.height(), 3.0);
        assert_eq!(a.centre(), Coordinate::new(0.0, 3.5));

        let b = Bounds::from_points([Coordinate::new(4.0, 0.0)]);
        let u = a.union(b);
        assert_eq!(u.max_x, 4.0);
        assert_eq!(u.min_y, 0.0);
        assert!(u.contains(Coordinate::new(2.0, 1.0), 0.0));
        assert!(!u.contains(Coordinate::new(5.0, 1.0), 0.5));

        assert_eq!(Bounds::empty().union(b), b);
    }
}
