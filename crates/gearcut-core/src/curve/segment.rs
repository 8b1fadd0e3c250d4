//! Drawable curve segments.

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{circle_points, linear_reduction, Bounds, Coordinate};
use crate::resolution::Resolution;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Line {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }
}

/// Arc of a circle. The endpoints are derived from the centre, radius and
/// angles, so editing any of those keeps the endpoints consistent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularArc {
    pub centre: Coordinate,
    pub radius: f64,
    /// Radians
    pub start_angle: f64,
    /// Radians; lies on the side of `start_angle` given by `clockwise`
    pub end_angle: f64,
    pub clockwise: bool,
}

impl CircularArc {
    /// Builds an arc, moving `end_angle` by whole turns if needed so the sweep
    /// runs in the requested direction and does not exceed one turn.
    pub fn new(
        centre: Coordinate,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
    ) -> Self {
        let sweep = end_angle - start_angle;
        let in_range = if clockwise {
            (-TAU..=0.0).contains(&sweep)
        } else {
            (0.0..=TAU).contains(&sweep)
        };
        let end_angle = if in_range {
            end_angle
        } else if clockwise {
            start_angle - (-sweep).rem_euclid(TAU)
        } else {
            start_angle + sweep.rem_euclid(TAU)
        };
        Self {
            centre,
            radius,
            start_angle,
            end_angle,
            clockwise,
        }
    }

    /// Arc around `centre` from `from` to the direction of `to`. The radius is
    /// taken from `from`.
    pub fn between(centre: Coordinate, from: Coordinate, to: Coordinate, clockwise: bool) -> Self {
        Self::new(
            centre,
            centre.distance_to(from),
            (from - centre).phase(),
            (to - centre).phase(),
            clockwise,
        )
    }

    /// Full counter-clockwise circle starting on the positive X side.
    pub fn circle(centre: Coordinate, radius: f64) -> Self {
        Self {
            centre,
            radius,
            start_angle: 0.0,
            end_angle: TAU,
            clockwise: false,
        }
    }

    pub fn point_at(&self, angle: f64) -> Coordinate {
        self.centre + Coordinate::from_polar(self.radius, angle)
    }

    pub fn start(&self) -> Coordinate {
        self.point_at(self.start_angle)
    }

    pub fn end(&self) -> Coordinate {
        self.point_at(self.end_angle)
    }

    /// Signed sweep; negative for clockwise arcs.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn length(&self) -> f64 {
        self.radius * self.sweep().abs()
    }

    fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::from_points([self.start(), self.end()]);
        let (low, high) = if self.clockwise {
            (self.end_angle, self.start_angle)
        } else {
            (self.start_angle, self.end_angle)
        };
        let first = (low / FRAC_PI_2).ceil() as i64;
        let last = (high / FRAC_PI_2).floor() as i64;
        for quadrant in first..=last {
            bounds.include(self.point_at(quadrant as f64 * FRAC_PI_2));
        }
        bounds
    }

    fn rotated_by(&self, angle: f64) -> Self {
        Self {
            centre: self.centre.rotate(angle),
            start_angle: self.start_angle + angle,
            end_angle: self.end_angle + angle,
            ..*self
        }
    }

    fn reflect_y(&self) -> Self {
        Self {
            centre: self.centre.conjugate(),
            start_angle: -self.start_angle,
            end_angle: -self.end_angle,
            clockwise: !self.clockwise,
            ..*self
        }
    }

    fn reversed(&self) -> Self {
        Self {
            start_angle: self.end_angle,
            end_angle: self.start_angle,
            clockwise: !self.clockwise,
            ..*self
        }
    }
}

/// Sequence of straight runs through at least two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolyLinePoints")]
pub struct PolyLine {
    points: Vec<Coordinate>,
}

#[derive(Deserialize)]
struct PolyLinePoints {
    points: Vec<Coordinate>,
}

impl TryFrom<PolyLinePoints> for PolyLine {
    type Error = GeometryError;

    fn try_from(raw: PolyLinePoints) -> GeometryResult<Self> {
        PolyLine::new(raw.points)
    }
}

impl PolyLine {
    pub fn new(points: Vec<Coordinate>) -> GeometryResult<Self> {
        if points.len() < 2 {
            return Err(GeometryError::Degenerate(format!(
                "polyline needs at least two points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn start(&self) -> Coordinate {
        self.points[0]
    }

    pub fn end(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    fn map(&self, f: impl Fn(Coordinate) -> Coordinate) -> Self {
        Self {
            points: self.points.iter().map(|p| f(*p)).collect(),
        }
    }
}

/// Cubic Bézier segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicSpline {
    pub start: Coordinate,
    pub control1: Coordinate,
    pub control2: Coordinate,
    pub end: Coordinate,
}

impl CubicSpline {
    pub fn point_at(&self, t: f64) -> Coordinate {
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.control1 * (3.0 * u * u * t)
            + self.control2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }

    fn bounds(&self) -> Bounds {
        let a = self.control1 - self.start;
        let b = self.control2 - self.control1;
        let c = self.end - self.control2;
        let mut bounds = Bounds::from_points([self.start, self.end]);
        let roots_x = quadratic_roots(a.x - 2.0 * b.x + c.x, 2.0 * (b.x - a.x), a.x);
        let roots_y = quadratic_roots(a.y - 2.0 * b.y + c.y, 2.0 * (b.y - a.y), a.y);
        for t in roots_x.into_iter().chain(roots_y) {
            if t > 0.0 && t < 1.0 {
                bounds.include(self.point_at(t));
            }
        }
        bounds
    }

    fn map(&self, f: impl Fn(Coordinate) -> Coordinate) -> Self {
        Self {
            start: f(self.start),
            control1: f(self.control1),
            control2: f(self.control2),
            end: f(self.end),
        }
    }
}

/// Quadratic Bézier segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticSpline {
    pub start: Coordinate,
    pub control: Coordinate,
    pub end: Coordinate,
}

impl QuadraticSpline {
    pub fn point_at(&self, t: f64) -> Coordinate {
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::from_points([self.start, self.end]);
        let denominator = self.start - self.control * 2.0 + self.end;
        let numerator = self.start - self.control;
        for (n, d) in [(numerator.x, denominator.x), (numerator.y, denominator.y)] {
            if d != 0.0 {
                let t = n / d;
                if t > 0.0 && t < 1.0 {
                    bounds.include(self.point_at(t));
                }
            }
        }
        bounds
    }

    fn map(&self, f: impl Fn(Coordinate) -> Coordinate) -> Self {
        Self {
            start: f(self.start),
            control: f(self.control),
            end: f(self.end),
        }
    }
}

/// Real roots of `a t² + b t + c`.
fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a.abs() < 1e-15 {
        if b.abs() < 1e-15 {
            return Vec::new();
        }
        return vec![-c / b];
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }
    let root = discriminant.sqrt();
    vec![(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)]
}

/// One piece of a drawable outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CurveSegment {
    Line(Line),
    Arc(CircularArc),
    PolyLine(PolyLine),
    Cubic(CubicSpline),
    Quadratic(QuadraticSpline),
}

impl CurveSegment {
    pub fn start(&self) -> Coordinate {
        match self {
            Self::Line(line) => line.start,
            Self::Arc(arc) => arc.start(),
            Self::PolyLine(poly) => poly.start(),
            Self::Cubic(spline) => spline.start,
            Self::Quadratic(spline) => spline.start,
        }
    }

    pub fn end(&self) -> Coordinate {
        match self {
            Self::Line(line) => line.end,
            Self::Arc(arc) => arc.end(),
            Self::PolyLine(poly) => poly.end(),
            Self::Cubic(spline) => spline.end,
            Self::Quadratic(spline) => spline.end,
        }
    }

    /// Tight bounds: arc quadrant extremes and spline turning points are
    /// included, control points are not.
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Line(line) => Bounds::from_points([line.start, line.end]),
            Self::Arc(arc) => arc.bounds(),
            Self::PolyLine(poly) => Bounds::from_points(poly.points.iter().copied()),
            Self::Cubic(spline) => spline.bounds(),
            Self::Quadratic(spline) => spline.bounds(),
        }
    }

    /// Rotated about the origin by `angle` radians.
    pub fn rotated_by(&self, angle: f64) -> Self {
        let rotate = |p: Coordinate| p.rotate(angle);
        match self {
            Self::Line(line) => Self::Line(Line::new(rotate(line.start), rotate(line.end))),
            Self::Arc(arc) => Self::Arc(arc.rotated_by(angle)),
            Self::PolyLine(poly) => Self::PolyLine(poly.map(rotate)),
            Self::Cubic(spline) => Self::Cubic(spline.map(rotate)),
            Self::Quadratic(spline) => Self::Quadratic(spline.map(rotate)),
        }
    }

    /// Mirrored in the X axis (Y negated).
    pub fn reflect_y(&self) -> Self {
        let mirror = Coordinate::conjugate;
        match self {
            Self::Line(line) => Self::Line(Line::new(mirror(line.start), mirror(line.end))),
            Self::Arc(arc) => Self::Arc(arc.reflect_y()),
            Self::PolyLine(poly) => Self::PolyLine(poly.map(mirror)),
            Self::Cubic(spline) => Self::Cubic(spline.map(mirror)),
            Self::Quadratic(spline) => Self::Quadratic(spline.map(mirror)),
        }
    }

    /// Same curve traversed from end to start.
    pub fn reversed(&self) -> Self {
        match self {
            Self::Line(line) => Self::Line(Line::new(line.end, line.start)),
            Self::Arc(arc) => Self::Arc(arc.reversed()),
            Self::PolyLine(poly) => {
                let mut points = poly.points.clone();
                points.reverse();
                Self::PolyLine(PolyLine { points })
            }
            Self::Cubic(spline) => Self::Cubic(CubicSpline {
                start: spline.end,
                control1: spline.control2,
                control2: spline.control1,
                end: spline.start,
            }),
            Self::Quadratic(spline) => Self::Quadratic(QuadraticSpline {
                start: spline.end,
                control: spline.control,
                end: spline.start,
            }),
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let shift = |p: Coordinate| p.offset(dx, dy);
        match self {
            Self::Line(line) => Self::Line(Line::new(shift(line.start), shift(line.end))),
            Self::Arc(arc) => Self::Arc(CircularArc {
                centre: shift(arc.centre),
                ..*arc
            }),
            Self::PolyLine(poly) => Self::PolyLine(poly.map(shift)),
            Self::Cubic(spline) => Self::Cubic(spline.map(shift)),
            Self::Quadratic(spline) => Self::Quadratic(spline.map(shift)),
        }
    }

    /// Points along the segment, first and last exactly at its ends.
    ///
    /// Curved segments are sampled at the resolution's angular step and then
    /// reduced to `max_error`.
    pub fn flatten(&self, max_error: f64, resolution: &Resolution) -> Vec<Coordinate> {
        match self {
            Self::Line(line) => vec![line.start, line.end],
            Self::PolyLine(poly) => poly.points.clone(),
            Self::Arc(arc) => {
                let sampled = circle_points(
                    arc.start_angle,
                    arc.end_angle,
                    resolution.angle_step(),
                    arc.radius,
                    arc.centre,
                )
                .unwrap_or_else(|_| vec![arc.start(), arc.end()]);
                linear_reduction(&sampled, max_error)
            }
            Self::Cubic(spline) => {
                let sampled = sample_unit_interval(resolution, |t| spline.point_at(t));
                linear_reduction(&sampled, max_error)
            }
            Self::Quadratic(spline) => {
                let sampled = sample_unit_interval(resolution, |t| spline.point_at(t));
                linear_reduction(&sampled, max_error)
            }
        }
    }
}

/// Samples `t` over [0, 1] with a count tied to the resolution.
fn sample_unit_interval(
    resolution: &Resolution,
    point_at: impl Fn(f64) -> Coordinate,
) -> Vec<Coordinate> {
    let count = (resolution.points_per_rotation as usize / 8).max(16);
    (0..=count)
        .map(|i| point_at(i as f64 / count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_arc_normalises_direction() {
        let ccw = CircularArc::new(Coordinate::ORIGIN, 1.0, 0.5, -0.5, false);
        assert!((ccw.sweep() - (TAU - 1.0)).abs() < 1e-12);

        let cw = CircularArc::new(Coordinate::ORIGIN, 1.0, -0.5, 0.5, true);
        assert!((cw.sweep() + (TAU - 1.0)).abs() < 1e-12);

        let kept = CircularArc::new(Coordinate::ORIGIN, 1.0, 0.25, 1.0, false);
        assert_eq!(kept.end_angle, 1.0);
    }

    #[test]
    fn test_arc_bounds_include_quadrants() {
        let arc = CircularArc::new(Coordinate::ORIGIN, 2.0, -0.25 * PI, 0.25 * PI, false);
        let b = CurveSegment::Arc(arc).bounds();
        assert!((b.max_x - 2.0).abs() < 1e-12);

        let reversed = CurveSegment::Arc(arc).reversed();
        assert!((reversed.bounds().max_x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_arc_reflect_is_exact_mirror() {
        let arc = CurveSegment::Arc(CircularArc::new(
            Coordinate::new(1.0, 0.5),
            3.0,
            0.1,
            1.3,
            false,
        ));
        let mirrored = arc.reflect_y();
        assert!(mirrored.start().approx_eq(arc.start().conjugate(), 1e-12));
        assert!(mirrored.end().approx_eq(arc.end().conjugate(), 1e-12));
        assert_eq!(mirrored.reflect_y(), arc);
    }

    #[test]
    fn test_reversed_swaps_ends() {
        let segments = [
            CurveSegment::Line(Line::new(Coordinate::ORIGIN, Coordinate::new(1.0, 2.0))),
            CurveSegment::Arc(CircularArc::new(Coordinate::ORIGIN, 1.0, 0.0, 1.0, false)),
            CurveSegment::PolyLine(
                PolyLine::new(vec![
                    Coordinate::ORIGIN,
                    Coordinate::new(1.0, 0.0),
                    Coordinate::new(1.0, 1.0),
                ])
                .unwrap(),
            ),
            CurveSegment::Quadratic(QuadraticSpline {
                start: Coordinate::ORIGIN,
                control: Coordinate::new(1.0, 1.0),
                end: Coordinate::new(2.0, 0.0),
            }),
        ];
        for segment in &segments {
            let reversed = segment.reversed();
            assert_eq!(reversed.start(), segment.end());
            assert_eq!(reversed.end(), segment.start());
        }
    }

    #[test]
    fn test_spline_bounds() {
        let quad = CurveSegment::Quadratic(QuadraticSpline {
            start: Coordinate::ORIGIN,
            control: Coordinate::new(1.0, 2.0),
            end: Coordinate::new(2.0, 0.0),
        });
        assert!((quad.bounds().max_y - 1.0).abs() < 1e-12);

        let cubic = CurveSegment::Cubic(CubicSpline {
            start: Coordinate::ORIGIN,
            control1: Coordinate::new(0.0, 4.0),
            control2: Coordinate::new(4.0, 4.0),
            end: Coordinate::new(4.0, 0.0),
        });
        assert!((cubic.bounds().max_y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_flatten_ends_exact() {
        let arc = CurveSegment::Arc(CircularArc::new(Coordinate::new(2.0, 1.0), 4.0, 0.3, 2.1, false));
        let points = arc.flatten(0.001, &Resolution::coarse());
        assert_eq!(points[0], arc.start());
        assert_eq!(*points.last().unwrap(), arc.end());
        assert!(points.len() > 2);
    }

    #[test]
    fn test_translated_and_rotated() {
        let line = CurveSegment::Line(Line::new(Coordinate::new(1.0, 0.0), Coordinate::new(2.0, 0.0)));
        let moved = line.translated(0.0, 3.0);
        assert_eq!(moved.start(), Coordinate::new(1.0, 3.0));
        let turned = line.rotated_by(PI / 2.0);
        assert!(turned.end().approx_eq(Coordinate::new(0.0, 2.0), 1e-12));
    }

    #[test]
    fn test_polyline_needs_two_points() {
        assert!(PolyLine::new(vec![Coordinate::ORIGIN]).is_err());
    }

    #[test]
    fn test_polyline_deserialize_checks_points() {
        assert!(serde_json::from_str::<PolyLine>(r#"{"points": []}"#).is_err());
        assert!(serde_json::from_str::<PolyLine>(r#"{"points": [{"x": 1.0, "y": 2.0}]}"#).is_err());

        let poly: PolyLine =
            serde_json::from_str(r#"{"points": [{"x": 0.0, "y": 0.0}, {"x": 3.0, "y": 4.0}]}"#).unwrap();
        assert_eq!(poly.end(), Coordinate::new(3.0, 4.0));
    }
}
