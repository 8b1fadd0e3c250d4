//! Ordered segment sequences forming open or closed outlines.

use super::{CircularArc, CurveSegment};
use crate::geometry::{Bounds, Coordinate};
use crate::resolution::Resolution;
use lyon::math::point;
use lyon::path::Path;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

/// Default gap, in millimetres, below which two segment ends count as joined.
pub const ADJACENCY_TOLERANCE: f64 = 1e-9;

/// Segments drawn end to end.
///
/// The end of each segment is expected to coincide with the start of the
/// next; [`DrawablePath::is_contiguous`] is the one place that is checked.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DrawablePath {
    segments: Vec<CurveSegment>,
    closed: bool,
}

impl DrawablePath {
    pub fn new(segments: Vec<CurveSegment>, closed: bool) -> Self {
        Self { segments, closed }
    }

    pub fn open(segments: Vec<CurveSegment>) -> Self {
        Self::new(segments, false)
    }

    pub fn closed(segments: Vec<CurveSegment>) -> Self {
        Self::new(segments, true)
    }

    /// A single full circle.
    pub fn circle(centre: Coordinate, radius: f64) -> Self {
        Self::closed(vec![CurveSegment::Arc(CircularArc::circle(centre, radius))])
    }

    pub fn push(&mut self, segment: CurveSegment) {
        self.segments.push(segment);
    }

    pub fn extend<I: IntoIterator<Item = CurveSegment>>(&mut self, segments: I) {
        self.segments.extend(segments);
    }

    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<CurveSegment> {
        self.segments
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.segments.first().map(CurveSegment::start)
    }

    pub fn end(&self) -> Option<Coordinate> {
        self.segments.last().map(CurveSegment::end)
    }

    pub fn bounds(&self) -> Bounds {
        self.segments
            .iter()
            .fold(Bounds::empty(), |acc, s| acc.union(s.bounds()))
    }

    pub fn rotated_by(&self, angle: f64) -> Self {
        self.map(|s| s.rotated_by(angle))
    }

    pub fn reflect_y(&self) -> Self {
        self.map(CurveSegment::reflect_y)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        self.map(|s| s.translated(dx, dy))
    }

    /// Same outline traversed backwards.
    pub fn reversed(&self) -> Self {
        Self {
            segments: self.segments.iter().rev().map(CurveSegment::reversed).collect(),
            closed: self.closed,
        }
    }

    fn map(&self, f: impl Fn(&CurveSegment) -> CurveSegment) -> Self {
        Self {
            segments: self.segments.iter().map(f).collect(),
            closed: self.closed,
        }
    }

    /// Index of the first segment whose start is further than `tolerance`
    /// from the previous segment's end. For closed paths the wrap from the
    /// last segment back to the first is reported as index 0.
    pub fn first_discontinuity(&self, tolerance: f64) -> Option<usize> {
        let gap = self
            .segments
            .windows(2)
            .position(|pair| !pair[0].end().approx_eq(pair[1].start(), tolerance));
        if let Some(index) = gap {
            return Some(index + 1);
        }
        match (self.closed, self.start(), self.end()) {
            (true, Some(start), Some(end)) if !end.approx_eq(start, tolerance) => Some(0),
            _ => None,
        }
    }

    pub fn is_contiguous(&self, tolerance: f64) -> bool {
        self.first_discontinuity(tolerance).is_none()
    }

    /// Flattened points with the shared point at each joint emitted once.
    pub fn to_points(&self, max_error: f64, resolution: &Resolution) -> Vec<Coordinate> {
        let mut points: Vec<Coordinate> = Vec::new();
        for segment in &self.segments {
            let flattened = segment.flatten(max_error, resolution);
            let skip = match (points.last(), flattened.first()) {
                (Some(last), Some(first)) if last.approx_eq(*first, ADJACENCY_TOLERANCE) => 1,
                _ => 0,
            };
            points.extend(flattened.into_iter().skip(skip));
        }
        points
    }

    /// Converts to a lyon path for downstream renderers. Arcs become
    /// quadratic Béziers of at most 45 degrees each; a gap between segments
    /// starts a new sub-path.
    pub fn to_lyon_path(&self) -> Path {
        let mut builder = Path::builder();
        let to_point = |c: Coordinate| point(c.x as f32, c.y as f32);
        let mut open = false;
        let mut cursor: Option<Coordinate> = None;

        for segment in &self.segments {
            let start = segment.start();
            let joined = cursor.is_some_and(|c| c.approx_eq(start, ADJACENCY_TOLERANCE));
            if !joined {
                if open {
                    builder.end(false);
                }
                builder.begin(to_point(start));
                open = true;
            }

            match segment {
                CurveSegment::Line(line) => {
                    builder.line_to(to_point(line.end));
                }
                CurveSegment::PolyLine(poly) => {
                    for p in &poly.points()[1..] {
                        builder.line_to(to_point(*p));
                    }
                }
                CurveSegment::Cubic(spline) => {
                    builder.cubic_bezier_to(
                        to_point(spline.control1),
                        to_point(spline.control2),
                        to_point(spline.end),
                    );
                }
                CurveSegment::Quadratic(spline) => {
                    builder.quadratic_bezier_to(to_point(spline.control), to_point(spline.end));
                }
                CurveSegment::Arc(arc) => {
                    let pieces = (arc.sweep().abs() / FRAC_PI_4).ceil().max(1.0) as usize;
                    let step = arc.sweep() / pieces as f64;
                    let control_radius = arc.radius / (step / 2.0).cos();
                    for i in 0..pieces {
                        let a0 = arc.start_angle + step * i as f64;
                        let control = arc.centre + Coordinate::from_polar(control_radius, a0 + step / 2.0);
                        let to = if i + 1 == pieces {
                            arc.end()
                        } else {
                            arc.point_at(a0 + step)
                        };
                        builder.quadratic_bezier_to(to_point(control), to_point(to));
                    }
                }
            }
            cursor = Some(segment.end());
        }

        if open {
            let closes = self.closed && self.first_discontinuity(ADJACENCY_TOLERANCE).is_none();
            builder.end(closes);
        }
        builder.build()
    }
}
