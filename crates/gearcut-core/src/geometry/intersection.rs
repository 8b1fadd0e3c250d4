//! Line and circle constructions, and the sampled-curve crossing search.

use super::Coordinate;

/// Centres of the two circles of `radius` passing through `p0` and `p1`.
///
/// The first centre lies to the left of the direction `p0 -> p1`, the second
/// to the right. `None` when the points coincide or are further apart than
/// the diameter.
pub fn circle_centres(
    p0: Coordinate,
    p1: Coordinate,
    radius: f64,
) -> Option<(Coordinate, Coordinate)> {
    let chord = p1 - p0;
    let length = chord.magnitude();
    if length == 0.0 || length > 2.0 * radius {
        return None;
    }
    let mid = p0.lerp(p1, 0.5);
    let height = (radius * radius - length * length / 4.0).max(0.0).sqrt();
    let left = chord.perpendicular() * (height / length);
    Some((mid + left, mid - left))
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
///
/// Falls back to the distance to `a` when the line is degenerate.
pub fn perpendicular_distance(p: Coordinate, a: Coordinate, b: Coordinate) -> f64 {
    let direction = b - a;
    let length = direction.magnitude();
    if length == 0.0 {
        return p.distance_to(a);
    }
    direction.cross(p - a).abs() / length
}

/// Points where the infinite line through `a` and `b` meets a circle,
/// ordered by their position along `a -> b`.
pub fn line_circle_intersections(
    a: Coordinate,
    b: Coordinate,
    centre: Coordinate,
    radius: f64,
) -> Vec<Coordinate> {
    let d = b - a;
    let f = a - centre;
    let qa = d.dot(d);
    if qa == 0.0 {
        return Vec::new();
    }
    let qb = 2.0 * f.dot(d);
    let qc = f.dot(f) - radius * radius;
    let discriminant = qb * qb - 4.0 * qa * qc;
    if discriminant < 0.0 {
        return Vec::new();
    }
    if discriminant == 0.0 {
        return vec![a + d * (-qb / (2.0 * qa))];
    }
    let root = discriminant.sqrt();
    let t0 = (-qb - root) / (2.0 * qa);
    let t1 = (-qb + root) / (2.0 * qa);
    vec![a + d * t0, a + d * t1]
}

/// Intersections of two circles. The first point lies to the left of the
/// line from `c0` to `c1`.
pub fn circle_circle_intersections(
    c0: Coordinate,
    r0: f64,
    c1: Coordinate,
    r1: f64,
) -> Vec<Coordinate> {
    let axis = c1 - c0;
    let d = axis.magnitude();
    if d == 0.0 || d > r0 + r1 || d < (r0 - r1).abs() {
        return Vec::new();
    }
    let along = (r0 * r0 - r1 * r1 + d * d) / (2.0 * d);
    let height = (r0 * r0 - along * along).max(0.0).sqrt();
    let unit = axis * (1.0 / d);
    let foot = c0 + unit * along;
    if height == 0.0 {
        return vec![foot];
    }
    let offset = unit.perpendicular() * height;
    vec![foot + offset, foot - offset]
}

/// Tangent points on a circle as seen from an external `point`.
///
/// The first point is counter-clockwise of the centre-to-point direction
/// (as seen from the centre), the second clockwise.
pub fn tangent_points(
    point: Coordinate,
    centre: Coordinate,
    radius: f64,
) -> Option<(Coordinate, Coordinate)> {
    let to_point = point - centre;
    let d = to_point.magnitude();
    if d <= radius {
        return None;
    }
    let base = to_point.phase();
    let spread = (radius / d).acos();
    Some((
        centre + Coordinate::from_polar(radius, base + spread),
        centre + Coordinate::from_polar(radius, base - spread),
    ))
}

/// Linearly interpolated Y of a polyline whose X values increase, at `x`.
pub fn interpolate_y(points: &[Coordinate], x: f64) -> Option<f64> {
    let first = points.first()?;
    let last = points.last()?;
    if x < first.x || x > last.x {
        return None;
    }
    let upper = points.partition_point(|p| p.x < x);
    if upper == 0 {
        return Some(first.y);
    }
    let (p0, p1) = (points[upper - 1], *points.get(upper)?);
    let span = p1.x - p0.x;
    if span == 0.0 {
        return Some(p1.y);
    }
    Some(p0.y + (p1.y - p0.y) * (x - p0.x) / span)
}

/// Where two sampled curves come closest, measured in Y at a common X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveApproach {
    pub x: f64,
    /// Y of the first curve at `x`
    pub first_y: f64,
    /// Y of the second curve at `x`
    pub second_y: f64,
}

impl CurveApproach {
    pub fn separation(&self) -> f64 {
        (self.first_y - self.second_y).abs()
    }
}

/// Walks two curves over the union of their X samples and returns the first
/// local minimum of their Y separation.
///
/// Both curves must have increasing X. Each is interpolated onto every X of
/// the other within the shared range. The walk stops as soon as the
/// separation starts to grow, so a near miss ahead of a true crossing is
/// reported as the approach point.
pub fn closest_point(first: &[Coordinate], second: &[Coordinate]) -> Option<CurveApproach> {
    let lower = first.first()?.x.max(second.first()?.x);
    let upper = first.last()?.x.min(second.last()?.x);
    if lower > upper {
        return None;
    }

    let mut xs: Vec<f64> = first
        .iter()
        .chain(second.iter())
        .map(|p| p.x)
        .filter(|x| *x >= lower && *x <= upper)
        .collect();
    xs.sort_by(|a, b| a.total_cmp(b));
    xs.dedup();

    let mut best: Option<CurveApproach> = None;
    for x in xs {
        let (Some(first_y), Some(second_y)) = (interpolate_y(first, x), interpolate_y(second, x))
        else {
            continue;
        };
        let candidate = CurveApproach {
            x,
            first_y,
            second_y,
        };
        match best {
            Some(current) if candidate.separation() > current.separation() => break,
            _ => best = Some(candidate),
        }
    }
    best
}
