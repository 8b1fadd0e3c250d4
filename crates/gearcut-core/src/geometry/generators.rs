//! Parametric point generators: circles, involutes, trochoids and cycloids.

use super::Coordinate;
use crate::error::{require_finite, require_positive, GeometryResult};

/// Points on a circle from `start_angle` to `end_angle` at a fixed step.
///
/// The sweep runs in whichever direction `end_angle` lies. The last point is
/// always placed exactly at `end_angle`, so consecutive curves that share an
/// angle meet without a sliver.
pub fn circle_points(
    start_angle: f64,
    end_angle: f64,
    step: f64,
    radius: f64,
    centre: Coordinate,
) -> GeometryResult<Vec<Coordinate>> {
    require_positive("angle step", step)?;
    require_positive("radius", radius)?;
    require_finite("start angle", start_angle)?;
    require_finite("end angle", end_angle)?;

    let sweep = end_angle - start_angle;
    let direction = sweep.signum();
    let steps = (sweep.abs() / step - 1e-9).ceil().max(0.0) as usize;

    let mut points = Vec::with_capacity(steps + 1);
    for i in 0..steps {
        let angle = start_angle + direction * step * i as f64;
        points.push(centre + Coordinate::from_polar(radius, angle));
    }
    points.push(centre + Coordinate::from_polar(radius, end_angle));
    Ok(points)
}

/// A point on an involute of a circle of `radius`, optionally displaced to
/// trace a trochoid.
///
/// The unwrapping string has turned through `phi` radians. The tracing point
/// sits `off_x` further along the string and `off_y` outward from the
/// tangent line, so `off_x = off_y = 0` gives the plain involute. The whole
/// curve is then turned by `phi_offset`.
pub fn involute_plus_offset(
    radius: f64,
    off_x: f64,
    off_y: f64,
    phi: f64,
    phi_offset: f64,
) -> Coordinate {
    let (sin, cos) = phi.sin_cos();
    let normal = Coordinate::new(cos, sin);
    let tangent = Coordinate::new(sin, -cos);
    let along = radius * phi + off_x;
    (normal * (radius + off_y) + tangent * along).rotate(phi_offset)
}

/// Plain involute starting on the positive X axis.
pub fn involute(radius: f64, phi: f64) -> Coordinate {
    involute_plus_offset(radius, 0.0, 0.0, phi, 0.0)
}

/// The involute function `tan(a) - a`: polar angle swept by an involute by
/// the time its pressure angle reaches `a`.
pub fn involute_function(angle: f64) -> f64 {
    angle.tan() - angle
}

/// Point traced by a circle of `locus_radius` rolling outside a circle of
/// `radius`, starting on the positive X axis; `phi` is the angle of the
/// rolling circle's centre.
pub fn epicycloid(radius: f64, locus_radius: f64, phi: f64) -> Coordinate {
    let sum = radius + locus_radius;
    Coordinate::from_polar(sum, phi)
        - Coordinate::from_polar(locus_radius, sum * phi / locus_radius)
}

/// Point traced by a circle of `locus_radius` rolling inside a circle of
/// `radius`. With `locus_radius = radius / 2` this is a diameter.
pub fn hypocycloid(radius: f64, locus_radius: f64, phi: f64) -> Coordinate {
    let difference = radius - locus_radius;
    Coordinate::from_polar(difference, phi)
        + Coordinate::from_polar(locus_radius, -difference * phi / locus_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_circle_points_end_exact() {
        let points = circle_points(0.0, 1.0, 0.3, 2.0, Coordinate::ORIGIN).unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[4], Coordinate::from_polar(2.0, 1.0));
        assert_eq!(points[0], Coordinate::new(2.0, 0.0));
    }

    #[test]
    fn test_circle_points_reverse_and_centre() {
        let centre = Coordinate::new(1.0, 1.0);
        let points = circle_points(FRAC_PI_2, 0.0, 0.1, 1.0, centre).unwrap();
        assert!(points[1].y < points[0].y);
        assert_eq!(*points.last().unwrap(), centre + Coordinate::new(1.0, 0.0));
        for p in &points {
            assert!((p.distance_to(centre) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_circle_points_rejects_bad_input() {
        assert!(circle_points(0.0, 1.0, 0.0, 1.0, Coordinate::ORIGIN).is_err());
        assert!(circle_points(0.0, 1.0, 0.1, -1.0, Coordinate::ORIGIN).is_err());
        assert_eq!(
            circle_points(0.5, 0.5, 0.1, 1.0, Coordinate::ORIGIN)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_involute_polar_angle() {
        // At pressure angle a the involute radius is r / cos(a) and its polar
        // angle is inv(a).
        let r = 10.0;
        let a: f64 = 0.35;
        let p = involute(r, a.tan());
        assert!((p.magnitude() - r / a.cos()).abs() < 1e-12);
        assert!((p.phase() - involute_function(a)).abs() < 1e-12);
    }

    #[test]
    fn test_trochoid_offsets() {
        // The tracing point starts displaced from the base circle.
        let p = involute_plus_offset(5.0, -1.0, -2.0, 0.0, 0.0);
        assert!(p.approx_eq(Coordinate::new(3.0, 1.0), 1e-12));
        let q = involute_plus_offset(5.0, -1.0, -2.0, 0.0, FRAC_PI_2);
        assert!(q.approx_eq(Coordinate::new(-1.0, 3.0), 1e-12));
    }

    #[test]
    fn test_cycloids_start_on_pitch_circle() {
        assert!(epicycloid(10.0, 3.0, 0.0).approx_eq(Coordinate::new(10.0, 0.0), 1e-12));
        assert!(hypocycloid(10.0, 3.0, 0.0).approx_eq(Coordinate::new(10.0, 0.0), 1e-12));
        // One full arch of the epicycloid returns to the pitch circle.
        let cusp = epicycloid(10.0, 2.5, 2.0 * PI * 2.5 / 10.0);
        assert!((cusp.magnitude() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_half_radius_hypocycloid_is_radial() {
        for phi in [0.1, 0.4, 1.2] {
            let p = hypocycloid(8.0, 4.0, phi);
            assert!(p.y.abs() < 1e-12);
        }
    }
}
