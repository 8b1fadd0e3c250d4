//! Tolerance-based point reduction.

use super::intersection::perpendicular_distance;
use super::Coordinate;

/// Drops points that lie within `max_error` of the chord replacing them.
///
/// Douglas–Peucker: the point furthest from the chord between the retained
/// ends is kept when it deviates by more than `max_error`, and both halves are
/// examined in turn. The first and last points always survive, every removed
/// point lies within `max_error` of the chord that replaced it, and running
/// the reduction again at the same tolerance changes nothing.
pub fn linear_reduction(points: &[Coordinate], max_error: f64) -> Vec<Coordinate> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let tolerance = max_error.max(0.0);

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut pending = vec![(0usize, points.len() - 1)];
    while let Some((start, end)) = pending.pop() {
        if end <= start + 1 {
            continue;
        }
        let (a, b) = (points[start], points[end]);
        let mut worst = start;
        let mut worst_distance = 0.0;
        for (offset, p) in points[start + 1..end].iter().enumerate() {
            let distance = perpendicular_distance(*p, a, b);
            if distance > worst_distance {
                worst_distance = distance;
                worst = start + 1 + offset;
            }
        }
        if worst_distance > tolerance {
            keep[worst] = true;
            pending.push((worst, end));
            pending.push((start, worst));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, kept)| kept.then_some(*p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collinear_points_collapse() {
        let points: Vec<_> = (0..20).map(|i| Coordinate::new(i as f64, 2.0 * i as f64)).collect();
        let reduced = linear_reduction(&points, 1e-9);
        assert_eq!(reduced, vec![points[0], points[19]]);
    }

    #[test]
    fn test_corner_is_kept() {
        let points = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(2.0, 0.0),
            Coordinate::new(2.0, 1.0),
            Coordinate::new(2.0, 2.0),
        ];
        let reduced = linear_reduction(&points, 0.1);
        assert_eq!(
            reduced,
            vec![points[0], Coordinate::new(2.0, 0.0), points[4]]
        );
    }

    #[test]
    fn test_short_inputs_unchanged() {
        let two = [Coordinate::ORIGIN, Coordinate::new(1.0, 1.0)];
        assert_eq!(linear_reduction(&two, 0.5), two.to_vec());
        assert!(linear_reduction(&[], 0.5).is_empty());
    }

    #[test]
    fn test_zero_tolerance_keeps_bends() {
        let arc: Vec<_> = (0..10)
            .map(|i| Coordinate::from_polar(5.0, i as f64 * 0.1))
            .collect();
        assert_eq!(linear_reduction(&arc, 0.0).len(), arc.len());
        assert_eq!(linear_reduction(&arc, -1.0).len(), arc.len());
    }
}
