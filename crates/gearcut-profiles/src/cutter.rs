//! Rounds the root corner of a tooth gap to the radius of the cutter that
//! will machine it.
//!
//! The flank is walked from the top down. For each consecutive pair of
//! points the cutter circle through both is placed on the gap side; once the
//! following point falls inside that circle the cutter can no longer follow
//! the flank. From there the outline follows the cutter circle until it meets
//! either a new, deeper root circle or the centre line of the gap.

use crate::outline::{origin_arc, reduced_polyline, ToothOutline};
use gearcut_core::curve::{CircularArc, CurveSegment};
use gearcut_core::geometry::{circle_centres, line_circle_intersections, Coordinate};
use std::f64::consts::{PI, TAU};
use tracing::{debug, warn};

const GOUGE_TOLERANCE: f64 = 1e-9;

/// Replacement geometry for the bottom of a flank.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Compensation {
    /// Radius of the new root circle, or of the point where the cutter arc
    /// meets the gap centre line.
    pub root_radius: f64,
    /// Root arc from the gap centre line to the start of the cutter arc.
    /// Absent when the cutter arc itself reaches the centre line.
    pub root_arc: Option<CircularArc>,
    /// Clockwise arc following the cutter, ending on the flank.
    pub cutter_arc: CircularArc,
    /// Index of the flank point where the cutter arc ends; the flank is kept
    /// from here upward.
    pub flank_start: usize,
    /// The cutter is wider than the gap at the root.
    pub gap_too_narrow: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CompensationOutcome {
    /// The cutter follows the whole flank.
    Unneeded,
    Applied(Compensation),
    /// The cutter circle reaches the gear centre.
    Impossible(String),
}

/// Compensates the lower side of a tooth.
///
/// `flank` runs upward from the point where it leaves the root circle. The
/// gap centre line lies at `gap_angle`, clockwise of the flank.
pub(crate) fn compensate(flank: &[Coordinate], gap_angle: f64, cutter_radius: f64) -> CompensationOutcome {
    if cutter_radius <= 0.0 || flank.len() < 2 {
        return CompensationOutcome::Unneeded;
    }

    let bottom = flank[0];
    let root_radius = bottom.magnitude();
    let spacing = bottom.distance_to(flank[1]);
    let extra = Coordinate::from_polar(root_radius, bottom.phase() - spacing / root_radius);

    let walk: Vec<Coordinate> = flank
        .iter()
        .rev()
        .copied()
        .chain(std::iter::once(extra))
        .collect();

    let Some((index, centre)) = walk.windows(3).enumerate().find_map(|(k, w)| {
        let (left, _) = circle_centres(w[0], w[1], cutter_radius)?;
        (w[2].distance_to(left) < cutter_radius * (1.0 - GOUGE_TOLERANCE)).then_some((k + 1, left))
    }) else {
        return CompensationOutcome::Unneeded;
    };

    let reach = walk[index];
    let flank_start = flank.len() - 1 - index;
    let distance = centre.magnitude();
    if distance <= cutter_radius {
        return CompensationOutcome::Impossible(format!(
            "Cutter of diameter {:.3} mm reaches the gear centre",
            2.0 * cutter_radius
        ));
    }

    let reach_angle = (reach - centre).phase();
    let centre_angle = centre.phase();

    if centre_angle >= gap_angle {
        let new_root = distance - cutter_radius;
        debug!(
            old_root = root_radius,
            new_root, flank_start, "cutter compensation deepened the root"
        );
        return CompensationOutcome::Applied(Compensation {
            root_radius: new_root,
            root_arc: Some(CircularArc::new(
                Coordinate::ORIGIN,
                new_root,
                gap_angle,
                centre_angle,
                false,
            )),
            cutter_arc: CircularArc::new(centre, cutter_radius, centre_angle + PI, reach_angle, true),
            flank_start,
            gap_too_narrow: false,
        });
    }

    // The cutter centre lies past the gap centre line: the cutter arc ends
    // where it first meets that line, walking counter-clockwise from the flank.
    let direction = Coordinate::from_polar(1.0, gap_angle);
    let meeting = line_circle_intersections(Coordinate::ORIGIN, direction, centre, cutter_radius)
        .into_iter()
        .filter(|q| q.dot(direction) > 0.0)
        .min_by(|a, b| {
            let sweep_a = ((*a - centre).phase() - reach_angle).rem_euclid(TAU);
            let sweep_b = ((*b - centre).phase() - reach_angle).rem_euclid(TAU);
            sweep_a.total_cmp(&sweep_b)
        });
    let Some(meeting) = meeting else {
        return CompensationOutcome::Impossible(format!(
            "Cutter of diameter {:.3} mm does not fit the tooth gap",
            2.0 * cutter_radius
        ));
    };

    debug!(
        old_root = root_radius,
        new_root = meeting.magnitude(),
        "cutter is wider than the tooth gap"
    );
    CompensationOutcome::Applied(Compensation {
        root_radius: meeting.magnitude(),
        root_arc: None,
        cutter_arc: CircularArc::new(
            centre,
            cutter_radius,
            (meeting - centre).phase(),
            reach_angle,
            true,
        ),
        flank_start,
        gap_too_narrow: true,
    })
}

/// Builds the bottom of the lower side of a tooth: the root arc from the gap
/// centre line, the cutter arc when the cutter cannot follow the flank, and
/// the flank itself as a reduced polyline ending at `tail`.
///
/// Returns the segments and the root radius they reach. A compensation is
/// reported in the outline's information text.
pub(crate) fn lower_root(
    outline: &mut ToothOutline,
    flank: &[Coordinate],
    tail: Option<Coordinate>,
    gap_angle: f64,
    cutter_radius: f64,
    max_error: f64,
) -> Result<(Vec<CurveSegment>, f64), String> {
    let bottom = *flank.first().ok_or("Tooth flank is empty")?;
    let root_radius = bottom.magnitude();
    let finish = |points: &[Coordinate]| {
        let mut points = points.to_vec();
        if let Some(tail) = tail {
            if points.last().is_some_and(|p| !p.approx_eq(tail, 1e-12)) {
                points.push(tail);
            }
        }
        reduced_polyline(&points, max_error)
    };

    let mut segments = Vec::new();
    match compensate(flank, gap_angle, cutter_radius) {
        CompensationOutcome::Unneeded => {
            segments.extend(origin_arc(root_radius, gap_angle, bottom.phase(), false));
            segments.extend(finish(flank));
            Ok((segments, root_radius))
        }
        CompensationOutcome::Applied(comp) => {
            warn!(
                old_root = 2.0 * root_radius,
                new_root = 2.0 * comp.root_radius,
                "cutter compensation applied"
            );
            outline.note(format!(
                "Cutter compensation: root diameter reduced from {:.3} mm to {:.3} mm",
                2.0 * root_radius,
                2.0 * comp.root_radius
            ));
            if comp.gap_too_narrow {
                warn!(cutter_radius, "tooth gap narrower than the cutter");
                outline.note("Warning: the tooth gap at the root is narrower than the cutter");
            }
            segments.extend(comp.root_arc.map(CurveSegment::Arc));
            segments.push(CurveSegment::Arc(comp.cutter_arc));
            segments.extend(finish(&flank[comp.flank_start..]));
            Ok((segments, comp.root_radius))
        }
        CompensationOutcome::Impossible(message) => Err(message),
    }
}
