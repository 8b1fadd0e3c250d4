//! Clock escape wheels.
//!
//! Each tooth has a short tip land, a flat locking face leaning back by the
//! undercut angle, a round relief cut by the cutter at the foot of the face,
//! and a straight back running tangent from the relief to the tip of the
//! next tooth. The teeth are not symmetric, so the whole tooth is built
//! directly instead of mirrored.

use crate::error::{non_negative, positive, tooth_count, within, ParameterResult, ProfileResult};
use crate::outline::{origin_arc, ToothOutline};
use gearcut_core::curve::{CircularArc, CurveSegment, DrawablePath, Line};
use gearcut_core::geometry::{tangent_points, Coordinate};
use gearcut_core::Resolution;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::{debug, warn};

pub const MIN_ESCAPEMENT_TEETH: usize = 3;

/// Escape wheel parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapementParameters {
    /// Number of teeth
    pub teeth: usize,
    /// Outside diameter per tooth, in millimetres
    pub module: f64,
    /// Lean of the locking face behind the radial line, in degrees
    pub undercut_angle: f64,
    /// Length of the locking face, in millimetres
    pub face_length: f64,
    /// Width of the land at each tooth tip, in millimetres
    pub tip_thickness: f64,
    /// Diameter of the cutter, which also sizes the relief at the face foot
    pub cutter_diameter: f64,
    /// Largest deviation allowed when flattening curves
    pub max_error: f64,
}

impl Default for EscapementParameters {
    fn default() -> Self {
        Self {
            teeth: 30,
            module: 1.0,
            undercut_angle: 12.0,
            face_length: 3.0,
            tip_thickness: 0.5,
            cutter_diameter: 2.0,
            max_error: 0.01,
        }
    }
}

impl EscapementParameters {
    pub fn validate(&self) -> ParameterResult<()> {
        tooth_count("teeth", self.teeth, MIN_ESCAPEMENT_TEETH)?;
        positive("module", self.module)?;
        within("undercut angle", self.undercut_angle, -45.0, 45.0)?;
        positive("face length", self.face_length)?;
        non_negative("tip thickness", self.tip_thickness)?;
        positive("cutter diameter", self.cutter_diameter)?;
        positive("max error", self.max_error)?;
        Ok(())
    }

    pub fn short_name(&self) -> String {
        format!(
            "escapement_z{}_m{}_u{}_f{}_t{}_c{}",
            self.teeth,
            self.module,
            self.undercut_angle,
            self.face_length,
            self.tip_thickness,
            self.cutter_diameter
        )
    }
}

/// An escape wheel.
#[derive(Debug, Clone)]
pub struct EscapementWheel {
    parameters: EscapementParameters,
    outline: ToothOutline,
    relief_centre: Coordinate,
}

impl EscapementWheel {
    pub fn new(parameters: EscapementParameters, resolution: &Resolution) -> ProfileResult<Self> {
        parameters.validate()?;
        resolution.validate()?;

        let mut outline = ToothOutline::new(
            parameters.short_name(),
            parameters.teeth,
            parameters.module,
            parameters.max_error,
        );
        outline.set_cut_diameter(parameters.cutter_diameter);

        let mut wheel = Self {
            parameters,
            outline,
            relief_centre: Coordinate::ORIGIN,
        };
        match wheel.build_tooth() {
            Ok(tooth) => wheel.outline.set_tooth(tooth, resolution),
            Err(message) => {
                warn!(teeth = wheel.parameters.teeth, "escape wheel failed: {}", message);
                wheel.outline.fail(message);
            }
        }
        wheel.outline.set_inner_diameter(wheel.root_diameter());

        debug!(
            teeth = wheel.parameters.teeth,
            root_diameter = wheel.root_diameter(),
            "escape wheel synthesized"
        );
        Ok(wheel)
    }

    fn build_tooth(&mut self) -> Result<DrawablePath, String> {
        let p = self.parameters.clone();
        let outside = self.outside_radius();
        let relief = p.cutter_diameter / 2.0;
        let pitch_angle = TAU / p.teeth as f64;
        let tip_angle = p.tip_thickness / outside;
        let undercut = p.undercut_angle.to_radians();

        if tip_angle >= pitch_angle {
            return Err("Tip land is wider than the tooth pitch".to_string());
        }

        let face_top = Coordinate::new(outside, 0.0);
        let face_foot = face_top + Coordinate::new(-undercut.cos(), -undercut.sin()) * p.face_length;
        let centre = face_foot + Coordinate::new(-undercut.sin(), undercut.cos()) * relief;
        self.relief_centre = centre;

        self.outline.note_length("Outside diameter", 2.0 * outside);
        if centre.magnitude() <= relief {
            return Err("Locking face reaches the wheel centre; shorten the face".to_string());
        }
        self.outline.note_length("Root diameter", self.root_diameter());

        let next_tip = Coordinate::from_polar(outside, pitch_angle - tip_angle);
        let (first, second) = tangent_points(next_tip, centre, relief)
            .ok_or("The next tooth tip lies inside the relief cut")?;
        let heading = |t: Coordinate| {
            let radial = t - centre;
            // Clockwise travel around the relief.
            let velocity = Coordinate::new(radial.y, -radial.x);
            velocity.dot(next_tip - t)
        };
        let back_start = if heading(first) >= heading(second) {
            first
        } else {
            second
        };

        let relief_arc = CircularArc::between(centre, face_foot, back_start, true);
        let mut segments = Vec::with_capacity(4);
        segments.extend(origin_arc(outside, -tip_angle, 0.0, false));
        segments.push(CurveSegment::Line(Line::new(face_top, face_foot)));
        segments.push(CurveSegment::Arc(relief_arc));
        segments.push(CurveSegment::Line(Line::new(relief_arc.end(), next_tip)));
        Ok(DrawablePath::open(segments))
    }

    pub fn parameters(&self) -> &EscapementParameters {
        &self.parameters
    }

    pub fn outline(&self) -> &ToothOutline {
        &self.outline
    }

    fn outside_radius(&self) -> f64 {
        self.parameters.teeth as f64 * self.parameters.module / 2.0
    }

    pub fn outside_diameter(&self) -> f64 {
        2.0 * self.outside_radius()
    }

    /// Diameter touching the bottom of the relief cuts.
    pub fn root_diameter(&self) -> f64 {
        let relief = self.parameters.cutter_diameter / 2.0;
        (2.0 * (self.relief_centre.magnitude() - relief)).max(0.0)
    }

    /// Centre of the relief cut of the reference tooth.
    pub fn relief_centre(&self) -> Coordinate {
        self.relief_centre
    }
}
