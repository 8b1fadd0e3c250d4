//! Ratchet wheels: straight ramps climbing from the root to the tip, each
//! ending in a radial catch face.
//!
//! With a cutter the corner at the foot of each catch face becomes a fillet
//! of the cutter radius, tangent to both the face and the next ramp. A
//! cutter so large that the fillet swallows the catch face cannot make a
//! working ratchet; the cutter is then ignored and no outline is produced.

use crate::error::{non_negative, positive, tooth_count, ParameterError, ParameterResult, ProfileResult};
use crate::outline::ToothOutline;
use gearcut_core::curve::{CircularArc, CurveSegment, DrawablePath, Line};
use gearcut_core::geometry::Coordinate;
use gearcut_core::Resolution;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::{debug, warn};

pub const MIN_RATCHET_TEETH: usize = 3;

/// Ratchet wheel parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatchetParameters {
    /// Number of teeth
    pub teeth: usize,
    /// Outside diameter per tooth, in millimetres
    pub module: f64,
    /// Height of the catch face, in millimetres
    pub tooth_depth: f64,
    /// Diameter of the cutter, zero for a sharp corner
    pub cutter_diameter: f64,
    /// Largest deviation allowed when flattening curves
    pub max_error: f64,
}

impl Default for RatchetParameters {
    fn default() -> Self {
        Self {
            teeth: 24,
            module: 1.0,
            tooth_depth: 1.5,
            cutter_diameter: 0.5,
            max_error: 0.01,
        }
    }
}

impl RatchetParameters {
    pub fn validate(&self) -> ParameterResult<()> {
        tooth_count("teeth", self.teeth, MIN_RATCHET_TEETH)?;
        positive("module", self.module)?;
        positive("tooth depth", self.tooth_depth)?;
        non_negative("cutter diameter", self.cutter_diameter)?;
        positive("max error", self.max_error)?;
        if self.tooth_depth >= self.outside_radius() {
            return Err(ParameterError::InvalidDimensions(format!(
                "tooth depth {} must be less than the outside radius {}",
                self.tooth_depth,
                self.outside_radius()
            )));
        }
        Ok(())
    }

    pub fn short_name(&self) -> String {
        format!(
            "ratchet_z{}_m{}_d{}_c{}",
            self.teeth, self.module, self.tooth_depth, self.cutter_diameter
        )
    }

    fn outside_radius(&self) -> f64 {
        self.teeth as f64 * self.module / 2.0
    }
}

/// Fillet between a catch face and the following ramp.
struct Fillet {
    /// Where the fillet leaves the catch face
    face_end: Coordinate,
    arc: CircularArc,
    /// Where the fillet meets the following ramp
    ramp_start: Coordinate,
}

/// A ratchet wheel.
#[derive(Debug, Clone)]
pub struct RatchetWheel {
    parameters: RatchetParameters,
    outline: ToothOutline,
}

impl RatchetWheel {
    pub fn new(parameters: RatchetParameters, resolution: &Resolution) -> ProfileResult<Self> {
        parameters.validate()?;
        resolution.validate()?;

        let mut outline = ToothOutline::new(
            parameters.short_name(),
            parameters.teeth,
            parameters.module,
            parameters.max_error,
        );
        let outside = parameters.outside_radius();
        let root = outside - parameters.tooth_depth;
        outline.set_inner_diameter(2.0 * root);
        outline.note_length("Outside diameter", 2.0 * outside);
        outline.note_length("Root diameter", 2.0 * root);

        let mut wheel = Self {
            parameters,
            outline,
        };
        let tooth_angle = TAU / wheel.parameters.teeth as f64;
        let tip = Coordinate::from_polar(outside, tooth_angle);

        if wheel.parameters.cutter_diameter == 0.0 {
            let foot = Coordinate::from_polar(root, tooth_angle);
            let tooth = DrawablePath::open(vec![
                CurveSegment::Line(Line::new(Coordinate::new(root, 0.0), tip)),
                CurveSegment::Line(Line::new(tip, foot)),
            ]);
            wheel.outline.set_tooth(tooth, resolution);
        } else {
            match wheel.fillet(tooth_angle, root, outside) {
                Some(fillet) => {
                    let ramp_start = fillet.ramp_start.rotate(-tooth_angle);
                    let tooth = DrawablePath::open(vec![
                        CurveSegment::Line(Line::new(ramp_start, tip)),
                        CurveSegment::Line(Line::new(tip, fillet.face_end)),
                        CurveSegment::Arc(fillet.arc),
                    ]);
                    wheel.outline.set_cut_diameter(wheel.parameters.cutter_diameter);
                    wheel.outline.set_tooth(tooth, resolution);
                }
                None => {
                    warn!(
                        cutter_diameter = wheel.parameters.cutter_diameter,
                        "cutter too large for a square ratchet catch"
                    );
                    wheel.outline.note(format!(
                        "Cutter of diameter {:.3} mm leaves no square catch; cutter disabled and no outline produced",
                        wheel.parameters.cutter_diameter
                    ));
                }
            }
        }

        debug!(
            teeth = wheel.parameters.teeth,
            cut_diameter = wheel.outline.cut_diameter(),
            "ratchet wheel synthesized"
        );
        Ok(wheel)
    }

    /// Fillet at the foot of the catch face at `tooth_angle`, or `None` when
    /// it would not leave part of the face and part of the ramp standing.
    fn fillet(&self, tooth_angle: f64, root: f64, outside: f64) -> Option<Fillet> {
        let radius = self.parameters.cutter_diameter / 2.0;
        let radial = Coordinate::from_polar(1.0, tooth_angle);
        let tangent = radial.perpendicular();

        let ramp_foot = Coordinate::from_polar(root, tooth_angle);
        let ramp_top = Coordinate::from_polar(outside, 2.0 * tooth_angle);
        let ramp = ramp_top - ramp_foot;
        let ramp_length = ramp.magnitude();
        let along = ramp.normalized()?;
        let mut normal = along.perpendicular();
        if normal.dot(radial) < 0.0 {
            normal = -normal;
        }

        let face_depth = (radius - radius * tangent.dot(normal) + ramp_foot.dot(normal)) / radial.dot(normal);
        if face_depth >= outside {
            return None;
        }
        let centre = radial * face_depth + tangent * radius;
        let ramp_start = centre - normal * radius;
        if (ramp_start - ramp_foot).dot(along) >= ramp_length {
            return None;
        }

        let face_end = radial * face_depth;
        Some(Fillet {
            face_end,
            arc: CircularArc::between(centre, face_end, ramp_start, true),
            ramp_start,
        })
    }

    pub fn parameters(&self) -> &RatchetParameters {
        &self.parameters
    }

    pub fn outline(&self) -> &ToothOutline {
        &self.outline
    }
}
