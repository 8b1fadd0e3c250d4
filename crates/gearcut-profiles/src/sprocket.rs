//! Sprockets for roller chain.
//!
//! The outline is the space left around the rollers: a seating arc slightly
//! larger than the roller, a flank arc centred on the neighbouring roller so
//! a roller can leave its seat without snagging, and the rim at the
//! standard outside diameter.

use crate::error::{non_negative, positive, tooth_count, ParameterResult, ProfileResult};
use crate::outline::{origin_arc, symmetric_tooth, ToothOutline};
use gearcut_core::curve::{CircularArc, CurveSegment, DrawablePath};
use gearcut_core::geometry::{circle_circle_intersections, Coordinate};
use gearcut_core::units::inches_to_mm;
use gearcut_core::Resolution;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;
use tracing::{debug, warn};

pub const MIN_SPROCKET_TEETH: usize = 5;

/// Standard ANSI roller chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainSize {
    Ansi25,
    Ansi35,
    Ansi40,
    Ansi50,
    Ansi60,
    Ansi80,
}

impl ChainSize {
    pub const ALL: [ChainSize; 6] = [
        ChainSize::Ansi25,
        ChainSize::Ansi35,
        ChainSize::Ansi40,
        ChainSize::Ansi50,
        ChainSize::Ansi60,
        ChainSize::Ansi80,
    ];

    /// Pitch and roller diameter in inches.
    fn inches(&self) -> (f64, f64) {
        match self {
            ChainSize::Ansi25 => (0.25, 0.130),
            ChainSize::Ansi35 => (0.375, 0.200),
            ChainSize::Ansi40 => (0.5, 0.312),
            ChainSize::Ansi50 => (0.625, 0.400),
            ChainSize::Ansi60 => (0.75, 0.469),
            ChainSize::Ansi80 => (1.0, 0.625),
        }
    }

    pub fn pitch(&self) -> f64 {
        inches_to_mm(self.inches().0)
    }

    pub fn roller_diameter(&self) -> f64 {
        inches_to_mm(self.inches().1)
    }
}

impl fmt::Display for ChainSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = match self {
            ChainSize::Ansi25 => 25,
            ChainSize::Ansi35 => 35,
            ChainSize::Ansi40 => 40,
            ChainSize::Ansi50 => 50,
            ChainSize::Ansi60 => 60,
            ChainSize::Ansi80 => 80,
        };
        write!(f, "#{}", number)
    }
}

/// Roller chain sprocket parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollerSprocketParameters {
    /// Number of teeth
    pub teeth: usize,
    /// Chain pitch, in millimetres
    pub pitch: f64,
    /// Roller diameter, in millimetres
    pub roller_diameter: f64,
    /// Diameter of the cutter, zero for none
    pub cutter_diameter: f64,
    /// Largest deviation allowed when flattening curves
    pub max_error: f64,
}

impl Default for RollerSprocketParameters {
    fn default() -> Self {
        Self::for_chain(ChainSize::Ansi40, 12)
    }
}

impl RollerSprocketParameters {
    /// Parameters for a standard chain.
    pub fn for_chain(chain: ChainSize, teeth: usize) -> Self {
        Self {
            teeth,
            pitch: chain.pitch(),
            roller_diameter: chain.roller_diameter(),
            cutter_diameter: 0.0,
            max_error: 0.01,
        }
    }

    pub fn validate(&self) -> ParameterResult<()> {
        tooth_count("teeth", self.teeth, MIN_SPROCKET_TEETH)?;
        positive("pitch", self.pitch)?;
        positive("roller diameter", self.roller_diameter)?;
        non_negative("cutter diameter", self.cutter_diameter)?;
        positive("max error", self.max_error)?;
        Ok(())
    }

    pub fn short_name(&self) -> String {
        format!(
            "sprocket_z{}_p{}_r{}_c{}",
            self.teeth, self.pitch, self.roller_diameter, self.cutter_diameter
        )
    }
}

/// Pitch diameter of a sprocket: the circle through the roller centres.
pub fn pitch_diameter(teeth: usize, pitch: f64) -> f64 {
    pitch / (PI / teeth as f64).sin()
}

/// Seating radius for a roller of `roller_radius`.
pub fn seating_radius(roller_radius: f64) -> f64 {
    1.005 * roller_radius + 0.0381
}

/// Standard outside diameter.
pub fn outside_diameter(teeth: usize, pitch: f64) -> f64 {
    pitch * (0.6 + 1.0 / (PI / teeth as f64).tan())
}

/// One tooth between the rollers seated at `-π/N` and `π/N`, and the radius
/// of the seat bottoms.
pub(crate) fn seat_tooth(teeth: usize, pitch: f64, roller_radius: f64) -> Result<(DrawablePath, f64), String> {
    let tooth_angle = TAU / teeth as f64;
    let pitch_radius = pitch_diameter(teeth, pitch) / 2.0;
    let seat = seating_radius(roller_radius);
    let outside = outside_diameter(teeth, pitch) / 2.0;

    if seat >= pitch / 2.0 {
        return Err(format!(
            "Rollers of diameter {:.3} mm overlap at a pitch of {:.3} mm",
            2.0 * roller_radius,
            pitch
        ));
    }

    let previous = Coordinate::from_polar(pitch_radius, -tooth_angle / 2.0);
    let next = Coordinate::from_polar(pitch_radius, tooth_angle / 2.0);
    let toward_next = (next - previous).normalized().ok_or("Roller centres coincide")?;
    let seat_bottom = Coordinate::from_polar(pitch_radius - seat, -tooth_angle / 2.0);
    let seat_top = previous + toward_next * seat;
    let flank_radius = pitch - seat;

    let flank_start = (seat_top - next).phase();
    let flank_end = circle_circle_intersections(Coordinate::ORIGIN, outside, next, flank_radius)
        .into_iter()
        .min_by(|a, b| {
            let sweep_a = ((*a - next).phase() - flank_start).rem_euclid(TAU);
            let sweep_b = ((*b - next).phase() - flank_start).rem_euclid(TAU);
            sweep_a.total_cmp(&sweep_b)
        })
        .ok_or("Outside circle misses the tooth flank")?;
    if flank_end.phase() >= 0.0 {
        return Err("Tooth flanks meet inside the outside circle".to_string());
    }

    let mut lower = vec![
        CurveSegment::Arc(CircularArc::between(previous, seat_bottom, seat_top, true)),
        CurveSegment::Arc(CircularArc::between(next, seat_top, flank_end, false)),
    ];
    lower.extend(origin_arc(outside, flank_end.phase(), 0.0, false));
    Ok((symmetric_tooth(DrawablePath::open(lower)), pitch_radius - seat))
}

/// A roller chain sprocket.
#[derive(Debug, Clone)]
pub struct RollerSprocket {
    parameters: RollerSprocketParameters,
    outline: ToothOutline,
}

impl RollerSprocket {
    pub fn new(parameters: RollerSprocketParameters, resolution: &Resolution) -> ProfileResult<Self> {
        parameters.validate()?;
        resolution.validate()?;

        let p = &parameters;
        let pitch_diameter = pitch_diameter(p.teeth, p.pitch);
        let mut outline = ToothOutline::new(
            p.short_name(),
            p.teeth,
            pitch_diameter / p.teeth as f64,
            p.max_error,
        );
        outline.note_length("Pitch diameter", pitch_diameter);
        outline.note_length("Outside diameter", outside_diameter(p.teeth, p.pitch));

        let roller_radius = p.roller_diameter / 2.0;
        if roller_radius < p.cutter_diameter / 2.0 {
            warn!(
                roller_diameter = p.roller_diameter,
                cutter_diameter = p.cutter_diameter,
                "roller smaller than the cutter"
            );
            outline.note(format!(
                "Cutter of diameter {:.3} mm cannot cut a seat for rollers of {:.3} mm; no outline produced",
                p.cutter_diameter, p.roller_diameter
            ));
            outline.set_inner_diameter(pitch_diameter - 2.0 * seating_radius(roller_radius));
        } else {
            outline.set_cut_diameter(p.cutter_diameter);
            match seat_tooth(p.teeth, p.pitch, roller_radius) {
                Ok((tooth, seat_bottom)) => {
                    outline.note_length("Seat bottom diameter", 2.0 * seat_bottom);
                    outline.set_inner_diameter(2.0 * seat_bottom);
                    outline.set_tooth(tooth, resolution);
                }
                Err(message) => {
                    warn!(teeth = p.teeth, "sprocket failed: {}", message);
                    outline.fail(message);
                }
            }
        }

        debug!(
            teeth = parameters.teeth,
            pitch = parameters.pitch,
            pitch_diameter,
            "roller sprocket synthesized"
        );
        Ok(Self {
            parameters,
            outline,
        })
    }

    pub fn parameters(&self) -> &RollerSprocketParameters {
        &self.parameters
    }

    pub fn outline(&self) -> &ToothOutline {
        &self.outline
    }

    pub fn pitch_diameter(&self) -> f64 {
        pitch_diameter(self.parameters.teeth, self.parameters.pitch)
    }

    pub fn outside_diameter(&self) -> f64 {
        outside_diameter(self.parameters.teeth, self.parameters.pitch)
    }
}
