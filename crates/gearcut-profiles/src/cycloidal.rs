//! Cycloidal gear pairs.
//!
//! Each gear's addendum is an epicycloid traced by a circle half the size of
//! the mating pitch circle, which makes the mate's dedendum flank a straight
//! radial line. The pressure angle is not chosen but falls out of how much
//! of each tooth tip is blunted.

use crate::cutter::lower_root;
use crate::error::{non_negative, positive, tooth_count, within, ParameterResult, ProfileResult};
use crate::outline::{origin_arc, reduced_polyline, sample_between, symmetric_tooth, ToothOutline};
use gearcut_core::curve::DrawablePath;
use gearcut_core::geometry::{epicycloid, root_binary_search, Angle, Coordinate};
use gearcut_core::{GeometryResult, Resolution};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use tracing::{debug, warn};

pub const MIN_CYCLOIDAL_TEETH: usize = 3;

/// Radial clearance between a tooth tip and the mating root, in modules.
const CLEARANCE: f64 = 0.25;

/// Cycloidal gear parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycloidalParameters {
    /// Number of teeth on this gear
    pub teeth: usize,
    /// Number of teeth on the mating gear
    pub mate_teeth: usize,
    /// Pitch diameter per tooth, in millimetres
    pub module: f64,
    /// Fraction of this gear's tip removed: 0 is pointed, 1 stops at the pitch circle
    pub blunting: f64,
    /// Fraction of the mating gear's tip removed
    pub mate_blunting: f64,
    /// Tooth thickness removed at the pitch circle, in millimetres
    pub backlash: f64,
    /// Largest deviation allowed when reducing sampled curves
    pub max_error: f64,
    /// Diameter of the cutter, zero for none
    pub cutter_diameter: f64,
}

impl Default for CycloidalParameters {
    fn default() -> Self {
        Self {
            teeth: 30,
            mate_teeth: 8,
            module: 1.0,
            blunting: 0.3,
            mate_blunting: 0.3,
            backlash: 0.0,
            max_error: 0.01,
            cutter_diameter: 0.0,
        }
    }
}

impl CycloidalParameters {
    pub fn validate(&self) -> ParameterResult<()> {
        tooth_count("teeth", self.teeth, MIN_CYCLOIDAL_TEETH)?;
        tooth_count("mate teeth", self.mate_teeth, MIN_CYCLOIDAL_TEETH)?;
        positive("module", self.module)?;
        within("blunting", self.blunting, 0.0, 1.0)?;
        within("mate blunting", self.mate_blunting, 0.0, 1.0)?;
        non_negative("backlash", self.backlash)?;
        positive("max error", self.max_error)?;
        non_negative("cutter diameter", self.cutter_diameter)?;
        Ok(())
    }

    pub fn short_name(&self) -> String {
        format!(
            "cycloid_z{}_{}_m{}_bl{}_{}_b{}_c{}",
            self.teeth,
            self.mate_teeth,
            self.module,
            self.blunting,
            self.mate_blunting,
            self.backlash,
            self.cutter_diameter
        )
    }

    /// Parameters of the other gear of the pair.
    pub fn mate(&self) -> Self {
        Self {
            teeth: self.mate_teeth,
            mate_teeth: self.teeth,
            blunting: self.mate_blunting,
            mate_blunting: self.blunting,
            ..self.clone()
        }
    }
}

/// Where one gear's epicycloidal addendum ends.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Addendum {
    pitch_radius: f64,
    /// Radius of the circle rolling on the pitch circle
    rolling_radius: f64,
    /// Half the tooth angle at the pitch circle
    half_tooth: f64,
    /// Pitch circle angle rolled through at the tip
    roll: f64,
    tip_radius: f64,
}

impl Addendum {
    fn of(teeth: usize, mate_teeth: usize, module: f64, blunting: f64, backlash: f64) -> GeometryResult<Self> {
        let pitch_radius = teeth as f64 * module / 2.0;
        let rolling_radius = mate_teeth as f64 * module / 4.0;
        let half_tooth = PI / (2.0 * teeth as f64) - backlash / (2.0 * pitch_radius);
        let target = (1.0 - blunting) * half_tooth;

        // Tip direction rises from 0 and never exceeds the roll, so within
        // half a turn the only wrap is PI reported as -PI.
        let tip_direction = |phi: f64| {
            let phase = epicycloid(pitch_radius, rolling_radius, phi).phase();
            if phase < -FRAC_PI_2 {
                phase + TAU
            } else {
                phase
            }
        };
        let roll = if target > 0.0 {
            root_binary_search(
                |phi| tip_direction(phi) - target,
                0.0,
                (PI * rolling_radius / pitch_radius).min(PI),
                1e-12,
            )?
        } else {
            0.0
        };
        Ok(Self {
            pitch_radius,
            rolling_radius,
            half_tooth,
            roll,
            tip_radius: epicycloid(pitch_radius, rolling_radius, roll).magnitude(),
        })
    }

    fn height(&self) -> f64 {
        self.tip_radius - self.pitch_radius
    }

    /// Pitch circle arc over which this addendum is in contact.
    fn arc_of_action(&self) -> f64 {
        self.pitch_radius * self.roll
    }

    /// Pressure angle at the tip, in radians.
    fn tip_pressure_angle(&self) -> f64 {
        self.pitch_radius * self.roll / self.rolling_radius / 2.0
    }
}

/// One gear of a cycloidal pair.
#[derive(Debug, Clone)]
pub struct CycloidalGear {
    parameters: CycloidalParameters,
    outline: ToothOutline,
    addendum: Addendum,
    mate_addendum: Addendum,
    root_radius: f64,
    contact_ratio: f64,
}

impl CycloidalGear {
    pub fn new(parameters: CycloidalParameters, resolution: &Resolution) -> ProfileResult<Self> {
        parameters.validate()?;
        resolution.validate()?;

        let p = &parameters;
        let addendum = Addendum::of(p.teeth, p.mate_teeth, p.module, p.blunting, p.backlash)?;
        let mate_addendum =
            Addendum::of(p.mate_teeth, p.teeth, p.module, p.mate_blunting, p.backlash)?;
        let contact_ratio = (addendum.arc_of_action() + mate_addendum.arc_of_action()) / (PI * p.module);
        let root_radius = addendum.pitch_radius - mate_addendum.height() - CLEARANCE * p.module;

        let mut outline = ToothOutline::new(p.short_name(), p.teeth, p.module, p.max_error);
        outline.set_cut_diameter(p.cutter_diameter);

        let mut gear = Self {
            parameters,
            outline,
            addendum,
            mate_addendum,
            root_radius,
            contact_ratio,
        };
        match gear.build_tooth(resolution) {
            Ok(tooth) => gear.outline.set_tooth(tooth, resolution),
            Err(message) => {
                warn!(teeth = gear.parameters.teeth, "cycloidal gear failed: {}", message);
                gear.outline.fail(message);
            }
        }
        gear.outline.set_inner_diameter(2.0 * gear.root_radius);

        debug!(
            teeth = gear.parameters.teeth,
            mate_teeth = gear.parameters.mate_teeth,
            contact_ratio = gear.contact_ratio,
            pressure_angle = gear.pressure_angle(),
            "cycloidal gear synthesized"
        );
        Ok(gear)
    }

    fn build_tooth(&mut self, resolution: &Resolution) -> Result<DrawablePath, String> {
        let p = self.parameters.clone();
        let add = self.addendum;
        let r = add.pitch_radius;
        let half_pitch = PI / p.teeth as f64;

        self.outline.note_length("Pitch diameter", 2.0 * r);
        self.outline.note_length("Outside diameter", 2.0 * add.tip_radius);
        self.outline.note_length("Root diameter", 2.0 * self.root_radius);
        self.outline
            .note_length("Generating circle diameter", 2.0 * add.rolling_radius);
        self.outline
            .note(format!("Contact ratio: {:.3}", self.contact_ratio));
        self.outline
            .note(format!("Maximum pressure angle: {:.2} degrees", self.pressure_angle()));

        if add.half_tooth <= 0.0 {
            return Err(format!(
                "Backlash of {} mm leaves no tooth at the pitch circle",
                p.backlash
            ));
        }
        if self.contact_ratio < 1.0 {
            return Err(format!(
                "Contact ratio {:.3} is below 1; reduce the blunting",
                self.contact_ratio
            ));
        }
        if self.root_radius <= 0.0 {
            return Err("Root circle collapses to the centre; use more teeth".to_string());
        }

        let flank_angle = -add.half_tooth;
        let step = resolution.angle_step();
        let mut spacing = self.root_radius * step;
        if p.cutter_diameter > 0.0 {
            spacing = spacing.min(p.cutter_diameter / 8.0);
        }
        let radial_steps = (((r - self.root_radius) / spacing).ceil() as usize).max(2);
        let radial: Vec<Coordinate> = (0..=radial_steps)
            .map(|i| {
                let radius = self.root_radius + (r - self.root_radius) * i as f64 / radial_steps as f64;
                Coordinate::from_polar(radius, flank_angle)
            })
            .collect();

        let (mut lower, root_radius) = lower_root(
            &mut self.outline,
            &radial,
            None,
            -half_pitch,
            p.cutter_diameter / 2.0,
            p.max_error,
        )?;
        self.root_radius = root_radius;

        if add.roll > 0.0 {
            let turn = Angle::from_radians(flank_angle);
            let roll_step = step * add.rolling_radius / (r + add.rolling_radius);
            let mut face: Vec<Coordinate> = sample_between(0.0, add.roll, roll_step)
                .map(|phi| epicycloid(r, add.rolling_radius, phi).rotated_by(turn))
                .collect();
            if p.blunting == 0.0 {
                if let Some(tip) = face.last_mut() {
                    *tip = Coordinate::new(tip.magnitude(), 0.0);
                }
            }
            let tip = face.last().copied().ok_or("Addendum curve is empty")?;
            lower.extend(reduced_polyline(&face, p.max_error));
            lower.extend(origin_arc(tip.magnitude(), tip.phase(), 0.0, false));
        } else {
            lower.extend(origin_arc(r, flank_angle, 0.0, false));
        }

        Ok(symmetric_tooth(DrawablePath::open(lower)))
    }

    pub fn parameters(&self) -> &CycloidalParameters {
        &self.parameters
    }

    pub fn outline(&self) -> &ToothOutline {
        &self.outline
    }

    /// The other gear of the pair.
    pub fn mate(&self, resolution: &Resolution) -> ProfileResult<CycloidalGear> {
        CycloidalGear::new(self.parameters.mate(), resolution)
    }

    /// Shared contact ratio of the pair.
    pub fn contact_ratio(&self) -> f64 {
        self.contact_ratio
    }

    /// Largest pressure angle reached by either addendum, in degrees.
    pub fn pressure_angle(&self) -> f64 {
        self.addendum
            .tip_pressure_angle()
            .max(self.mate_addendum.tip_pressure_angle())
            .to_degrees()
    }

    pub fn pitch_diameter(&self) -> f64 {
        2.0 * self.addendum.pitch_radius
    }

    pub fn outside_diameter(&self) -> f64 {
        2.0 * self.addendum.tip_radius
    }

    pub fn root_diameter(&self) -> f64 {
        2.0 * self.root_radius
    }
}
