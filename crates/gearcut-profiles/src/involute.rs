//! Involute spur gears as cut by a straight-sided rack.
//!
//! One tooth is built from its lower half: a root arc, the trochoid traced
//! by the rack tip (the undercut), the involute flank and the tip arc. The
//! upper half is the mirror image. Cutter compensation, when requested,
//! replaces the bottom of the trochoid with an arc of the cutter radius.

use crate::cutter::lower_root;
use crate::error::{
    non_negative, positive, tooth_count, within, ParameterResult, ProfileError, ProfileResult,
};
use crate::outline::{
    origin_arc, reduced_polyline, sample_between, symmetric_tooth, ToothOutline,
};
use gearcut_core::curve::DrawablePath;
use gearcut_core::geometry::{
    closest_point, involute_function, involute_plus_offset, root_binary_search, Coordinate,
};
use gearcut_core::{GeometryResult, Resolution};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::ops::RangeInclusive;
use tracing::{debug, warn};

/// Fewest teeth an involute gear may have.
pub const MIN_INVOLUTE_TEETH: usize = 3;

const SEARCH_DELTA: f64 = 1e-12;

/// Involute gear parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoluteParameters {
    /// Number of teeth
    pub teeth: usize,
    /// Pitch diameter per tooth, in millimetres
    pub module: f64,
    /// Pressure angle in degrees
    pub pressure_angle: f64,
    /// Profile shift coefficient, in modules
    pub profile_shift: f64,
    /// Tooth thickness removed at the pitch circle, in millimetres
    pub backlash: f64,
    /// Largest deviation allowed when reducing sampled curves
    pub max_error: f64,
    /// Diameter of the cutter that will machine the gear, zero for none
    pub cutter_diameter: f64,
}

impl Default for InvoluteParameters {
    fn default() -> Self {
        Self {
            teeth: 24,
            module: 1.0,
            pressure_angle: 20.0,
            profile_shift: 0.0,
            backlash: 0.0,
            max_error: 0.01,
            cutter_diameter: 0.0,
        }
    }
}

impl InvoluteParameters {
    pub fn validate(&self) -> ParameterResult<()> {
        tooth_count("teeth", self.teeth, MIN_INVOLUTE_TEETH)?;
        positive("module", self.module)?;
        within("pressure angle", self.pressure_angle, 1.0, 45.0)?;
        within("profile shift", self.profile_shift, -1.0, 1.5)?;
        non_negative("backlash", self.backlash)?;
        positive("max error", self.max_error)?;
        non_negative("cutter diameter", self.cutter_diameter)?;
        Ok(())
    }

    pub fn short_name(&self) -> String {
        format!(
            "involute_z{}_m{}_pa{}_x{}_b{}_c{}",
            self.teeth,
            self.module,
            self.pressure_angle,
            self.profile_shift,
            self.backlash,
            self.cutter_diameter
        )
    }
}

/// Closed-form dimensions of an involute gear before any trimming.
#[derive(Debug, Clone, Copy)]
struct Dimensions {
    pressure_angle: f64,
    pitch_radius: f64,
    base_radius: f64,
    outside_radius: f64,
    root_radius: f64,
    thickness: f64,
}

impl Dimensions {
    fn of(params: &InvoluteParameters) -> Self {
        let alpha = params.pressure_angle.to_radians();
        let m = params.module;
        let x = params.profile_shift;
        let pitch_radius = params.teeth as f64 * m / 2.0;
        Self {
            pressure_angle: alpha,
            pitch_radius,
            base_radius: pitch_radius * alpha.cos(),
            outside_radius: pitch_radius + m * (1.0 + x),
            root_radius: pitch_radius - m * (1.25 - x),
            thickness: PI * m / 2.0 + 2.0 * x * m * alpha.tan() - params.backlash,
        }
    }

    /// Rotation that places the involute so the tooth is centred on the X axis.
    fn flank_offset(&self) -> f64 {
        -self.thickness / (2.0 * self.pitch_radius) - involute_function(self.pressure_angle)
    }

    /// Roll angle at the tip, and whether the flanks meet before the
    /// outside circle.
    fn tip_roll(&self) -> GeometryResult<(f64, bool)> {
        let full = ((self.outside_radius / self.base_radius).powi(2) - 1.0).sqrt();
        let offset = self.flank_offset();
        let polar = |phi: f64| offset + phi - phi.atan();
        if polar(full) > 0.0 {
            Ok((root_binary_search(polar, 0.0, full, SEARCH_DELTA)?, true))
        } else {
            Ok((full, false))
        }
    }

    fn tip_radius(&self) -> GeometryResult<f64> {
        let (phi, _) = self.tip_roll()?;
        Ok(self.base_radius * (1.0 + phi * phi).sqrt())
    }
}

/// An involute spur gear.
#[derive(Debug, Clone)]
pub struct InvoluteGear {
    parameters: InvoluteParameters,
    outline: ToothOutline,
    dimensions: Dimensions,
    tip_radius: f64,
    root_radius: f64,
    pointed: bool,
}

impl InvoluteGear {
    /// Synthesizes the gear. Invalid parameters are an error; a design that
    /// cannot be cut comes back with `errors()` set.
    pub fn new(parameters: InvoluteParameters, resolution: &Resolution) -> ProfileResult<Self> {
        parameters.validate()?;
        resolution.validate()?;

        let dimensions = Dimensions::of(&parameters);
        let mut outline = ToothOutline::new(
            parameters.short_name(),
            parameters.teeth,
            parameters.module,
            parameters.max_error,
        );
        outline.set_cut_diameter(parameters.cutter_diameter);

        let mut gear = Self {
            parameters,
            outline,
            dimensions,
            tip_radius: dimensions.outside_radius,
            root_radius: dimensions.root_radius,
            pointed: false,
        };

        match gear.build_tooth(resolution) {
            Ok(tooth) => gear.outline.set_tooth(tooth, resolution),
            Err(message) => {
                warn!(teeth = gear.parameters.teeth, "involute gear failed: {}", message);
                gear.outline.fail(message);
            }
        }
        gear.outline.set_inner_diameter(2.0 * gear.root_radius);

        debug!(
            teeth = gear.parameters.teeth,
            module = gear.parameters.module,
            pitch_diameter = gear.pitch_diameter(),
            root_diameter = gear.root_diameter(),
            "involute gear synthesized"
        );
        Ok(gear)
    }

    fn build_tooth(&mut self, resolution: &Resolution) -> Result<DrawablePath, String> {
        let params = self.parameters.clone();
        let dims = self.dimensions;
        let teeth = params.teeth as f64;
        let alpha = dims.pressure_angle;
        let r = dims.pitch_radius;
        let rb = dims.base_radius;
        let ra = dims.outside_radius;
        let rd = dims.root_radius;
        let half_pitch = PI / teeth;
        let step = resolution.angle_step();

        self.outline.note_length("Pitch diameter", 2.0 * r);
        self.outline.note_length("Base diameter", 2.0 * rb);

        if dims.thickness <= 0.0 {
            return Err(format!(
                "Backlash of {} mm leaves no tooth at the pitch circle",
                params.backlash
            ));
        }
        if rd <= 0.0 {
            return Err("Root circle collapses to the centre; use more teeth or a positive profile shift".to_string());
        }
        if ra <= rb {
            return Err("Outside circle lies inside the base circle; increase the profile shift".to_string());
        }

        // Half width of the rack tip, measured along the pitch line.
        let dedendum = r - rd;
        let rack_tip = (PI * params.module - dims.thickness) / 2.0 - dedendum * alpha.tan();
        if rack_tip <= 0.0 {
            return Err(format!(
                "Rack cutter tip has no width at a pressure angle of {} degrees",
                params.pressure_angle
            ));
        }

        let (tip_roll, pointed) = dims.tip_roll().map_err(|e| e.to_string())?;
        let offset = dims.flank_offset();
        let mut flank: Vec<Coordinate> = sample_between(0.0, tip_roll, step)
            .map(|phi| involute_plus_offset(rb, 0.0, 0.0, phi, offset))
            .collect();
        if pointed {
            if let Some(tip) = flank.last_mut() {
                *tip = Coordinate::new(tip.magnitude(), 0.0);
            }
        }
        let tip = flank.last().copied().ok_or("Involute flank is empty")?;
        self.pointed = pointed;
        self.tip_radius = tip.magnitude();

        let bottom_roll = rack_tip / r;
        let top_roll = (rack_tip - (ra * ra - rd * rd).sqrt()) / r;
        let trochoid: Vec<Coordinate> = sample_between(bottom_roll, top_roll, step)
            .map(|phi| involute_plus_offset(r, -rack_tip, -dedendum, phi, -half_pitch))
            .collect();

        let to_polar = |points: &[Coordinate]| -> Vec<Coordinate> {
            points
                .iter()
                .map(|p| Coordinate::new(p.magnitude(), p.phase()))
                .collect()
        };
        let approach = closest_point(&to_polar(&flank), &to_polar(&trochoid))
            .ok_or("Involute flank and undercut do not overlap")?;
        let crossing_radius = approach.x;
        let junction = Coordinate::from_polar(crossing_radius, approach.first_y);

        // The junction is interpolated, so it stays out of the cutter walk.
        let mut undercut: Vec<Coordinate> = trochoid
            .iter()
            .copied()
            .take_while(|p| p.magnitude() < crossing_radius)
            .collect();
        if undercut.is_empty() {
            undercut.push(trochoid[0]);
        }
        let mut working: Vec<Coordinate> = vec![junction];
        working.extend(flank.iter().copied().filter(|p| p.magnitude() > crossing_radius));
        if working.len() < 2 {
            return Err("Undercut removes the whole involute flank".to_string());
        }

        let undercut_limit = 2.0 * (1.0 - params.profile_shift) / alpha.sin().powi(2);
        let undercut_cut = teeth < undercut_limit;
        if undercut_cut {
            self.outline
                .note_length("Undercut meets the involute at diameter", 2.0 * crossing_radius);
        }
        if undercut_cut && crossing_radius > r {
            warn!(crossing_radius, "undercut reaches above the pitch circle");
            self.outline
                .note("Warning: the undercut reaches above the pitch circle");
        }

        let (mut lower, root_radius) = lower_root(
            &mut self.outline,
            &undercut,
            Some(junction),
            -half_pitch,
            params.cutter_diameter / 2.0,
            params.max_error,
        )?;
        self.root_radius = root_radius;
        lower.extend(reduced_polyline(&working, params.max_error));
        if pointed {
            warn!(tip_radius = self.tip_radius, "involute teeth are pointed");
            self.outline.note(format!(
                "Teeth are pointed; tips trimmed at diameter {:.3} mm",
                2.0 * self.tip_radius
            ));
        } else {
            lower.extend(origin_arc(self.tip_radius, tip.phase(), 0.0, false));
        }

        self.outline.note_length("Outside diameter", 2.0 * self.tip_radius);
        self.outline.note_length("Root diameter", 2.0 * self.root_radius);
        self.outline
            .note_length("Tooth thickness at pitch circle", dims.thickness);

        Ok(symmetric_tooth(DrawablePath::open(lower)))
    }

    pub fn parameters(&self) -> &InvoluteParameters {
        &self.parameters
    }

    pub fn outline(&self) -> &ToothOutline {
        &self.outline
    }

    pub fn pitch_diameter(&self) -> f64 {
        2.0 * self.dimensions.pitch_radius
    }

    pub fn base_diameter(&self) -> f64 {
        2.0 * self.dimensions.base_radius
    }

    /// Diameter actually reached by the tips, smaller than nominal when the
    /// teeth are pointed.
    pub fn outside_diameter(&self) -> f64 {
        2.0 * self.tip_radius
    }

    /// Root diameter after cutter compensation.
    pub fn root_diameter(&self) -> f64 {
        2.0 * self.root_radius
    }

    pub fn is_pointed(&self) -> bool {
        self.pointed
    }

    /// Contact ratio when meshing with `other` at the standard centre
    /// distance adjusted for profile shift.
    pub fn contact_ratio_with(&self, other: &InvoluteGear) -> ProfileResult<f64> {
        if !self.outline.is_valid() || !other.outline.is_valid() {
            return Err(ProfileError::InvalidParameters(
                "contact ratio needs two valid gears".to_string(),
            ));
        }
        contact_ratio(&self.parameters, &other.parameters)
    }
}

/// Contact ratio of two involute gears given only their parameters.
///
/// The gears must share module and pressure angle exactly.
pub fn contact_ratio(first: &InvoluteParameters, second: &InvoluteParameters) -> ProfileResult<f64> {
    first.validate()?;
    second.validate()?;
    if first.module != second.module || first.pressure_angle != second.pressure_angle {
        return Err(ProfileError::Incompatible(format!(
            "module {} at {} degrees cannot mesh with module {} at {} degrees",
            first.module, first.pressure_angle, second.module, second.pressure_angle
        )));
    }

    let a = Dimensions::of(first);
    let b = Dimensions::of(second);
    let alpha = a.pressure_angle;
    let shift_sum = first.profile_shift + second.profile_shift;
    let teeth_sum = (first.teeth + second.teeth) as f64;

    let working_angle = if shift_sum == 0.0 {
        alpha
    } else {
        let target = involute_function(alpha) + 2.0 * alpha.tan() * shift_sum / teeth_sum;
        root_binary_search(
            |angle| involute_function(angle) - target,
            1e-6,
            FRAC_PI_2 - 1e-6,
            SEARCH_DELTA,
        )?
    };

    let centre_distance = (a.pitch_radius + b.pitch_radius) * alpha.cos() / working_angle.cos();
    let approach = |d: &Dimensions| -> GeometryResult<f64> {
        let tip = d.tip_radius()?;
        Ok((tip * tip - d.base_radius * d.base_radius).max(0.0).sqrt())
    };
    let action = approach(&a)? + approach(&b)? - centre_distance * working_angle.sin();
    Ok(action / (PI * first.module * alpha.cos()))
}

/// Contact ratios for every pairing of tooth counts in `teeth`, each entry
/// `(smaller, larger, ratio)`.
pub fn contact_ratio_table(
    template: &InvoluteParameters,
    teeth: RangeInclusive<usize>,
) -> ProfileResult<Vec<(usize, usize, f64)>> {
    let mut table = Vec::new();
    for first in teeth.clone() {
        for second in first..=*teeth.end() {
            let a = InvoluteParameters {
                teeth: first,
                ..template.clone()
            };
            let b = InvoluteParameters {
                teeth: second,
                ..template.clone()
            };
            table.push((first, second, contact_ratio(&a, &b)?));
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gearcut_core::ADJACENCY_TOLERANCE;

    fn gear(teeth: usize) -> InvoluteGear {
        InvoluteGear::new(
            InvoluteParameters {
                teeth,
                ..Default::default()
            },
            &Resolution::coarse(),
        )
        .unwrap()
    }

    #[test]
    fn test_reference_diameters() {
        let gear = gear(12);
        assert_eq!(gear.pitch_diameter(), 12.0);
        assert!((gear.base_diameter() - 12.0 * 20f64.to_radians().cos()).abs() < 1e-12);
        assert!((gear.outline().inner_diameter() - 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_tooth_is_contiguous_and_symmetric() {
        let gear = gear(20);
        assert!(gear.outline().is_valid(), "{}", gear.outline().errors());
        let tooth = gear.outline().tooth();
        assert!(tooth.is_contiguous(ADJACENCY_TOLERANCE));
        let start = tooth.start().unwrap();
        let end = tooth.end().unwrap();
        assert!(start.conjugate().approx_eq(end, 1e-9));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let params = InvoluteParameters {
            module: 0.0,
            ..Default::default()
        };
        assert!(InvoluteGear::new(params, &Resolution::coarse()).is_err());

        let params = InvoluteParameters {
            teeth: 2,
            ..Default::default()
        };
        assert!(InvoluteGear::new(params, &Resolution::coarse()).is_err());
    }

    #[test]
    fn test_excess_backlash_fails_softly() {
        let params = InvoluteParameters {
            backlash: 2.0,
            ..Default::default()
        };
        let gear = InvoluteGear::new(params, &Resolution::coarse()).unwrap();
        assert!(!gear.outline().errors().is_empty());
        assert_eq!(gear.outline().generate_complete_gear_path().count(), 0);
    }

    #[test]
    fn test_contact_ratio_of_twelve_tooth_pair() {
        let params = InvoluteParameters {
            teeth: 12,
            ..Default::default()
        };
        let ratio = contact_ratio(&params, &params).unwrap();
        assert!((ratio - 1.4207).abs() < 1e-3, "ratio {}", ratio);
    }

    #[test]
    fn test_contact_ratio_needs_matching_module() {
        let a = InvoluteParameters::default();
        let b = InvoluteParameters {
            module: 2.0,
            ..Default::default()
        };
        assert!(matches!(contact_ratio(&a, &b), Err(ProfileError::Incompatible(_))));
    }

    #[test]
    fn test_short_name_is_stable() {
        let params = InvoluteParameters::default();
        assert_eq!(params.short_name(), "involute_z24_m1_pa20_x0_b0_c0");
        assert_eq!(params.short_name(), params.clone().short_name());
    }
}
