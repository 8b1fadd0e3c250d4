//! Holes cut through the body of a finished gear: spoke cutouts between hub
//! and rim, the spindle and inlay bores, a hexagonal key and dowel holes for
//! stacking gears on a common shaft.

use crate::error::{non_negative, ParameterError, ParameterResult, ProfileResult};
use crate::outline::{origin_arc, repeat_around, symmetric_tooth};
use crate::profile::GearProfile;
use gearcut_core::curve::{CircularArc, CurveSegment, DrawablePath, Line};
use gearcut_core::geometry::Coordinate;
use gearcut_core::units::{format_length, MeasurementSystem};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_6, PI, TAU};
use tracing::{debug, warn};

/// Bore and keying options for [`Cutouts`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutoutParameters {
    /// Shaft hole diameter, zero for none
    pub spindle_diameter: f64,
    /// Diameter of a recess for a bearing or inlay, zero for none
    pub inlay_diameter: f64,
    /// Across-flats size of a hexagonal key, zero for none
    pub key_flats: f64,
    pub dowel_count: usize,
    pub dowel_diameter: f64,
}

impl Default for CutoutParameters {
    fn default() -> Self {
        Self {
            spindle_diameter: 3.0,
            inlay_diameter: 0.0,
            key_flats: 0.0,
            dowel_count: 0,
            dowel_diameter: 0.0,
        }
    }
}

impl CutoutParameters {
    pub fn validate(&self) -> ParameterResult<()> {
        non_negative("spindle diameter", self.spindle_diameter)?;
        non_negative("inlay diameter", self.inlay_diameter)?;
        non_negative("key flats", self.key_flats)?;
        non_negative("dowel diameter", self.dowel_diameter)?;
        if self.dowel_count > 0 && self.dowel_diameter == 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "dowel diameter".to_string(),
                reason: "dowel holes need a diameter".to_string(),
            });
        }
        Ok(())
    }

    /// Diameter of the circle the hexagonal key's corners lie on.
    fn key_across_corners(&self) -> f64 {
        self.key_flats / FRAC_PI_6.cos()
    }
}

/// Number of spokes for a gear with `teeth` teeth.
pub fn spokes_for(teeth: usize) -> usize {
    (1 + teeth.saturating_sub(1) / 8).max(3)
}

/// Cutouts for one gear. The gear is borrowed and must outlive this value.
#[derive(Debug, Clone)]
pub struct Cutouts<'a> {
    gear: &'a GearProfile,
    parameters: CutoutParameters,
    spoke_count: usize,
    hub_diameter: f64,
    rim_diameter: f64,
    corner_radius: f64,
    cutouts: Vec<DrawablePath>,
    spindle: Option<DrawablePath>,
    inlay: Option<DrawablePath>,
    hex_key: Option<DrawablePath>,
    dowels: Vec<DrawablePath>,
    extra_plots: Vec<DrawablePath>,
    information: String,
}

impl<'a> Cutouts<'a> {
    pub fn new(gear: &'a GearProfile, parameters: CutoutParameters) -> ProfileResult<Self> {
        parameters.validate()?;

        let module = gear.module();
        let spoke_count = spokes_for(gear.tooth_count());
        let corner_radius = module.max(gear.cut_diameter() / 2.0);
        let spoke_thickness = 3.0 * module;
        let largest_bore = parameters
            .spindle_diameter
            .max(parameters.inlay_diameter)
            .max(parameters.key_across_corners());
        let hub_diameter = (8.0 * module)
            .max(spoke_count as f64 * (spoke_thickness + 2.0 * corner_radius) / PI)
            .max(largest_bore + 4.0 * module);
        let rim_diameter = gear.inner_diameter() - 4.0 * module;

        let mut cutouts = Self {
            gear,
            parameters,
            spoke_count,
            hub_diameter,
            rim_diameter,
            corner_radius,
            cutouts: Vec::new(),
            spindle: None,
            inlay: None,
            hex_key: None,
            dowels: Vec::new(),
            extra_plots: Vec::new(),
            information: String::new(),
        };

        cutouts.note(format!("Spokes: {}", spoke_count));
        cutouts.note_length("Hub diameter", hub_diameter);
        cutouts.note_length("Rim diameter", rim_diameter);

        if !gear.outline().is_valid() {
            cutouts.note("Gear outline failed; no spoke cutouts");
        } else if rim_diameter < hub_diameter + 4.0 * corner_radius {
            cutouts.note("Not enough material between hub and rim for spoke cutouts");
        } else {
            match cutouts.spoke_gap(spoke_thickness) {
                Some(gap) => {
                    let pitch = TAU / spoke_count as f64;
                    cutouts.cutouts = (0..spoke_count)
                        .map(|k| gap.rotated_by(pitch / 2.0 + pitch * k as f64))
                        .collect();
                }
                None => cutouts.note("Spoke fillets overlap; no spoke cutouts"),
            }
        }

        cutouts.build_bores();

        debug!(
            short_name = gear.short_name(),
            spoke_count,
            hub_diameter,
            rim_diameter,
            cutouts = cutouts.cutouts.len(),
            "cutouts built"
        );
        Ok(cutouts)
    }

    /// Closed boundary of the gap between the spokes at `-π/n` and `π/n`.
    fn spoke_gap(&self, spoke_thickness: f64) -> Option<DrawablePath> {
        let half_pitch = PI / self.spoke_count as f64;
        let hub = self.hub_diameter / 2.0;
        let rim = self.rim_diameter / 2.0;
        let rc = self.corner_radius;
        let offset = spoke_thickness / 2.0 + rc;

        // Along the lower spoke, and across it toward the gap.
        let along = Coordinate::from_polar(1.0, -half_pitch);
        let across = along.perpendicular();

        let inner_reach = ((hub + rc).powi(2) - offset.powi(2)).sqrt();
        let outer_reach = ((rim - rc).powi(2) - offset.powi(2)).sqrt();
        let inner_centre = along * inner_reach + across * offset;
        let outer_centre = along * outer_reach + across * offset;
        if !(outer_reach > inner_reach && inner_centre.phase() < 0.0 && outer_centre.phase() < 0.0) {
            return None;
        }

        let hub_tangent = Coordinate::from_polar(hub, inner_centre.phase());
        let rim_tangent = Coordinate::from_polar(rim, outer_centre.phase());
        let edge_inner = inner_centre - across * rc;
        let edge_outer = outer_centre - across * rc;

        let mut lower = Vec::with_capacity(5);
        lower.extend(origin_arc(hub, 0.0, inner_centre.phase(), true));
        lower.push(CurveSegment::Arc(CircularArc::between(
            inner_centre,
            hub_tangent,
            edge_inner,
            false,
        )));
        lower.push(CurveSegment::Line(Line::new(edge_inner, edge_outer)));
        lower.push(CurveSegment::Arc(CircularArc::between(
            outer_centre,
            edge_outer,
            rim_tangent,
            false,
        )));
        lower.extend(origin_arc(rim, outer_centre.phase(), 0.0, false));

        let gap = symmetric_tooth(DrawablePath::open(lower));
        Some(DrawablePath::closed(gap.into_segments()))
    }

    fn build_bores(&mut self) {
        let p = self.parameters.clone();
        if p.spindle_diameter > 0.0 {
            self.spindle = Some(DrawablePath::circle(Coordinate::ORIGIN, p.spindle_diameter / 2.0));
        }
        if p.inlay_diameter > 0.0 {
            self.inlay = Some(DrawablePath::circle(Coordinate::ORIGIN, p.inlay_diameter / 2.0));
        }
        if p.key_flats > 0.0 {
            self.hex_key = Some(self.hex_key_path(p.key_flats / 2.0));
        }
        if p.dowel_count > 0 {
            let radius = (p.spindle_diameter / 2.0 + self.hub_diameter / 2.0) / 2.0;
            if radius - p.dowel_diameter / 2.0 < p.spindle_diameter / 2.0 {
                warn!(dowel_diameter = p.dowel_diameter, "dowel holes break into the spindle bore");
                self.note("Dowel holes break into the spindle bore");
            }
            let hole = DrawablePath::circle(Coordinate::new(radius, 0.0), p.dowel_diameter / 2.0);
            let step = TAU / p.dowel_count as f64;
            self.dowels = (0..p.dowel_count)
                .map(|k| hole.rotated_by(step * k as f64))
                .collect();
            self.note_length("Dowel circle diameter", 2.0 * radius);
        }
    }

    /// Hexagon with flats at `apothem`, one flat facing +X. With a cutter
    /// each corner gets a round relief so a sharp-cornered key still seats.
    fn hex_key_path(&mut self, apothem: f64) -> DrawablePath {
        let half_flat = apothem * FRAC_PI_6.tan();
        let corner = Coordinate::new(apothem, half_flat);
        let relief = self.gear.cut_diameter() / 2.0;

        let half = if relief > 0.0 && relief < half_flat {
            let centre = corner - Coordinate::from_polar(relief, FRAC_PI_6);
            let flat_end = Coordinate::new(apothem, half_flat - relief);
            DrawablePath::open(vec![
                CurveSegment::Line(Line::new(Coordinate::new(apothem, 0.0), flat_end)),
                CurveSegment::Arc(CircularArc::new(centre, relief, -FRAC_PI_6, FRAC_PI_6, false)),
            ])
        } else {
            if relief > 0.0 {
                self.note("Cutter too large for hex key corner reliefs");
            }
            DrawablePath::open(vec![CurveSegment::Line(Line::new(
                Coordinate::new(apothem, 0.0),
                corner,
            ))])
        };

        let mut sixth = half.reflect_y().reversed().into_segments();
        sixth.extend(half.into_segments());
        repeat_around(&DrawablePath::open(sixth), 6)
    }

    fn note(&mut self, line: impl AsRef<str>) {
        if !self.information.is_empty() {
            self.information.push('\n');
        }
        self.information.push_str(line.as_ref());
    }

    fn note_length(&mut self, label: &str, value_mm: f64) {
        self.note(format!(
            "{}: {} mm",
            label,
            format_length(value_mm, MeasurementSystem::Metric)
        ));
    }

    /// Adds a further path to be cut with the others, such as the shoulder
    /// recess of a link chain sprocket.
    pub fn add_plot(&mut self, path: DrawablePath) {
        self.extra_plots.push(path);
    }

    pub fn gear(&self) -> &'a GearProfile {
        self.gear
    }

    pub fn parameters(&self) -> &CutoutParameters {
        &self.parameters
    }

    pub fn spoke_count(&self) -> usize {
        self.spoke_count
    }

    pub fn hub_diameter(&self) -> f64 {
        self.hub_diameter
    }

    pub fn rim_diameter(&self) -> f64 {
        self.rim_diameter
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// One closed path per spoke gap; empty when there is no room.
    pub fn cutouts(&self) -> &[DrawablePath] {
        &self.cutouts
    }

    pub fn spindle(&self) -> Option<&DrawablePath> {
        self.spindle.as_ref()
    }

    pub fn inlay(&self) -> Option<&DrawablePath> {
        self.inlay.as_ref()
    }

    pub fn hex_key(&self) -> Option<&DrawablePath> {
        self.hex_key.as_ref()
    }

    pub fn dowels(&self) -> &[DrawablePath] {
        &self.dowels
    }

    pub fn extra_plots(&self) -> &[DrawablePath] {
        &self.extra_plots
    }

    pub fn information(&self) -> &str {
        &self.information
    }

    /// Every path to cut, spoke gaps first.
    pub fn all_paths(&self) -> impl Iterator<Item = &DrawablePath> + '_ {
        self.cutouts
            .iter()
            .chain(self.spindle.iter())
            .chain(self.inlay.iter())
            .chain(self.hex_key.iter())
            .chain(self.dowels.iter())
            .chain(self.extra_plots.iter())
    }
}
