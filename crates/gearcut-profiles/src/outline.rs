//! The record every gear family produces: one tooth plus descriptive text.

use gearcut_core::curve::{CircularArc, CurveSegment, DrawablePath, PolyLine};
use gearcut_core::geometry::{linear_reduction, Angle, Coordinate};
use gearcut_core::units::{format_length, MeasurementSystem};
use gearcut_core::Resolution;
use serde::Serialize;
use std::f64::consts::TAU;

/// A synthesized gear outline: one tooth (or link seat) that is repeated
/// `tooth_count` times around the origin, plus the texts shown to the user.
///
/// When `errors()` is not empty the design failed and every outline accessor
/// yields nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToothOutline {
    short_name: String,
    information: String,
    errors: String,
    tooth_count: usize,
    module: f64,
    max_error: f64,
    inner_diameter: f64,
    cut_diameter: f64,
    tooth: DrawablePath,
    tooth_points: Vec<Coordinate>,
}

impl ToothOutline {
    pub(crate) fn new(short_name: String, tooth_count: usize, module: f64, max_error: f64) -> Self {
        Self {
            short_name,
            information: String::new(),
            errors: String::new(),
            tooth_count,
            module,
            max_error,
            inner_diameter: 0.0,
            cut_diameter: 0.0,
            tooth: DrawablePath::default(),
            tooth_points: Vec::new(),
        }
    }

    /// Appends a line to the information text.
    pub(crate) fn note(&mut self, line: impl AsRef<str>) {
        if !self.information.is_empty() {
            self.information.push('\n');
        }
        self.information.push_str(line.as_ref());
    }

    /// Appends a labelled length, in millimetres.
    pub(crate) fn note_length(&mut self, label: &str, value_mm: f64) {
        self.note(format!(
            "{}: {} mm",
            label,
            format_length(value_mm, MeasurementSystem::Metric)
        ));
    }

    /// Marks the design as failed and drops any outline built so far.
    pub(crate) fn fail(&mut self, message: impl AsRef<str>) {
        if !self.errors.is_empty() {
            self.errors.push('\n');
        }
        self.errors.push_str(message.as_ref());
        self.tooth = DrawablePath::default();
        self.tooth_points.clear();
    }

    pub(crate) fn set_inner_diameter(&mut self, diameter: f64) {
        self.inner_diameter = diameter;
    }

    pub(crate) fn set_cut_diameter(&mut self, diameter: f64) {
        self.cut_diameter = diameter;
    }

    /// Installs the finished tooth and caches its flattened points.
    pub(crate) fn set_tooth(&mut self, tooth: DrawablePath, resolution: &Resolution) {
        if !self.errors.is_empty() {
            return;
        }
        self.tooth_points = tooth.to_points(self.max_error, resolution);
        self.tooth = tooth;
    }

    /// Identifier encoding the parameters, stable for a given parameter set.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn information(&self) -> &str {
        &self.information
    }

    pub fn errors(&self) -> &str {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn tooth_count(&self) -> usize {
        self.tooth_count
    }

    pub fn module(&self) -> f64 {
        self.module
    }

    pub fn max_error(&self) -> f64 {
        self.max_error
    }

    /// Diameter of the solid material inside the teeth, after any cutter
    /// compensation.
    pub fn inner_diameter(&self) -> f64 {
        self.inner_diameter
    }

    /// Cutter diameter the outline was built for; zero when no cutter is
    /// taken into account.
    pub fn cut_diameter(&self) -> f64 {
        self.cut_diameter
    }

    /// The reference tooth as curve segments.
    pub fn tooth(&self) -> &DrawablePath {
        &self.tooth
    }

    fn tooth_angle(&self) -> f64 {
        TAU / self.tooth_count.max(1) as f64
    }

    /// Points of tooth `index`, rotated into place.
    pub fn tooth_profile(&self, index: usize) -> Vec<Coordinate> {
        let angle = Angle::from_radians(self.tooth_angle() * index as f64);
        self.tooth_points.iter().map(|p| p.rotated_by(angle)).collect()
    }

    /// Every tooth in turn, as one closed loop of points.
    ///
    /// Each tooth ends where the next begins, so the shared point is emitted
    /// once; the last point joins back to the first. The sequence is computed
    /// lazily from the cached tooth and is empty for a failed design.
    pub fn generate_complete_gear_path(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let teeth = if self.tooth_points.len() < 2 {
            0
        } else {
            self.tooth_count
        };
        let per_tooth = self.tooth_points.len().saturating_sub(1);
        let step = self.tooth_angle();
        (0..teeth).flat_map(move |i| {
            let angle = Angle::from_radians(step * i as f64);
            self.tooth_points[..per_tooth]
                .iter()
                .map(move |p| p.rotated_by(angle))
        })
    }

    /// The whole outline as one closed path of rotated tooth segments.
    pub fn complete_path(&self) -> DrawablePath {
        if self.tooth.is_empty() {
            return DrawablePath::default();
        }
        repeat_around(&self.tooth, self.tooth_count)
    }
}

/// Joins `count` copies of `unit`, each turned by one more `2π / count`.
pub(crate) fn repeat_around(unit: &DrawablePath, count: usize) -> DrawablePath {
    let step = TAU / count.max(1) as f64;
    let mut path = DrawablePath::closed(Vec::with_capacity(unit.len() * count));
    for i in 0..count {
        path.extend(unit.rotated_by(step * i as f64).into_segments());
    }
    path
}

/// Completes a tooth from its lower half by appending the mirror image,
/// traversed so the whole tooth runs in one direction.
pub(crate) fn symmetric_tooth(lower: DrawablePath) -> DrawablePath {
    let upper = lower.reflect_y().reversed();
    let mut segments = lower.into_segments();
    segments.extend(upper.into_segments());
    DrawablePath::open(segments)
}

/// Parameter values from `from` to `to` at `step`, the last exactly at `to`.
pub(crate) fn sample_between(from: f64, to: f64, step: f64) -> impl Iterator<Item = f64> {
    let span = to - from;
    let steps = (span.abs() / step - 1e-9).ceil().max(0.0) as usize;
    let direction = span.signum();
    (0..steps)
        .map(move |i| from + direction * step * i as f64)
        .chain(std::iter::once(to))
}

/// Reduced polyline through `points`, or nothing if fewer than two remain.
pub(crate) fn reduced_polyline(points: &[Coordinate], max_error: f64) -> Option<CurveSegment> {
    PolyLine::new(linear_reduction(points, max_error))
        .ok()
        .map(CurveSegment::PolyLine)
}

/// Arc around the origin, skipped when it has no length.
pub(crate) fn origin_arc(
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    clockwise: bool,
) -> Option<CurveSegment> {
    if (end_angle - start_angle).abs() < 1e-12 {
        return None;
    }
    Some(CurveSegment::Arc(CircularArc::new(
        Coordinate::ORIGIN,
        radius,
        start_angle,
        end_angle,
        clockwise,
    )))
}
