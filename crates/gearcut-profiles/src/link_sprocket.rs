//! Sprockets for flat link chain, made as a stack of three plates.
//!
//! The pin plate is shaped like a roller sprocket sized to the chain pins.
//! The shoulder plate is a polygon whose flats carry the link plates, and the
//! rim plate is a plain disc at the pin-plate root. All three share the
//! angular period of one chain pitch.

use crate::error::{non_negative, positive, tooth_count, ParameterResult, ProfileResult};
use crate::outline::{repeat_around, ToothOutline};
use crate::sprocket::{outside_diameter, pitch_diameter, seat_tooth, MIN_SPROCKET_TEETH};
use gearcut_core::curve::{CircularArc, CurveSegment, DrawablePath, Line};
use gearcut_core::geometry::Coordinate;
use gearcut_core::Resolution;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::{debug, warn};

/// Link chain sprocket parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSprocketParameters {
    /// Number of teeth
    pub teeth: usize,
    /// Distance between pin centres, in millimetres
    pub pitch: f64,
    /// Pin diameter, in millimetres
    pub pin_diameter: f64,
    /// Height of the link plates, in millimetres
    pub plate_height: f64,
    /// Gap left between the link plates and the shoulder flats
    pub clearance: f64,
    /// Diameter of the cutter, zero for none
    pub cutter_diameter: f64,
    /// Largest deviation allowed when flattening curves
    pub max_error: f64,
}

impl Default for ChainSprocketParameters {
    fn default() -> Self {
        Self {
            teeth: 12,
            pitch: 12.7,
            pin_diameter: 4.0,
            plate_height: 6.0,
            clearance: 0.2,
            cutter_diameter: 0.0,
            max_error: 0.01,
        }
    }
}

impl ChainSprocketParameters {
    pub fn validate(&self) -> ParameterResult<()> {
        tooth_count("teeth", self.teeth, MIN_SPROCKET_TEETH)?;
        positive("pitch", self.pitch)?;
        positive("pin diameter", self.pin_diameter)?;
        positive("plate height", self.plate_height)?;
        non_negative("clearance", self.clearance)?;
        non_negative("cutter diameter", self.cutter_diameter)?;
        positive("max error", self.max_error)?;
        Ok(())
    }

    pub fn short_name(&self) -> String {
        format!(
            "chain_z{}_p{}_pin{}_h{}_cl{}_c{}",
            self.teeth,
            self.pitch,
            self.pin_diameter,
            self.plate_height,
            self.clearance,
            self.cutter_diameter
        )
    }
}

/// The plates a link chain sprocket is stacked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprocketLayer {
    Rim,
    Shoulder,
    Pin,
}

impl SprocketLayer {
    pub const ALL: [SprocketLayer; 3] = [SprocketLayer::Rim, SprocketLayer::Shoulder, SprocketLayer::Pin];
}

/// A link chain sprocket.
#[derive(Debug, Clone)]
pub struct ChainSprocket {
    parameters: ChainSprocketParameters,
    outline: ToothOutline,
    rim: DrawablePath,
    shoulder: DrawablePath,
}

impl ChainSprocket {
    pub fn new(parameters: ChainSprocketParameters, resolution: &Resolution) -> ProfileResult<Self> {
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

        let mut sprocket = Self {
            parameters,
            outline,
            rim: DrawablePath::default(),
            shoulder: DrawablePath::default(),
        };
        if let Err(message) = sprocket.build_layers(resolution) {
            warn!(teeth = sprocket.parameters.teeth, "chain sprocket failed: {}", message);
            sprocket.outline.fail(message);
            sprocket.rim = DrawablePath::default();
            sprocket.shoulder = DrawablePath::default();
        }

        debug!(
            teeth = sprocket.parameters.teeth,
            pitch_diameter,
            inner_diameter = sprocket.outline.inner_diameter(),
            "chain sprocket synthesized"
        );
        Ok(sprocket)
    }

    fn build_layers(&mut self, resolution: &Resolution) -> Result<(), String> {
        let p = self.parameters.clone();
        let pin_radius = p.pin_diameter / 2.0;
        let tooth_angle = TAU / p.teeth as f64;
        let half = tooth_angle / 2.0;

        if pin_radius < p.cutter_diameter / 2.0 {
            warn!(pin_diameter = p.pin_diameter, "pin smaller than the cutter");
            self.outline.note(format!(
                "Cutter of diameter {:.3} mm cannot cut a seat for pins of {:.3} mm; no outline produced",
                p.cutter_diameter, p.pin_diameter
            ));
            return Ok(());
        }
        self.outline.set_cut_diameter(p.cutter_diameter);

        let (tooth, seat_bottom) = seat_tooth(p.teeth, p.pitch, pin_radius)?;
        self.outline.set_inner_diameter(2.0 * seat_bottom);
        self.outline.note_length("Seat bottom diameter", 2.0 * seat_bottom);

        // Distance from the centre to each shoulder flat.
        let pitch_radius = pitch_diameter(p.teeth, p.pitch) / 2.0;
        let flat = pitch_radius * half.cos() - (p.plate_height / 2.0 + p.clearance);
        if flat <= 0.0 {
            return Err(format!(
                "Link plates of height {:.3} mm do not fit a {}-tooth sprocket",
                p.plate_height, p.teeth
            ));
        }
        let corner = flat / half.cos();
        self.outline.note_length("Shoulder flat diameter", 2.0 * flat);

        let shoulder_side = CurveSegment::Line(Line::new(
            Coordinate::from_polar(corner, -half),
            Coordinate::from_polar(corner, half),
        ));
        let rim_arc = CurveSegment::Arc(CircularArc::new(Coordinate::ORIGIN, seat_bottom, -half, half, false));

        self.shoulder = repeat_around(&DrawablePath::open(vec![shoulder_side]), p.teeth);
        self.rim = repeat_around(&DrawablePath::open(vec![rim_arc]), p.teeth);
        self.outline.set_tooth(tooth, resolution);
        Ok(())
    }

    pub fn parameters(&self) -> &ChainSprocketParameters {
        &self.parameters
    }

    /// The pin plate outline.
    pub fn outline(&self) -> &ToothOutline {
        &self.outline
    }

    /// Closed outline of one plate of the stack.
    pub fn layer(&self, layer: SprocketLayer) -> DrawablePath {
        match layer {
            SprocketLayer::Rim => self.rim.clone(),
            SprocketLayer::Shoulder => self.shoulder.clone(),
            SprocketLayer::Pin => self.outline.complete_path(),
        }
    }

    /// Every plate, rim first.
    pub fn layers(&self) -> Vec<(SprocketLayer, DrawablePath)> {
        SprocketLayer::ALL
            .iter()
            .map(|layer| (*layer, self.layer(*layer)))
            .collect()
    }

    /// Recess for the link plates, to be cut into a neighbouring part.
    pub fn shoulder_recess(&self) -> &DrawablePath {
        &self.shoulder
    }

    pub fn pitch_diameter(&self) -> f64 {
        pitch_diameter(self.parameters.teeth, self.parameters.pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gearcut_core::ADJACENCY_TOLERANCE;

    #[test]
    fn test_three_closed_layers() {
        let sprocket = ChainSprocket::new(ChainSprocketParameters::default(), &Resolution::coarse()).unwrap();
        assert!(sprocket.outline().is_valid(), "{}", sprocket.outline().errors());
        let layers = sprocket.layers();
        assert_eq!(layers.len(), 3);
        for (layer, path) in &layers {
            assert!(path.is_closed(), "{:?}", layer);
            assert!(path.is_contiguous(ADJACENCY_TOLERANCE), "{:?}", layer);
        }
        assert_eq!(sprocket.layer(SprocketLayer::Shoulder).len(), 12);
        assert_eq!(sprocket.layer(SprocketLayer::Rim).len(), 12);
    }

    #[test]
    fn test_shoulder_flats_clear_the_plates() {
        let params = ChainSprocketParameters::default();
        let sprocket = ChainSprocket::new(params.clone(), &Resolution::coarse()).unwrap();
        let CurveSegment::Line(side) = sprocket.shoulder_recess().segments()[0] else {
            panic!("expected a flat");
        };
        let midpoint = side.start.lerp(side.end, 0.5);
        let chord = sprocket.pitch_diameter() / 2.0 * (TAU / 24.0).cos();
        let expected = chord - params.plate_height / 2.0 - params.clearance;
        assert!((midpoint.magnitude() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_tall_plates_fail() {
        let params = ChainSprocketParameters {
            plate_height: 60.0,
            ..Default::default()
        };
        let sprocket = ChainSprocket::new(params, &Resolution::coarse()).unwrap();
        assert!(!sprocket.outline().is_valid());
        assert!(sprocket.layer(SprocketLayer::Shoulder).is_empty());
        assert!(sprocket.layer(SprocketLayer::Pin).is_empty());
    }
}
