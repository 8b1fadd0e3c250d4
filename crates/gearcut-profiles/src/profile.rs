//! The closed set of gear families behind one interface.

use crate::cycloidal::{CycloidalGear, CycloidalParameters};
use crate::error::{ParameterResult, ProfileResult};
use crate::escapement::{EscapementParameters, EscapementWheel};
use crate::involute::{InvoluteGear, InvoluteParameters};
use crate::link_sprocket::{ChainSprocket, ChainSprocketParameters};
use crate::outline::ToothOutline;
use crate::ratchet::{RatchetParameters, RatchetWheel};
use crate::sprocket::{RollerSprocket, RollerSprocketParameters};
use gearcut_core::curve::DrawablePath;
use gearcut_core::geometry::Coordinate;
use gearcut_core::Resolution;
use serde::{Deserialize, Serialize};

/// Design parameters for any gear family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum GearParameters {
    Involute(InvoluteParameters),
    Cycloidal(CycloidalParameters),
    Escapement(EscapementParameters),
    Ratchet(RatchetParameters),
    RollerSprocket(RollerSprocketParameters),
    ChainSprocket(ChainSprocketParameters),
}

impl GearParameters {
    pub fn validate(&self) -> ParameterResult<()> {
        match self {
            GearParameters::Involute(p) => p.validate(),
            GearParameters::Cycloidal(p) => p.validate(),
            GearParameters::Escapement(p) => p.validate(),
            GearParameters::Ratchet(p) => p.validate(),
            GearParameters::RollerSprocket(p) => p.validate(),
            GearParameters::ChainSprocket(p) => p.validate(),
        }
    }

    pub fn short_name(&self) -> String {
        match self {
            GearParameters::Involute(p) => p.short_name(),
            GearParameters::Cycloidal(p) => p.short_name(),
            GearParameters::Escapement(p) => p.short_name(),
            GearParameters::Ratchet(p) => p.short_name(),
            GearParameters::RollerSprocket(p) => p.short_name(),
            GearParameters::ChainSprocket(p) => p.short_name(),
        }
    }

    /// Overrides the tolerance and cutter of whichever family this is.
    pub fn with_machining(mut self, max_error: f64, cutter_diameter: f64) -> Self {
        let (error, cutter) = match &mut self {
            GearParameters::Involute(p) => (&mut p.max_error, &mut p.cutter_diameter),
            GearParameters::Cycloidal(p) => (&mut p.max_error, &mut p.cutter_diameter),
            GearParameters::Escapement(p) => (&mut p.max_error, &mut p.cutter_diameter),
            GearParameters::Ratchet(p) => (&mut p.max_error, &mut p.cutter_diameter),
            GearParameters::RollerSprocket(p) => (&mut p.max_error, &mut p.cutter_diameter),
            GearParameters::ChainSprocket(p) => (&mut p.max_error, &mut p.cutter_diameter),
        };
        *error = max_error;
        *cutter = cutter_diameter;
        self
    }
}

/// A synthesized gear of any family.
#[derive(Debug, Clone)]
pub enum GearProfile {
    Involute(InvoluteGear),
    Cycloidal(CycloidalGear),
    Escapement(EscapementWheel),
    Ratchet(RatchetWheel),
    RollerSprocket(RollerSprocket),
    ChainSprocket(ChainSprocket),
}

impl GearProfile {
    /// Builds the gear described by `parameters`.
    pub fn synthesize(parameters: &GearParameters, resolution: &Resolution) -> ProfileResult<Self> {
        Ok(match parameters {
            GearParameters::Involute(p) => InvoluteGear::new(p.clone(), resolution)?.into(),
            GearParameters::Cycloidal(p) => CycloidalGear::new(p.clone(), resolution)?.into(),
            GearParameters::Escapement(p) => EscapementWheel::new(p.clone(), resolution)?.into(),
            GearParameters::Ratchet(p) => RatchetWheel::new(p.clone(), resolution)?.into(),
            GearParameters::RollerSprocket(p) => RollerSprocket::new(p.clone(), resolution)?.into(),
            GearParameters::ChainSprocket(p) => ChainSprocket::new(p.clone(), resolution)?.into(),
        })
    }

    pub fn family(&self) -> &'static str {
        match self {
            GearProfile::Involute(_) => "involute",
            GearProfile::Cycloidal(_) => "cycloidal",
            GearProfile::Escapement(_) => "escapement",
            GearProfile::Ratchet(_) => "ratchet",
            GearProfile::RollerSprocket(_) => "roller_sprocket",
            GearProfile::ChainSprocket(_) => "chain_sprocket",
        }
    }

    pub fn outline(&self) -> &ToothOutline {
        match self {
            GearProfile::Involute(g) => g.outline(),
            GearProfile::Cycloidal(g) => g.outline(),
            GearProfile::Escapement(g) => g.outline(),
            GearProfile::Ratchet(g) => g.outline(),
            GearProfile::RollerSprocket(g) => g.outline(),
            GearProfile::ChainSprocket(g) => g.outline(),
        }
    }

    pub fn short_name(&self) -> &str {
        self.outline().short_name()
    }

    pub fn information(&self) -> &str {
        self.outline().information()
    }

    pub fn errors(&self) -> &str {
        self.outline().errors()
    }

    pub fn tooth_count(&self) -> usize {
        self.outline().tooth_count()
    }

    pub fn module(&self) -> f64 {
        self.outline().module()
    }

    pub fn max_error(&self) -> f64 {
        self.outline().max_error()
    }

    pub fn inner_diameter(&self) -> f64 {
        self.outline().inner_diameter()
    }

    pub fn cut_diameter(&self) -> f64 {
        self.outline().cut_diameter()
    }

    pub fn tooth_profile(&self, index: usize) -> Vec<Coordinate> {
        self.outline().tooth_profile(index)
    }

    pub fn generate_complete_gear_path(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.outline().generate_complete_gear_path()
    }

    pub fn complete_path(&self) -> DrawablePath {
        self.outline().complete_path()
    }
}

macro_rules! profile_from {
    ($($variant:ident($gear:ty)),* $(,)?) => {
        $(
            impl From<$gear> for GearProfile {
                fn from(gear: $gear) -> Self {
                    GearProfile::$variant(gear)
                }
            }
        )*
    };
}

profile_from!(
    Involute(InvoluteGear),
    Cycloidal(CycloidalGear),
    Escapement(EscapementWheel),
    Ratchet(RatchetWheel),
    RollerSprocket(RollerSprocket),
    ChainSprocket(ChainSprocket),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_are_tagged_by_family() {
        let params = GearParameters::Ratchet(RatchetParameters::default());
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["family"], "ratchet");
        assert_eq!(json["teeth"], 24);

        let back: GearParameters = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let params: GearParameters =
            serde_json::from_str(r#"{"family": "involute", "teeth": 40}"#).unwrap();
        let GearParameters::Involute(involute) = params else {
            panic!("expected involute");
        };
        assert_eq!(involute.teeth, 40);
        assert_eq!(involute.pressure_angle, 20.0);
    }

    #[test]
    fn test_synthesize_dispatches() {
        let params = GearParameters::Escapement(EscapementParameters::default());
        let profile = GearProfile::synthesize(&params, &Resolution::coarse()).unwrap();
        assert_eq!(profile.family(), "escapement");
        assert_eq!(profile.short_name(), params.short_name());
        assert_eq!(profile.tooth_count(), 30);
    }

    #[test]
    fn test_with_machining() {
        let params = GearParameters::Involute(InvoluteParameters::default()).with_machining(0.05, 1.0);
        let GearParameters::Involute(p) = params else {
            panic!("expected involute");
        };
        assert_eq!(p.max_error, 0.05);
        assert_eq!(p.cutter_diameter, 1.0);
    }
}
