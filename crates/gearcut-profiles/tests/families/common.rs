use gearcut_profiles::{
    ChainSprocketParameters, CycloidalParameters, EscapementParameters, GearParameters,
    InvoluteParameters, RatchetParameters, RollerSprocketParameters,
};

/// Default parameters of every family.
pub fn every_family() -> Vec<GearParameters> {
    vec![
        GearParameters::Involute(InvoluteParameters::default()),
        GearParameters::Cycloidal(CycloidalParameters::default()),
        GearParameters::Escapement(EscapementParameters::default()),
        GearParameters::Ratchet(RatchetParameters::default()),
        GearParameters::RollerSprocket(RollerSprocketParameters::default()),
        GearParameters::ChainSprocket(ChainSprocketParameters::default()),
    ]
}
