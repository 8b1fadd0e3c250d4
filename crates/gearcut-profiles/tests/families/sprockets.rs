use gearcut_core::{Resolution, ADJACENCY_TOLERANCE};
use gearcut_profiles::{
    ChainSize, ChainSprocket, ChainSprocketParameters, RollerSprocket, RollerSprocketParameters,
    SprocketLayer,
};

#[test]
fn test_every_standard_chain_makes_a_sprocket() {
    for chain in ChainSize::ALL {
        for teeth in [9, 15, 30] {
            let params = RollerSprocketParameters::for_chain(chain, teeth);
            let sprocket = RollerSprocket::new(params, &Resolution::coarse()).unwrap();
            let outline = sprocket.outline();
            assert!(outline.is_valid(), "{} z{}: {}", chain, teeth, outline.errors());
            assert!(outline.complete_path().is_contiguous(ADJACENCY_TOLERANCE));
        }
    }
}

#[test]
fn test_sprocket_stays_inside_outside_diameter() {
    let sprocket = RollerSprocket::new(RollerSprocketParameters::default(), &Resolution::default()).unwrap();
    let outer = sprocket.outside_diameter() / 2.0;
    let inner = sprocket.outline().inner_diameter() / 2.0;
    for point in sprocket.outline().generate_complete_gear_path() {
        let r = point.magnitude();
        assert!(r <= outer + 1e-6 && r >= inner - 1e-6, "radius {}", r);
    }
}

#[test]
fn test_link_sprocket_layers_nest() {
    let sprocket = ChainSprocket::new(ChainSprocketParameters::default(), &Resolution::coarse()).unwrap();
    let rim = sprocket.layer(SprocketLayer::Rim).bounds();
    let pin = sprocket.layer(SprocketLayer::Pin).bounds();
    assert!(rim.width() <= pin.width() + 1e-9);
    assert!(sprocket.shoulder_recess().is_closed());
}
