use gearcut_core::{Resolution, ADJACENCY_TOLERANCE};
use gearcut_profiles::{CycloidalGear, CycloidalParameters};

#[test]
fn test_pair_shares_one_contact_ratio() {
    let resolution = Resolution::coarse();
    let wheel = CycloidalGear::new(CycloidalParameters::default(), &resolution).unwrap();
    let pinion = wheel.mate(&resolution).unwrap();
    assert!((wheel.contact_ratio() - pinion.contact_ratio()).abs() < 1e-12);
    assert_eq!(pinion.outline().tooth_count(), 8);
}

#[test]
fn test_blunting_shortens_the_addendum() {
    let resolution = Resolution::coarse();
    let sharp = CycloidalGear::new(
        CycloidalParameters {
            blunting: 0.0,
            ..Default::default()
        },
        &resolution,
    )
    .unwrap();
    let blunt = CycloidalGear::new(CycloidalParameters::default(), &resolution).unwrap();
    assert!(blunt.outside_diameter() < sharp.outside_diameter());
    assert!(blunt.outside_diameter() > blunt.pitch_diameter());
}

#[test]
fn test_unequal_pairs_build() {
    let resolution = Resolution::coarse();
    for (teeth, mate_teeth) in [(30, 8), (8, 30), (20, 8), (17, 8), (40, 10), (60, 8), (8, 16)] {
        let gear = CycloidalGear::new(
            CycloidalParameters {
                teeth,
                mate_teeth,
                ..Default::default()
            },
            &resolution,
        )
        .unwrap_or_else(|e| panic!("{teeth}/{mate_teeth}: {e}"));
        let outline = gear.outline();
        assert!(outline.errors().is_empty(), "{teeth}/{mate_teeth}: {}", outline.errors());
        assert!(outline.tooth().is_contiguous(ADJACENCY_TOLERANCE));
        assert!(gear.contact_ratio() > 1.0);
        assert!(gear.root_diameter() < gear.pitch_diameter());
        assert!(gear.outside_diameter() > gear.pitch_diameter());
    }
}

#[test]
fn test_default_pair_contact_ratio() {
    let gear = CycloidalGear::new(CycloidalParameters::default(), &Resolution::coarse()).unwrap();
    assert!((gear.contact_ratio() - 1.550).abs() < 0.005);
    assert!((gear.outside_diameter() - 32.394).abs() < 0.01);
}
