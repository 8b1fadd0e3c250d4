use gearcut_core::{Resolution, ADJACENCY_TOLERANCE};
use gearcut_profiles::{
    ChainSprocket, ChainSprocketParameters, CutoutParameters, Cutouts, GearParameters, GearProfile,
    InvoluteParameters,
};

#[test]
fn test_eight_teeth_means_three_spokes_and_no_room() {
    let params = GearParameters::Involute(InvoluteParameters {
        teeth: 8,
        ..Default::default()
    });
    let gear = GearProfile::synthesize(&params, &Resolution::coarse()).unwrap();
    let cutouts = Cutouts::new(&gear, CutoutParameters::default()).unwrap();
    assert_eq!(cutouts.spoke_count(), 3);
    assert!(cutouts.cutouts().is_empty());
}

#[test]
fn test_small_gears_have_no_cutouts() {
    for teeth in 3..16 {
        let params = GearParameters::Involute(InvoluteParameters {
            teeth,
            ..Default::default()
        });
        let gear = GearProfile::synthesize(&params, &Resolution::coarse()).unwrap();
        let cutouts = Cutouts::new(&gear, CutoutParameters::default()).unwrap();
        assert!(cutouts.cutouts().is_empty(), "{} teeth", teeth);
    }
}

#[test]
fn test_large_gear_cutouts_are_closed() {
    let params = GearParameters::Involute(InvoluteParameters {
        teeth: 96,
        module: 2.0,
        cutter_diameter: 1.0,
        ..Default::default()
    });
    let gear = GearProfile::synthesize(&params, &Resolution::coarse()).unwrap();
    let cutouts = Cutouts::new(&gear, CutoutParameters::default()).unwrap();
    assert_eq!(cutouts.cutouts().len(), cutouts.spoke_count());
    assert_eq!(cutouts.corner_radius(), 2.0);
    for gap in cutouts.cutouts() {
        assert!(gap.is_contiguous(ADJACENCY_TOLERANCE));
    }
}

#[test]
fn test_shoulder_recess_added_as_extra_plot() {
    let sprocket = ChainSprocket::new(ChainSprocketParameters::default(), &Resolution::coarse()).unwrap();
    let recess = sprocket.shoulder_recess().clone();
    let gear = GearProfile::from(sprocket);
    let mut cutouts = Cutouts::new(&gear, CutoutParameters::default()).unwrap();
    cutouts.add_plot(recess);
    assert_eq!(cutouts.extra_plots().len(), 1);
    assert!(cutouts.all_paths().any(|p| p.len() == 12));
}
