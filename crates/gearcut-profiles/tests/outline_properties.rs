use gearcut_core::Resolution;
use gearcut_profiles::{CycloidalGear, CycloidalParameters, InvoluteGear, InvoluteParameters, ToothOutline};
use proptest::prelude::*;

fn assert_within(outline: &ToothOutline, inner: f64, outer: f64) -> Result<(), TestCaseError> {
    for point in outline.generate_complete_gear_path() {
        let r = point.magnitude();
        prop_assert!(r >= inner - 1e-6 && r <= outer + 1e-6, "radius {} outside [{}, {}]", r, inner, outer);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn involute_outline_stays_between_root_and_tip(teeth in 12usize..80, module in 0.5f64..3.0) {
        let gear = InvoluteGear::new(
            InvoluteParameters { teeth, module, ..Default::default() },
            &Resolution::coarse(),
        ).unwrap();
        let outline = gear.outline();
        prop_assert!(outline.errors().is_empty(), "{}", outline.errors());
        prop_assert!(outline.complete_path().is_closed());
        assert_within(outline, gear.root_diameter() / 2.0, gear.outside_diameter() / 2.0)?;
    }

    #[test]
    fn cycloidal_pairs_always_build(
        teeth in 3usize..80,
        mate_teeth in 3usize..200,
        blunting in 0.0f64..0.9,
    ) {
        let params = CycloidalParameters {
            teeth,
            mate_teeth,
            blunting,
            mate_blunting: blunting,
            ..Default::default()
        };
        let gear = CycloidalGear::new(params, &Resolution::coarse()).unwrap();
        let mate = gear.mate(&Resolution::coarse()).unwrap();
        prop_assert!((gear.contact_ratio() - mate.contact_ratio()).abs() < 1e-9);
        prop_assert!(gear.outside_diameter() >= gear.pitch_diameter());

        let outline = gear.outline();
        if outline.errors().is_empty() {
            prop_assert!(outline.complete_path().is_closed());
            assert_within(outline, gear.root_diameter() / 2.0, gear.outside_diameter() / 2.0)?;
        } else {
            prop_assert_eq!(outline.generate_complete_gear_path().count(), 0);
        }
    }
}
