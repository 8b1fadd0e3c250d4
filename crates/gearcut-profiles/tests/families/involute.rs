use gearcut_core::{Resolution, ADJACENCY_TOLERANCE};
use gearcut_profiles::{contact_ratio, contact_ratio_table, InvoluteGear, InvoluteParameters};

fn params(teeth: usize) -> InvoluteParameters {
    InvoluteParameters {
        teeth,
        ..Default::default()
    }
}

#[test]
fn test_twelve_tooth_base_diameter() {
    let gear = InvoluteGear::new(params(12), &Resolution::default()).unwrap();
    let expected = 12.0 * 20f64.to_radians().cos();
    assert!((gear.base_diameter() - expected).abs() < 1e-12);
    assert!(gear.outline().information().contains("Base diameter"));
}

#[test]
fn test_contact_ratio_is_symmetric() {
    let a = params(14);
    let b = params(37);
    let ab = contact_ratio(&a, &b).unwrap();
    let ba = contact_ratio(&b, &a).unwrap();
    assert!((ab - ba).abs() < 1e-12);
}

#[test]
fn test_contact_ratio_grows_with_tooth_count() {
    let pinion = params(12);
    let mut previous = 0.0;
    for teeth in [12, 20, 40, 80] {
        let ratio = contact_ratio(&pinion, &params(teeth)).unwrap();
        assert!(ratio > previous, "{} teeth gave {}", teeth, ratio);
        previous = ratio;
    }
}

#[test]
fn test_contact_ratio_table_covers_pairs() {
    let table = contact_ratio_table(&InvoluteParameters::default(), 12..=14).unwrap();
    assert_eq!(table.len(), 6);
    assert!(table.iter().all(|(a, b, ratio)| a <= b && *ratio > 1.0));
}

#[test]
fn test_gears_report_contact_ratio_together() {
    let a = InvoluteGear::new(params(18), &Resolution::coarse()).unwrap();
    let b = InvoluteGear::new(params(30), &Resolution::coarse()).unwrap();
    let direct = contact_ratio(a.parameters(), b.parameters()).unwrap();
    assert!((a.contact_ratio_with(&b).unwrap() - direct).abs() < 1e-12);
}

#[test]
fn test_profile_shift_moves_root_and_tip_outward() {
    let plain = InvoluteGear::new(params(16), &Resolution::coarse()).unwrap();
    let shifted = InvoluteGear::new(
        InvoluteParameters {
            profile_shift: 0.3,
            ..params(16)
        },
        &Resolution::coarse(),
    )
    .unwrap();
    assert!(shifted.root_diameter() > plain.root_diameter());
    assert!(shifted.outside_diameter() > plain.outside_diameter());
}

#[test]
fn test_outline_lies_between_root_and_tip() {
    let gear = InvoluteGear::new(params(24), &Resolution::default()).unwrap();
    let inner = gear.root_diameter() / 2.0;
    let outer = gear.outside_diameter() / 2.0;
    for point in gear.outline().generate_complete_gear_path() {
        let r = point.magnitude();
        assert!(r >= inner - 1e-6 && r <= outer + 1e-6, "radius {}", r);
    }
}

#[test]
fn test_cutter_keeps_outline_joined() {
    let gear = InvoluteGear::new(
        InvoluteParameters {
            cutter_diameter: 1.0,
            ..params(24)
        },
        &Resolution::default(),
    )
    .unwrap();
    assert!(gear.outline().is_valid(), "{}", gear.outline().errors());
    assert_eq!(gear.outline().cut_diameter(), 1.0);
    assert!(gear.outline().complete_path().is_contiguous(ADJACENCY_TOLERANCE));
}

#[test]
fn test_cutter_digs_the_root_deeper() {
    let plain = InvoluteGear::new(params(24), &Resolution::default()).unwrap();
    let cut = InvoluteGear::new(
        InvoluteParameters {
            cutter_diameter: 2.0,
            ..params(24)
        },
        &Resolution::default(),
    )
    .unwrap();
    assert!((plain.root_diameter() - 21.5).abs() < 1e-9);
    assert!(cut.root_diameter() < plain.root_diameter());
    assert!(cut.outline().inner_diameter() < plain.outline().inner_diameter());
    assert!(cut
        .outline()
        .information()
        .contains("Cutter compensation: root diameter reduced"));
    assert!(!plain.outline().information().contains("Cutter compensation"));
}

#[test]
fn test_positive_shift_has_no_undercut_warning() {
    let gear = InvoluteGear::new(
        InvoluteParameters {
            profile_shift: 1.5,
            ..params(8)
        },
        &Resolution::coarse(),
    )
    .unwrap();
    assert!(gear.root_diameter() > gear.pitch_diameter());
    let information = gear.outline().information();
    assert!(!information.contains("undercut reaches above the pitch circle"));
    assert!(!information.contains("Undercut meets"));
}
