use crate::common::every_family;
use gearcut_core::{Resolution, ADJACENCY_TOLERANCE};
use gearcut_profiles::GearProfile;
use std::collections::HashSet;

#[test]
fn test_every_family_builds_a_closed_outline() {
    for params in every_family() {
        let profile = GearProfile::synthesize(&params, &Resolution::coarse()).unwrap();
        assert!(profile.errors().is_empty(), "{}: {}", profile.family(), profile.errors());
        assert!(!profile.information().is_empty(), "{}", profile.family());

        let path = profile.complete_path();
        assert!(path.is_closed(), "{}", profile.family());
        assert!(path.is_contiguous(ADJACENCY_TOLERANCE), "{}", profile.family());
        let first = path.start().unwrap();
        let last = path.end().unwrap();
        assert!(first.approx_eq(last, 1e-9), "{} does not close", profile.family());
    }
}

#[test]
fn test_complete_point_path_shares_tooth_ends() {
    for params in every_family() {
        let profile = GearProfile::synthesize(&params, &Resolution::coarse()).unwrap();
        let per_tooth = profile.tooth_profile(0).len();
        assert!(per_tooth >= 2, "{}", profile.family());
        let total = profile.generate_complete_gear_path().count();
        assert_eq!(total, profile.tooth_count() * (per_tooth - 1), "{}", profile.family());

        let last_of_first = profile.tooth_profile(0)[per_tooth - 1];
        let first_of_second = profile.tooth_profile(1)[0];
        assert!(
            last_of_first.approx_eq(first_of_second, 1e-6),
            "{} teeth do not meet",
            profile.family()
        );
    }
}

#[test]
fn test_short_names_differ_between_families() {
    let names: HashSet<String> = every_family().iter().map(|p| p.short_name()).collect();
    assert_eq!(names.len(), 6);
}

#[test]
fn test_parameters_survive_json() {
    for params in every_family() {
        let json = serde_json::to_string(&params).unwrap();
        let back = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}

#[test]
fn test_finer_resolution_keeps_outline_within_tolerance() {
    for params in every_family() {
        let coarse = GearProfile::synthesize(&params, &Resolution::coarse()).unwrap();
        let fine = GearProfile::synthesize(&params, &Resolution::default()).unwrap();
        assert!(fine.errors().is_empty(), "{}", fine.family());
        assert!(
            (coarse.inner_diameter() - fine.inner_diameter()).abs() < 0.05,
            "{}: {} vs {}",
            coarse.family(),
            coarse.inner_diameter(),
            fine.inner_diameter()
        );
    }
}
