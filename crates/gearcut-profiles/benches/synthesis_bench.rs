use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gearcut_core::Resolution;
use gearcut_profiles::{CutoutParameters, Cutouts, GearParameters, GearProfile, InvoluteParameters};

fn involute(teeth: usize) -> GearParameters {
    GearParameters::Involute(InvoluteParameters {
        teeth,
        ..Default::default()
    })
}

fn bench_involute_synthesis(c: &mut Criterion) {
    let resolution = Resolution::default();
    let params = involute(40);
    c.bench_function("involute_z40", |b| {
        b.iter(|| GearProfile::synthesize(black_box(&params), &resolution))
    });

    let compensated = GearParameters::Involute(InvoluteParameters {
        teeth: 40,
        cutter_diameter: 1.0,
        ..Default::default()
    });
    c.bench_function("involute_z40_cutter", |b| {
        b.iter(|| GearProfile::synthesize(black_box(&compensated), &resolution))
    });
}

fn bench_complete_path(c: &mut Criterion) {
    let Ok(gear) = GearProfile::synthesize(&involute(120), &Resolution::default()) else {
        return;
    };
    c.bench_function("complete_path_z120", |b| {
        b.iter(|| black_box(&gear).generate_complete_gear_path().count())
    });
    c.bench_function("cutouts_z120", |b| {
        b.iter(|| Cutouts::new(black_box(&gear), CutoutParameters::default()))
    });
}

criterion_group!(benches, bench_involute_synthesis, bench_complete_path);
criterion_main!(benches);
