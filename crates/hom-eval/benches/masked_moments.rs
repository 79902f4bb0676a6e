use criterion::{criterion_group, criterion_main, Criterion};
use hom_core::{Distribution, GridGeometry, RngHandle};
use hom_eval::{evaluate_collage, masked_moments};
use hom_gen::{build_grid, CollageSpec, GenerationOptions};

fn bench_moments(c: &mut Criterion) {
    let spec = CollageSpec {
        distribution: Distribution::Exponential,
        means: vec![44.0, 88.0, 132.0, 176.0, 220.0],
        spreads: vec![0.5, 1.0, 1.5, 2.0, 2.5],
        geometry: GridGeometry::default(),
    };
    let mut rng = RngHandle::from_seed(42);
    let (composite, _, mask) =
        build_grid(&spec, &GenerationOptions::noisy(20.0), &mut rng).expect("collage");

    c.bench_function("masked_moments_full_collage", |b| {
        b.iter(|| masked_moments(composite.pixels.view(), mask.view()).expect("moments"))
    });
    c.bench_function("evaluate_collage_5x5", |b| {
        b.iter(|| {
            evaluate_collage(composite.pixels.view(), mask.view(), &spec.geometry)
                .expect("evaluation")
        })
    });
}

criterion_group!(benches, bench_moments);
criterion_main!(benches);
