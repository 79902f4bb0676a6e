use hom_core::{Distribution, GridGeometry, HomError, RngHandle};
use hom_eval::{compare, evaluate_collage};
use hom_gen::{build_grid, CollageSpec, GenerationOptions, InclusionMask};
use ndarray::s;

fn spec(distribution: Distribution) -> CollageSpec {
    CollageSpec {
        distribution,
        means: vec![44.0, 132.0],
        spreads: vec![0.5, 2.5],
        geometry: GridGeometry::new(2, 2, 96, 80).unwrap(),
    }
}

#[test]
fn evaluation_covers_every_cell_in_raster_order() {
    let spec = spec(Distribution::Gaussian);
    let mut rng = RngHandle::from_seed(42);
    let (composite, truth, mask) =
        build_grid(&spec, &GenerationOptions::noisy(50.0), &mut rng).unwrap();
    let record = evaluate_collage(composite.pixels.view(), mask.view(), &spec.geometry).unwrap();
    let positions: Vec<_> = record.cells.iter().map(|c| (c.row, c.column)).collect();
    assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);

    let metrics = compare(&truth, &record).unwrap();
    assert!(metrics.mean_skewness_error < 0.1, "{metrics:?}");
    assert!(metrics.mean_kurtosis_error < 0.2, "{metrics:?}");
}

#[test]
fn border_values_do_not_leak_into_cells() {
    let spec = spec(Distribution::Uniform);
    let mut rng = RngHandle::from_seed(7);
    let (mut composite, _, mask) =
        build_grid(&spec, &GenerationOptions::noisy(30.0), &mut rng).unwrap();
    let before = evaluate_collage(composite.pixels.view(), mask.view(), &spec.geometry).unwrap();
    composite.pixels.slice_mut(s![0..8, ..]).fill(1.0e6);
    composite.pixels.slice_mut(s![.., 88..104]).fill(-1.0e6);
    let after = evaluate_collage(composite.pixels.view(), mask.view(), &spec.geometry).unwrap();
    assert_eq!(before, after);
}

#[test]
fn geometry_mismatch_is_rejected() {
    let spec = spec(Distribution::Gaussian);
    let mut rng = RngHandle::from_seed(1);
    let (composite, _, _) = build_grid(&spec, &GenerationOptions::clean(50.0), &mut rng).unwrap();
    let other = GridGeometry::new(2, 2, 64, 48).unwrap();
    let other_mask = InclusionMask::from_geometry(&other).unwrap();
    match evaluate_collage(composite.pixels.view(), other_mask.view(), &spec.geometry) {
        Err(HomError::Precondition(info)) => assert_eq!(info.code, "collage-shape"),
        other => panic!("unexpected {other:?}"),
    }
    assert!(evaluate_collage(composite.pixels.view(), other_mask.view(), &other).is_err());
}
