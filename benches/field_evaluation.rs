use criterion::{criterion_group, criterion_main, Criterion};
extern crate magfield_golden as lib;

use lib::grid::{build_grid, GridSpec};
use lib::magnetic::FieldSource;
use lib::oracle::AnalyticOracle;
use lib::scenario::{collection_suite, cylinder_suite};

fn criterion_benchmark(c: &mut Criterion) {
    let grid = GridSpec::cube(-5.0, 5.0, 20);
    c.bench_function("build_grid_20", |b| b.iter(|| build_grid(&grid)));

    // Same point sets as the written datasets.
    let cylinder = cylinder_suite();
    let cylinder_points = build_grid(&cylinder.grid).unwrap();
    let magnet = cylinder.scenarios[0].prepare().unwrap();
    c.bench_function("cylinder_field_8000", |b| {
        b.iter(|| magnet.get_field(&AnalyticOracle, &cylinder_points))
    });

    let collection = collection_suite();
    let collection_points = build_grid(&collection.grid).unwrap();
    let group = collection.scenarios[3].prepare().unwrap();
    c.bench_function("collection_field_1000", |b| {
        b.iter(|| group.get_field(&AnalyticOracle, &collection_points))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
