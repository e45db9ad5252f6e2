//! Benchmarks for closest-pair distance and batch analysis.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point3;
use screwbreach::algo::batch::{analyze_screws, BatchOptions};
use screwbreach::algo::distance::{nearest_distance, nearest_distance_par};
use screwbreach::prelude::*;

/// Points on a `n x n` grid in the plane x = `x`.
fn create_grid(n: usize, x: f64) -> PointSet {
    let mut points = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            points.push(Point3::new(x, i as f64 * 0.1, j as f64 * 0.1));
        }
    }
    PointSet::new(points)
}

fn bench_nearest_distance(c: &mut Criterion) {
    let wall = create_grid(100, 10.0);
    let screw = create_grid(30, 9.0);

    c.bench_function("nearest_distance_900x10000", |b| {
        b.iter(|| nearest_distance(&screw, &wall).unwrap());
    });

    c.bench_function("nearest_distance_par_900x10000", |b| {
        b.iter(|| nearest_distance_par(&screw, &wall).unwrap());
    });
}

fn bench_batch(c: &mut Criterion) {
    let medial = create_grid(60, 10.0);
    let lateral = create_grid(60, -10.0);
    let screws: Vec<(String, PointSet)> = (0..8)
        .map(|k| (format!("screw_{k}.stl"), create_grid(20, k as f64 - 4.0)))
        .collect();

    c.bench_function("batch_8_screws_sequential", |b| {
        let options = BatchOptions::default().sequential();
        b.iter(|| analyze_screws(&medial, &lateral, &screws, &options, &Progress::none()).unwrap());
    });

    c.bench_function("batch_8_screws_parallel", |b| {
        let options = BatchOptions::default();
        b.iter(|| analyze_screws(&medial, &lateral, &screws, &options, &Progress::none()).unwrap());
    });
}

criterion_group!(benches, bench_nearest_distance, bench_batch);
criterion_main!(benches);
