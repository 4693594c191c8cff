//! Benchmarks for incremental triangulation and Voronoi vertex extraction.
//!
//! Point sets are generated from fixed seeds so runs are comparable. Both
//! phases are quadratic: insertion scans the whole mesh per point and the
//! dual builder scans every triangle pair.

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use delaunay_dual::core::algorithms::voronoi::voronoi_vertices;
use delaunay_dual::core::delaunay_triangulation::{DelaunayTriangulation, TriangulationOptions};
use delaunay_dual::geometry::util::generate_random_points_seeded;
use std::hint::black_box;

/// Point counts used across the benchmarks
const COUNTS: &[usize] = &[10, 50, 100, 250];

fn bench_triangulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_points");
    for &count in COUNTS {
        let points = generate_random_points_seeded::<f64>(count, (0.0, 1000.0), 42)
            .expect("Failed to generate benchmark points");
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("f64", count), &points, |b, points| {
            b.iter(|| {
                DelaunayTriangulation::from_points(
                    black_box(points),
                    TriangulationOptions::default(),
                )
                .expect("triangulation failed")
            });
        });
    }
    group.finish();
}

fn bench_voronoi(c: &mut Criterion) {
    let mut group = c.benchmark_group("voronoi_vertices");
    for &count in COUNTS {
        let points = generate_random_points_seeded::<f64>(count, (0.0, 1000.0), 7)
            .expect("Failed to generate benchmark points");
        let dt = DelaunayTriangulation::from_points(&points, TriangulationOptions::default())
            .expect("triangulation failed");
        group.throughput(Throughput::Elements(dt.number_of_delaunay_triangles() as u64));
        group.bench_with_input(BenchmarkId::new("f64", count), &dt, |b, dt| {
            b.iter(|| voronoi_vertices(black_box(dt)).expect("dual failed"));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_triangulation, bench_voronoi);
criterion_main!(benches);
