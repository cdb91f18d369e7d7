//! Benchmarks for graph manifold operations.
//!
//! Measures neighbor aggregation and the componentwise exponential map on
//! cycle graphs of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use riemannkit_core::manifold::Manifold;
use riemannkit_graphs::{graph_manifold, GraphManifoldType, NeighborAggregation, SimpleGraph};
use riemannkit_manifolds::Sphere;

fn cycle(n: usize) -> SimpleGraph {
    let edges = (0..n).map(|i| (i, (i + 1) % n)).collect();
    SimpleGraph::undirected(n, edges).unwrap()
}

fn bench_incident_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("incident_log");

    for &size in &[16, 128, 1024] {
        let manifold = graph_manifold(Sphere::<f64>::new(3).unwrap(), cycle(size), GraphManifoldType::Vertex);
        let x = manifold.random_point().unwrap();
        let mut out = manifold.zero_vector(&x).unwrap();

        group.bench_with_input(BenchmarkId::new("sphere_cycle", size), &size, |b, _| {
            b.iter(|| manifold.incident_log_into(black_box(&x), &mut out).unwrap());
        });
    }

    group.finish();
}

fn bench_power_exp(c: &mut Criterion) {
    let mut group = c.benchmark_group("power_exp");

    for &size in &[16, 128, 1024] {
        let manifold = graph_manifold(Sphere::<f64>::new(3).unwrap(), cycle(size), GraphManifoldType::Vertex);
        let x = manifold.random_point().unwrap();
        let v = manifold.random_tangent(&x).unwrap();
        let mut y = x.clone();

        group.bench_with_input(BenchmarkId::new("sphere_cycle", size), &size, |b, _| {
            b.iter(|| manifold.exp_into(black_box(&x), black_box(&v), &mut y).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_incident_log, bench_power_exp);
criterion_main!(benches);
