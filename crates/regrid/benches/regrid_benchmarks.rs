//! Benchmarks for the regrid crate - index construction and frame mapping.
//!
//! Run with: cargo bench --package regrid
//! Or: cargo bench --package regrid --bench regrid_benchmarks -- apply

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regrid::{CoordType, CoordinateMesh, KdTree, RegridConfig, RegridEngine};

/// Unstructured mesh with points scattered uniformly in lon/lat.
fn random_mesh(n: usize, seed: u64) -> CoordinateMesh {
    let mut rng = StdRng::seed_from_u64(seed);
    let lon: Vec<f64> = (0..n).map(|_| rng.gen_range(-180.0..180.0)).collect();
    let lat: Vec<f64> = (0..n).map(|_| rng.gen_range(-90.0..90.0)).collect();
    CoordinateMesh::new(lon, lat, CoordType::Unstructured1D).expect("valid mesh")
}

// =============================================================================
// KD-TREE BENCHMARKS
// =============================================================================

fn bench_kdtree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_build");

    for n in [10_000usize, 100_000, 500_000] {
        let mesh = random_mesh(n, 1);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), mesh.xyz(), |b, points| {
            b.iter(|| KdTree::build(black_box(points)).expect("build"));
        });
    }

    group.finish();
}

fn bench_kdtree_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_query");

    let queries: Vec<_> = {
        let mut rng = StdRng::seed_from_u64(2);
        (0..10_000)
            .map(|_| projection::project(rng.gen_range(-180.0..180.0), rng.gen_range(-90.0..90.0)))
            .collect()
    };

    for n in [10_000usize, 100_000, 500_000] {
        let tree = KdTree::build(random_mesh(n, 3).xyz()).expect("build");
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &tree, |b, tree| {
            b.iter(|| {
                queries
                    .iter()
                    .map(|q| tree.query_nearest(black_box(q)).0)
                    .sum::<usize>()
            });
        });
    }

    group.finish();
}

// =============================================================================
// ENGINE BENCHMARKS
// =============================================================================

fn bench_engine_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_create");
    group.sample_size(10);

    let mesh = random_mesh(200_000, 4);
    for (res, parallel) in [(1.0, false), (1.0, true), (0.5, true)] {
        let config = RegridConfig::new(res, 200_000.0).with_parallel(parallel);
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_with_input(BenchmarkId::new(label, res), &config, |b, config| {
            b.iter(|| RegridEngine::from_config(&mesh, black_box(config)).expect("engine"));
        });
    }

    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");

    let mesh = random_mesh(200_000, 5);
    let data: Vec<f32> = (0..mesh.n_points()).map(|i| (i % 300) as f32).collect();

    for res in [1.0, 0.5, 0.25] {
        let engine = RegridEngine::create(&mesh, res, 200_000.0).expect("engine");
        let (nx, ny) = engine.target_dims();
        group.throughput(Throughput::Elements((nx * ny) as u64));

        group.bench_with_input(BenchmarkId::new("alloc", res), &data, |b, data| {
            b.iter(|| engine.apply(black_box(data), f32::NAN).expect("apply"));
        });

        let mut out = vec![0.0f32; nx * ny];
        group.bench_with_input(BenchmarkId::new("into", res), &data, |b, data| {
            b.iter(|| {
                engine
                    .apply_into(black_box(data), f32::NAN, &mut out)
                    .expect("apply")
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_kdtree_build,
    bench_kdtree_query,
    bench_engine_create,
    bench_apply,
);
criterion_main!(benches);
