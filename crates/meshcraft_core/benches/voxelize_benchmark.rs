//! Benchmark for voxelization and quantization.
//!
//! Run with: cargo bench --package meshcraft_core --bench voxelize_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use meshcraft_core::palette::WOOL;
use meshcraft_core::{Point, Triangle, TriangleSet, Volume, Voxelizer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_mesh(triangles: usize) -> TriangleSet {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let point = |rng: &mut StdRng| {
        Point::new(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        )
    };

    let mut mesh = TriangleSet::with_capacity(triangles);
    for _ in 0..triangles {
        let tri = Triangle::new(point(&mut rng), point(&mut rng), point(&mut rng));
        mesh.append(&tri);
    }
    mesh
}

fn benchmark_voxelize(c: &mut Criterion) {
    let mesh = random_mesh(500);
    let mut group = c.benchmark_group("voxelize_500_triangles");
    group.sample_size(20);

    for threads in [1usize, 4] {
        group.bench_with_input(BenchmarkId::new("threads", threads), &threads, |b, &t| {
            let voxelizer = Voxelizer::new(64).with_threads(t);
            b.iter(|| black_box(voxelizer.voxelize(&mesh)));
        });
    }
    group.finish();
}

fn benchmark_quantize(c: &mut Criterion) {
    let grid = Voxelizer::new(64).voxelize(&random_mesh(200));

    c.bench_function("quantize_full_grid", |b| {
        b.iter(|| {
            let mut solid = 0usize;
            for z in 0..grid.depth() {
                for y in 0..grid.height() {
                    for x in 0..grid.width() {
                        if !WOOL.quantize(grid.voxel(x, y, z)).is_air() {
                            solid += 1;
                        }
                    }
                }
            }
            black_box(solid)
        });
    });
}

criterion_group!(benches, benchmark_voxelize, benchmark_quantize);
criterion_main!(benches);
