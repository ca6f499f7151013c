//! Vector Operation Benchmarks
//!
//! Compares the active backend against plain array arithmetic for the
//! per-vector operations, and the sequential batch helpers against their
//! rayon counterparts.
//!
//! # Benchmark Categories
//!
//! ## 1. **Per-vector operations**
//! - `dot`, `cross`, `normalize` and `lerp` over a slice of `Vec3f`
//! - the same loop written over `[f32; 3]` as the baseline
//!
//! ## 2. **Batch operations**
//! - `dot_each` and `par_dot_each` across slice sizes
//! - `total` and `par_total`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use simdvec::batch::PAR_THRESHOLD;
use simdvec::{FloatBatch, Vec3f, Vec4f, VectorBatch};

/// Number of vectors per iteration in the per-vector benchmarks.
const LOOP_LEN: usize = 1_024;

/// Slice sizes for the batch benchmarks, below and above the parallel
/// threshold.
const BATCH_SIZES: &[usize] = &[1_024, 16_384, 262_144, 1_048_576];

fn generate_arrays<const N: usize>(len: usize, seed: u64) -> Vec<[f32; N]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| std::array::from_fn(|_| rng.random_range(-1.0..1.0)))
        .collect()
}

fn scalar_dot(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn scalar_cross(a: &[f32; 3], b: &[f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn benchmark_vector_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("Vec3f_{}", simdvec::simd::ACTIVE));
    group.throughput(Throughput::Elements(LOOP_LEN as u64));

    let a_arrays = generate_arrays::<3>(LOOP_LEN, 42);
    let b_arrays = generate_arrays::<3>(LOOP_LEN, 43);
    let a: Vec<Vec3f> = a_arrays.iter().map(|&v| Vec3f::from(v)).collect();
    let b: Vec<Vec3f> = b_arrays.iter().map(|&v| Vec3f::from(v)).collect();

    group.bench_function("dot/vector", |bencher| {
        bencher.iter(|| {
            a.iter()
                .zip(&b)
                .map(|(x, y)| x.dot(*y))
                .fold(0.0, |acc, d| acc + black_box(d))
        })
    });
    group.bench_function("dot/scalar", |bencher| {
        bencher.iter(|| {
            a_arrays
                .iter()
                .zip(&b_arrays)
                .map(|(x, y)| scalar_dot(x, y))
                .fold(0.0, |acc, d| acc + black_box(d))
        })
    });

    group.bench_function("cross/vector", |bencher| {
        bencher.iter(|| {
            for (x, y) in a.iter().zip(&b) {
                black_box(x.cross(*y));
            }
        })
    });
    group.bench_function("cross/scalar", |bencher| {
        bencher.iter(|| {
            for (x, y) in a_arrays.iter().zip(&b_arrays) {
                black_box(scalar_cross(x, y));
            }
        })
    });

    group.bench_function("normalize/vector", |bencher| {
        bencher.iter(|| {
            for x in &a {
                black_box(x.normalize());
            }
        })
    });

    group.bench_function("lerp/vector", |bencher| {
        bencher.iter(|| {
            for (x, y) in a.iter().zip(&b) {
                black_box(x.lerp(*y, black_box(0.25)));
            }
        })
    });

    group.finish();

    let mut group = c.benchmark_group(format!("Vec4f_{}", simdvec::simd::ACTIVE));
    group.throughput(Throughput::Elements(LOOP_LEN as u64));

    let a4: Vec<Vec4f> = generate_arrays::<4>(LOOP_LEN, 44)
        .into_iter()
        .map(Vec4f::from)
        .collect();

    group.bench_function("shuffle/const", |bencher| {
        bencher.iter(|| {
            for x in &a4 {
                black_box(x.shuffle::<3, 2, 1, 0>());
            }
        })
    });
    group.bench_function("shuffle/dyn", |bencher| {
        bencher.iter(|| {
            for x in &a4 {
                black_box(x.shuffle_dyn(black_box([3, 2, 1, 0])));
            }
        })
    });
    group.bench_function("sum", |bencher| {
        bencher.iter(|| a4.iter().fold(0.0, |acc, x| acc + black_box(x.sum())))
    });

    group.finish();
}

fn benchmark_batch_operations(c: &mut Criterion) {
    for &size in BATCH_SIZES {
        let mut group = c.benchmark_group(format!("Batch_{size}"));
        group.throughput(Throughput::Elements(size as u64));

        let a: Vec<Vec3f> = generate_arrays::<3>(size, 42)
            .into_iter()
            .map(Vec3f::from)
            .collect();
        let b: Vec<Vec3f> = generate_arrays::<3>(size, 43)
            .into_iter()
            .map(Vec3f::from)
            .collect();

        group.bench_with_input(BenchmarkId::new("dot_each", size), &(&a, &b), |bencher, (a, b)| {
            bencher.iter(|| black_box(a.dot_each(b)))
        });
        group.bench_with_input(BenchmarkId::new("lengths", size), &a, |bencher, a| {
            bencher.iter(|| black_box(a.lengths()))
        });
        group.bench_with_input(BenchmarkId::new("total", size), &a, |bencher, a| {
            bencher.iter(|| black_box(a.total()))
        });

        if size >= PAR_THRESHOLD {
            group.bench_with_input(
                BenchmarkId::new("par_dot_each", size),
                &(&a, &b),
                |bencher, (a, b)| bencher.iter(|| black_box(a.par_dot_each(b))),
            );
            group.bench_with_input(BenchmarkId::new("par_lengths", size), &a, |bencher, a| {
                bencher.iter(|| black_box(a.par_lengths()))
            });
            group.bench_with_input(BenchmarkId::new("par_total", size), &a, |bencher, a| {
                bencher.iter(|| black_box(a.par_total()))
            });
        }

        group.finish();
    }
}

criterion_group!(benches, benchmark_vector_operations, benchmark_batch_operations);
criterion_main!(benches);
