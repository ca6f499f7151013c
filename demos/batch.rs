//! Batch Operations Demonstration
//!
//! Normalizes and measures a large set of random directions, sequentially
//! and with rayon, and compares the timings.
//!
//! Run with `RUST_LOG=debug cargo run --release --example batch`.

use std::time::Instant;

use simdvec::batch::PAR_THRESHOLD;
use simdvec::{vec3, FloatBatch, Vec3f, VectorBatch};

const COUNT: usize = 1_000_000;

fn main() {
    env_logger::init();
    simdvec::simd::log_backend();

    let directions: Vec<Vec3f> = (0..COUNT)
        .map(|i| {
            let t = i as f32 * 0.001;
            vec3(t.cos(), t.sin(), 1.0 + (i % 7) as f32)
        })
        .collect();

    println!("Batch over {COUNT} vectors (parallel above {PAR_THRESHOLD})\n");

    let start = Instant::now();
    let mut sequential = directions.clone();
    sequential.normalize_each();
    let sequential_time = start.elapsed();

    let start = Instant::now();
    let mut parallel = directions.clone();
    parallel.par_normalize_each();
    let parallel_time = start.elapsed();

    println!("normalize_each:     {:>10.3?}", sequential_time);
    println!("par_normalize_each: {:>10.3?}", parallel_time);
    println!("results identical:  {}", sequential == parallel);
    println!();

    let up = vec![vec3(0.0f32, 0.0, 1.0); COUNT];
    match parallel.par_dot_each(&up) {
        Ok(cosines) => {
            let mean = cosines.iter().sum::<f32>() / COUNT as f32;
            println!("mean cosine to +z:  {mean:.6}");
        }
        Err(e) => println!("dot_each failed: {e}"),
    }

    let total = parallel.par_total();
    println!("sum of directions:  {total}");
    println!("length of mean:     {:.6}", total.length() / COUNT as f32);

    if let Err(e) = parallel.par_dot_each(&up[..10]) {
        println!("\nmismatched batch:   {e}");
    }
}
