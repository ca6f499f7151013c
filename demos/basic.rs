//! Basic Vector Demonstration
//!
//! Builds a few vectors, runs the arithmetic and geometry operations and
//! shows the fallible conversions.
//!
//! Run with `RUST_LOG=info cargo run --example basic` to see which backend
//! the build selected.

use simdvec::{vec2, vec3, Vec3f, Vec4f, Vec4i, VectorError};

fn main() {
    env_logger::init();
    simdvec::simd::log_backend();

    println!("Simdvec Basic Demonstration\n");

    println!("Example 1: Construction and views");
    let mut color = Vec4f::new(0.2, 0.4, 0.6, 1.0);
    color.color_mut().a = 0.5;
    println!("   rgba = {color}, alpha via w = {}", color.w);
    println!("   register backed: {}", Vec4f::VECTORIZED);
    println!();

    println!("Example 2: Arithmetic");
    let a = vec3(1.0f32, 2.0, 3.0);
    let b = Vec3f::splat(2.0);
    println!("   {a} + {b} = {}", a + b);
    println!("   {a} * 2 = {}", a * 2.0);
    println!("   10 - {a} = {}", 10.0 - a);
    println!();

    println!("Example 3: Geometry");
    let x = vec3(1.0f32, 0.0, 0.0);
    let y = vec3(0.0f32, 1.0, 0.0);
    println!("   x . y = {}", x.dot(y));
    println!("   x x y = {}", x.cross(y));
    println!("   |(3, 4)| = {}", vec2(3.0f32, 4.0).length());
    println!("   normalize({a}) = {}", a.normalize());
    println!("   lerp({x}, {y}, 0.25) = {}", x.lerp(y, 0.25));
    println!();

    println!("Example 4: Shuffles");
    let v = Vec4i::new(1, 2, 3, 4);
    println!("   {v}.wzyx = {}", v.shuffle::<3, 2, 1, 0>());
    println!("   {v}.shuffle_dyn([0, 0, 1, 1]) = {}", v.shuffle_dyn([0, 0, 1, 1]));
    println!();

    println!("Example 5: Fallible conversions");
    match Vec3f::try_from_slice(&[1.0, 2.0]) {
        Ok(v) => println!("   Unexpected success: {v}"),
        Err(VectorError::LengthMismatch { expected, found }) => {
            println!("   Length mismatch caught: expected {expected}, found {found}")
        }
        Err(e) => println!("   Error: {e}"),
    }
    match Vec4i::splat_cast(3.5e10f64) {
        Ok(v) => println!("   Unexpected success: {v}"),
        Err(e) => println!("   Error caught: {e}"),
    }
}
