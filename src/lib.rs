//! Small 2, 3 and 4-lane vectors over `f32`, `f64`, `i32` and `u32`, kept in
//! SIMD registers where the target has them.
//!
//! One backend is fixed per build (see [`simd`]): SSE, AVX or AVX2 on x86,
//! NEON on AArch64, or the portable element-wise backend. Every backend gives
//! the same values through the same [`Vector`] API.
//!
//! ```rust
//! use simdvec::{vec2, Vec4f};
//!
//! let a = vec2(2.0f32, 2.0);
//! let b = vec2(4.0f32, 4.0);
//! assert_eq!(a.lerp(b, 0.5), vec2(3.0, 3.0));
//!
//! let c = Vec4f::new(1.0, 2.0, 3.0, 4.0);
//! assert_eq!(c.shuffle::<3, 2, 1, 0>().x, 4.0);
//! assert_eq!(c.sum(), 10.0);
//!
//! println!("register backed: {}", Vec4f::VECTORIZED);
//! ```

pub mod batch;
pub mod error;
pub mod interop;
pub mod scalar;
pub mod simd;
pub mod vector;

pub use batch::{FloatBatch, VectorBatch};
pub use error::{Result, VectorError};
pub use scalar::{FloatScalar, Scalar};
pub use simd::traits::{FloatKernel, Kernel, Register};
pub use simd::Backend;
pub use vector::views::{Rg, Rgb, Rgba, Xy, Xyz, Xyzw};
pub use vector::Vector;

pub type Vec2<T> = Vector<T, 2>;
pub type Vec3<T> = Vector<T, 3>;
pub type Vec4<T> = Vector<T, 4>;

pub type Vec2f = Vec2<f32>;
pub type Vec3f = Vec3<f32>;
pub type Vec4f = Vec4<f32>;

pub type Vec2d = Vec2<f64>;
pub type Vec3d = Vec3<f64>;
pub type Vec4d = Vec4<f64>;

pub type Vec2i = Vec2<i32>;
pub type Vec3i = Vec3<i32>;
pub type Vec4i = Vec4<i32>;

pub type Vec2u = Vec2<u32>;
pub type Vec3u = Vec3<u32>;
pub type Vec4u = Vec4<u32>;

#[inline(always)]
pub fn vec2<T: Kernel<2>>(x: T, y: T) -> Vec2<T> {
    Vector::<T, 2>::new(x, y)
}

#[inline(always)]
pub fn vec3<T: Kernel<3>>(x: T, y: T, z: T) -> Vec3<T> {
    Vector::<T, 3>::new(x, y, z)
}

#[inline(always)]
pub fn vec4<T: Kernel<4>>(x: T, y: T, z: T, w: T) -> Vec4<T> {
    Vector::<T, 4>::new(x, y, z, w)
}
