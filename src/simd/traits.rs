//! Backend traits.
//!
//! Every (scalar, width) combination has exactly one [`Kernel`] implementation
//! per build: either the portable array kernel or a register kernel chosen by
//! the build configuration. [`Vector`](crate::Vector) only ever talks to its
//! storage through these traits.

use crate::scalar::{FloatScalar, Scalar};

/// Storage and primitive operations for `N`-lane vectors of `Self`.
///
/// Implemented for `N` in {2, 3, 4} only, which is what rejects other widths
/// at compile time.
///
/// Register kernels may store more lanes than `N`. Those padding lanes take
/// part in lane-parallel arithmetic but every reduction, comparison and
/// permutation excludes them, and permutations leave them zeroed.
pub trait Kernel<const N: usize>: Scalar {
    /// Canonical lane storage, at least `N` lanes, aligned for the register.
    type Storage: Copy + Send + Sync + 'static;

    /// Whether this combination is register-backed in the current build.
    const VECTORIZED: bool;

    /// All lanes, padding included, set to `value`.
    fn splat(value: Self) -> Self::Storage;

    /// Lane `i` set to `lanes[i]`, padding lanes zeroed.
    fn from_array(lanes: [Self; N]) -> Self::Storage;

    /// The `N` logical lanes.
    fn lanes(storage: &Self::Storage) -> &[Self; N];

    /// Mutable access to the `N` logical lanes.
    fn lanes_mut(storage: &mut Self::Storage) -> &mut [Self; N];

    fn add(a: Self::Storage, b: Self::Storage) -> Self::Storage;

    fn sub(a: Self::Storage, b: Self::Storage) -> Self::Storage;

    fn mul(a: Self::Storage, b: Self::Storage) -> Self::Storage;

    /// Lane-wise division over the `N` logical lanes.
    fn div(a: Self::Storage, b: Self::Storage) -> Self::Storage;

    /// `a * b + c`, fused when the build has FMA.
    fn mul_add(a: Self::Storage, b: Self::Storage, c: Self::Storage) -> Self::Storage;

    /// `a * b - c`, fused when the build has FMA.
    fn mul_sub(a: Self::Storage, b: Self::Storage, c: Self::Storage) -> Self::Storage;

    /// Output lane `i` is input lane `indices[i]`. Every index must be below `N`.
    fn shuffle(v: Self::Storage, indices: [usize; N]) -> Self::Storage;

    /// Sum of the lane-wise products over the `N` logical lanes.
    fn dot(a: Self::Storage, b: Self::Storage) -> Self;

    /// Horizontal sum of the `N` logical lanes.
    fn sum(v: Self::Storage) -> Self;

    fn abs(v: Self::Storage) -> Self::Storage;

    /// Exact lane-wise equality over the `N` logical lanes.
    fn eq(a: Self::Storage, b: Self::Storage) -> bool;
}

/// Floating-point only operations.
pub trait FloatKernel<const N: usize>: Kernel<N> + FloatScalar {
    fn sqrt(v: Self::Storage) -> Self::Storage;

    /// `1 / x` at full precision.
    fn rcp(v: Self::Storage) -> Self::Storage;

    /// `1 / sqrt(x)` at full precision.
    fn rsqrt(v: Self::Storage) -> Self::Storage;
}

/// Access to the native register of a register-backed kernel.
pub trait Register<const N: usize>: Kernel<N> {
    /// The hardware SIMD register type, e.g. `__m128` or `float32x4_t`.
    type Register: Copy;

    /// Stores `register` as the vector's storage, without validating the
    /// contents of the padding lanes.
    fn from_register(register: Self::Register) -> Self::Storage;

    /// Loads the storage, padding lanes included, into a register.
    fn to_register(storage: &Self::Storage) -> Self::Register;
}
