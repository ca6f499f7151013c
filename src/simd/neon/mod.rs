//! AArch64 NEON register kernels.
//!
//! Compiled when the build selects the `neon` backend, which `build.rs` only
//! does on AArch64: the horizontal reductions (`vaddvq`, `vminvq`), `vdivq`
//! and the table lookup `vqtbl1q_u8` are AArch64-only.
//!
//! # Available Kernels
//!
//! - [`f32x4`]: `f32` vectors of 2, 3 and 4 lanes in one `float32x4_t`.
//! - [`i32x4`]: `i32` and `u32` vectors of 2, 3 and 4 lanes in one
//!   `int32x4_t` / `uint32x4_t`.
//! - [`f64x2`]: 2-lane `f64` vectors in one `float64x2_t`.
//!
//! 3 and 4-lane `f64` vectors do not fit a 128-bit register and use the
//! portable kernels.
//!
//! # Padding
//!
//! Shuffles use byte-granular table lookups with `0xFF` for the padding
//! bytes, which `tbl` turns into zero. Reductions mask the padding lanes and
//! comparisons force their result lanes to true before the `vminvq` check.

use std::arch::aarch64::*;

use crate::simd::utils::{byte_control, lane_mask32, Align16};

pub mod f32x4;
pub mod f64x2;
pub mod i32x4;

pub const NEON_ALIGNMENT: usize = 16;

pub const LANE_COUNT: usize = 4;

/// All-ones in the first `N` 32-bit lanes, zero in the padding lanes.
#[inline(always)]
pub(crate) fn mask32<const N: usize>() -> uint32x4_t {
    let mask = Align16(lane_mask32::<LANE_COUNT>(N));
    unsafe { vld1q_u32(mask.0.as_ptr()) }
}

/// Table lookup permutation of a 16-byte register holding lanes of
/// `lane_bytes` bytes: output lane `i` is lane `indices[i]`, output lanes past
/// `N` are zero.
#[inline(always)]
pub(crate) fn permute_bytes<const N: usize>(
    v: uint8x16_t,
    indices: [usize; N],
    lane_bytes: usize,
) -> uint8x16_t {
    let control = Align16(byte_control(indices, lane_bytes, 0xFF));
    unsafe { vqtbl1q_u8(v, vld1q_u8(control.0.as_ptr())) }
}

/// True when every logical lane of a comparison result is set.
#[inline(always)]
pub(crate) fn all_lanes<const N: usize>(comparison: uint32x4_t) -> bool {
    unsafe { vminvq_u32(vorrq_u32(comparison, vmvnq_u32(mask32::<N>()))) == u32::MAX }
}

/// Debug-checks a permutation before it reaches a control builder.
#[inline(always)]
pub(crate) fn check_indices<const N: usize>(indices: &[usize; N]) {
    debug_assert!(
        indices.iter().all(|&index| index < N),
        "shuffle index out of range for {N} lanes: {indices:?}"
    );
}
