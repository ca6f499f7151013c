//! x86 register kernels.
//!
//! Compiled when the build selects the `sse` backend or above.
//!
//! # Available Kernels
//!
//! - [`f32x4`]: `f32` vectors of 2, 3 and 4 lanes in one `__m128`.
//! - [`i32x4`]: `i32` and `u32` vectors of 2, 3 and 4 lanes in one `__m128i`.
//! - [`f64x2`]: 2-lane `f64` vectors in one `__m128d`.
//! - [`f64x4`]: 3 and 4-lane `f64` vectors in one `__m256d` (`avx` only).
//!
//! # Padding
//!
//! Vectors narrower than the register keep their padding lanes in the same
//! aligned array. Reductions mask them out (or select lanes by immediate on
//! SSE4.1), comparisons ignore their mask bits and permutations zero them.
//!
//! # Capability Flags
//!
//! - `sse3`: `haddps`/`haddpd` horizontal sums.
//! - `ssse3`: `pshufb` byte permutes, `phaddd` and `pabsd`.
//! - `sse41`: `dpps`/`dppd` dot products and `pmulld`.
//! - `avx`: `vpermilps`/`vpermilpd` variable permutes.
//! - `fma`: fused `vfmadd`/`vfmsub`.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::utils::{lane_mask32, Align16};

pub mod f32x4;
pub mod f64x2;
pub mod i32x4;

#[cfg(avx)]
pub mod f64x4;

pub const SSE_ALIGNMENT: usize = 16;

pub const LANE_COUNT: usize = 4;

/// All-ones in the first `N` 32-bit lanes, zero in the padding lanes.
#[inline(always)]
pub(crate) fn mask32<const N: usize>() -> __m128i {
    let mask = Align16(lane_mask32::<LANE_COUNT>(N));
    unsafe { _mm_load_si128(mask.0.as_ptr().cast()) }
}

/// Bitmask of the first `N` lanes, as produced by `movemask`.
#[inline(always)]
pub(crate) const fn movemask_bits<const N: usize>() -> i32 {
    (1 << N) - 1
}

/// Permutes the 32-bit lanes of `v`: output lane `i` is lane `indices[i]`,
/// output lanes past `N` are zero.
#[cfg(avx)]
#[inline(always)]
pub(crate) fn permute32<const N: usize>(v: __m128i, indices: [usize; N]) -> __m128i {
    use crate::simd::utils::lane_control;

    let control = Align16(lane_control::<N, LANE_COUNT>(indices));
    unsafe {
        let control = _mm_load_si128(control.0.as_ptr().cast());
        let permuted = _mm_castps_si128(_mm_permutevar_ps(_mm_castsi128_ps(v), control));
        _mm_and_si128(permuted, mask32::<N>())
    }
}

/// Permutes the 32-bit lanes of `v` with a byte shuffle. Padding control
/// bytes have the high bit set, which `pshufb` turns into zero.
#[cfg(all(ssse3, not(avx)))]
#[inline(always)]
pub(crate) fn permute32<const N: usize>(v: __m128i, indices: [usize; N]) -> __m128i {
    use crate::simd::utils::byte_control;

    let control = Align16(byte_control(indices, 4, 0x80));
    unsafe { _mm_shuffle_epi8(v, _mm_load_si128(control.0.as_ptr().cast())) }
}

/// Element-wise permutation for SSE2-only targets.
#[cfg(not(any(ssse3, avx)))]
#[inline(always)]
pub(crate) fn permute32<const N: usize>(v: __m128i, indices: [usize; N]) -> __m128i {
    use crate::simd::portable;

    let mut lanes = Align16([0u32; LANE_COUNT]);
    unsafe { _mm_store_si128(lanes.0.as_mut_ptr().cast(), v) };

    let permuted = Align16::<u32, LANE_COUNT>::from_prefix(portable::shuffle(
        *lanes.prefix::<N>(),
        indices,
    ));
    unsafe { _mm_load_si128(permuted.0.as_ptr().cast()) }
}

/// Debug-checks a permutation before it reaches a control builder.
#[inline(always)]
pub(crate) fn check_indices<const N: usize>(indices: &[usize; N]) {
    debug_assert!(
        indices.iter().all(|&index| index < N),
        "shuffle index out of range for {N} lanes: {indices:?}"
    );
}
