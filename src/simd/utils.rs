//! Aligned lane storage and permutation-control builders shared by the
//! register backends.
//!
//! A register-backed vector keeps its lanes in one canonical aligned array
//! sized to the register. Lanes past the logical width are padding. Register
//! operations load from this array and store back into it, so the array,
//! the named views and the register always agree.

use num::traits::Zero;

/// Lane storage aligned for 128-bit registers (SSE, NEON).
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct Align16<T, const L: usize>(pub [T; L]);

/// Lane storage aligned for 256-bit registers (AVX).
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C, align(32))]
pub struct Align32<T, const L: usize>(pub [T; L]);

macro_rules! impl_aligned_storage {
    ($name:ident) => {
        impl<T: Copy + Zero, const L: usize> $name<T, L> {
            /// Every lane, padding included, set to `value`.
            #[inline(always)]
            pub fn splat(value: T) -> Self {
                Self([value; L])
            }

            /// The first `N` lanes taken from `lanes`, padding lanes zeroed.
            #[inline(always)]
            pub fn from_prefix<const N: usize>(lanes: [T; N]) -> Self {
                const { assert!(N <= L, "logical width exceeds the register") };
                let mut storage = Self([T::zero(); L]);
                storage.0[..N].copy_from_slice(&lanes);
                storage
            }

            /// The first `N` lanes as a fixed-size array view.
            #[inline(always)]
            pub fn prefix<const N: usize>(&self) -> &[T; N] {
                const { assert!(N <= L, "logical width exceeds the register") };
                // SAFETY: N <= L and `[T; L]` is contiguous, so the first N
                // elements form a valid `[T; N]` with the same alignment.
                unsafe { &*self.0.as_ptr().cast::<[T; N]>() }
            }

            /// Mutable view of the first `N` lanes. Padding lanes are not reachable.
            #[inline(always)]
            pub fn prefix_mut<const N: usize>(&mut self) -> &mut [T; N] {
                const { assert!(N <= L, "logical width exceeds the register") };
                // SAFETY: see `prefix`; the borrow is unique through `&mut self`.
                unsafe { &mut *self.0.as_mut_ptr().cast::<[T; N]>() }
            }
        }
    };
}

impl_aligned_storage!(Align16);
impl_aligned_storage!(Align32);

/// 32-bit lane permutation control for a register of `L` lanes.
///
/// Lane `i < N` selects `indices[i]`; the lanes past `N` are padded with their
/// own index, and the caller discards them.
#[cfg_attr(not(avx), allow(dead_code))]
#[inline(always)]
pub(crate) fn lane_control<const N: usize, const L: usize>(indices: [usize; N]) -> [i32; L] {
    std::array::from_fn(|i| if i < N { indices[i] as i32 } else { i as i32 })
}

/// Byte-granular permutation control for a 16-byte register holding lanes of
/// `lane_bytes` bytes each.
///
/// Bytes belonging to padding lanes get `neutral`, an out-of-range selector
/// that table-lookup instructions turn into zero (`0x80` for `pshufb`,
/// `0xFF` for `tbl`).
#[cfg_attr(not(any(neon, all(ssse3, not(avx)))), allow(dead_code))]
#[inline(always)]
pub(crate) fn byte_control<const N: usize>(
    indices: [usize; N],
    lane_bytes: usize,
    neutral: u8,
) -> [u8; 16] {
    std::array::from_fn(|byte| {
        let lane = byte / lane_bytes;
        if lane < N {
            (indices[lane] * lane_bytes + byte % lane_bytes) as u8
        } else {
            neutral
        }
    })
}

/// All-ones for the first `n` of `L` 32-bit lanes, zero for the padding lanes.
#[cfg_attr(not(any(sse, neon)), allow(dead_code))]
#[inline(always)]
pub(crate) fn lane_mask32<const L: usize>(n: usize) -> [u32; L] {
    std::array::from_fn(|i| if i < n { u32::MAX } else { 0 })
}

/// All-ones for the first `n` of `L` 64-bit lanes, zero for the padding lanes.
#[cfg_attr(not(avx), allow(dead_code))]
#[inline(always)]
pub(crate) fn lane_mask64<const L: usize>(n: usize) -> [u64; L] {
    std::array::from_fn(|i| if i < n { u64::MAX } else { 0 })
}
