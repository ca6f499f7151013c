//! `f32` kernels on one `__m128` register.
//!
//! 2, 3 and 4-lane vectors share the same 16-byte aligned storage of four
//! lanes. The register is loaded from that storage, operated on, and stored
//! back, so the named views and the register always observe the same bits.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{check_indices, mask32, movemask_bits, permute32, LANE_COUNT};
use crate::simd::traits::{FloatKernel, Kernel, Register};
use crate::simd::utils::Align16;

/// Aligned storage of one `__m128`.
pub type F32x4Storage = Align16<f32, LANE_COUNT>;

#[inline(always)]
fn load(storage: &F32x4Storage) -> __m128 {
    unsafe { _mm_load_ps(storage.0.as_ptr()) }
}

#[inline(always)]
fn store(register: __m128) -> F32x4Storage {
    let mut storage = Align16([0.0; LANE_COUNT]);
    unsafe { _mm_store_ps(storage.0.as_mut_ptr(), register) };
    storage
}

/// Zeroes the padding lanes.
#[inline(always)]
fn mask<const N: usize>(v: __m128) -> __m128 {
    unsafe { _mm_and_ps(v, _mm_castsi128_ps(mask32::<N>())) }
}

/// Pairwise horizontal sum of all four lanes: `(v0 + v1) + (v2 + v3)`.
#[cfg(sse3)]
#[inline(always)]
fn hsum(v: __m128) -> f32 {
    unsafe {
        let pairs = _mm_hadd_ps(v, v);
        _mm_cvtss_f32(_mm_hadd_ps(pairs, pairs))
    }
}

/// Pairwise horizontal sum of all four lanes: `(v0 + v1) + (v2 + v3)`.
#[cfg(not(sse3))]
#[inline(always)]
fn hsum(v: __m128) -> f32 {
    unsafe {
        // [v1, v0, v3, v2]
        let swapped = _mm_shuffle_ps::<0b10_11_00_01>(v, v);
        let pairs = _mm_add_ps(v, swapped);
        let high = _mm_movehl_ps(swapped, pairs);
        _mm_cvtss_f32(_mm_add_ss(pairs, high))
    }
}

/// `dpps` with the lane-select immediate for `N` lanes, result in lane 0.
#[cfg(sse41)]
#[inline(always)]
fn dot<const N: usize>(a: __m128, b: __m128) -> f32 {
    unsafe {
        let product = match N {
            2 => _mm_dp_ps::<0x31>(a, b),
            3 => _mm_dp_ps::<0x71>(a, b),
            _ => _mm_dp_ps::<0xF1>(a, b),
        };
        _mm_cvtss_f32(product)
    }
}

#[cfg(not(sse41))]
#[inline(always)]
fn dot<const N: usize>(a: __m128, b: __m128) -> f32 {
    hsum(mask::<N>(unsafe { _mm_mul_ps(a, b) }))
}

#[cfg(fma)]
#[inline(always)]
fn mul_add(a: __m128, b: __m128, c: __m128) -> __m128 {
    unsafe { _mm_fmadd_ps(a, b, c) }
}

#[cfg(not(fma))]
#[inline(always)]
fn mul_add(a: __m128, b: __m128, c: __m128) -> __m128 {
    unsafe { _mm_add_ps(_mm_mul_ps(a, b), c) }
}

#[cfg(fma)]
#[inline(always)]
fn mul_sub(a: __m128, b: __m128, c: __m128) -> __m128 {
    unsafe { _mm_fmsub_ps(a, b, c) }
}

#[cfg(not(fma))]
#[inline(always)]
fn mul_sub(a: __m128, b: __m128, c: __m128) -> __m128 {
    unsafe { _mm_sub_ps(_mm_mul_ps(a, b), c) }
}

macro_rules! f32x4_kernel {
    ($($n:literal),+) => {$(
        impl Kernel<$n> for f32 {
            type Storage = F32x4Storage;

            const VECTORIZED: bool = true;

            #[inline(always)]
            fn splat(value: f32) -> Self::Storage {
                Align16::splat(value)
            }

            #[inline(always)]
            fn from_array(lanes: [f32; $n]) -> Self::Storage {
                Align16::from_prefix(lanes)
            }

            #[inline(always)]
            fn lanes(storage: &Self::Storage) -> &[f32; $n] {
                storage.prefix::<$n>()
            }

            #[inline(always)]
            fn lanes_mut(storage: &mut Self::Storage) -> &mut [f32; $n] {
                storage.prefix_mut::<$n>()
            }

            #[inline(always)]
            fn add(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { _mm_add_ps(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn sub(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { _mm_sub_ps(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn mul(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { _mm_mul_ps(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn div(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { _mm_div_ps(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn mul_add(a: Self::Storage, b: Self::Storage, c: Self::Storage) -> Self::Storage {
                store(mul_add(load(&a), load(&b), load(&c)))
            }

            #[inline(always)]
            fn mul_sub(a: Self::Storage, b: Self::Storage, c: Self::Storage) -> Self::Storage {
                store(mul_sub(load(&a), load(&b), load(&c)))
            }

            #[inline(always)]
            fn shuffle(v: Self::Storage, indices: [usize; $n]) -> Self::Storage {
                check_indices(&indices);
                let permuted = permute32(unsafe { _mm_castps_si128(load(&v)) }, indices);
                store(unsafe { _mm_castsi128_ps(permuted) })
            }

            #[inline(always)]
            fn dot(a: Self::Storage, b: Self::Storage) -> f32 {
                dot::<$n>(load(&a), load(&b))
            }

            #[inline(always)]
            fn sum(v: Self::Storage) -> f32 {
                hsum(mask::<$n>(load(&v)))
            }

            #[inline(always)]
            fn abs(v: Self::Storage) -> Self::Storage {
                store(unsafe { _mm_andnot_ps(_mm_set1_ps(-0.0), load(&v)) })
            }

            #[inline(always)]
            fn eq(a: Self::Storage, b: Self::Storage) -> bool {
                let bits = unsafe { _mm_movemask_ps(_mm_cmpeq_ps(load(&a), load(&b))) };
                bits & movemask_bits::<$n>() == movemask_bits::<$n>()
            }
        }

        impl FloatKernel<$n> for f32 {
            #[inline(always)]
            fn sqrt(v: Self::Storage) -> Self::Storage {
                store(unsafe { _mm_sqrt_ps(load(&v)) })
            }

            #[inline(always)]
            fn rcp(v: Self::Storage) -> Self::Storage {
                store(unsafe { _mm_div_ps(_mm_set1_ps(1.0), load(&v)) })
            }

            #[inline(always)]
            fn rsqrt(v: Self::Storage) -> Self::Storage {
                store(unsafe { _mm_div_ps(_mm_set1_ps(1.0), _mm_sqrt_ps(load(&v))) })
            }
        }

        impl Register<$n> for f32 {
            type Register = __m128;

            #[inline(always)]
            fn from_register(register: __m128) -> Self::Storage {
                store(register)
            }

            #[inline(always)]
            fn to_register(storage: &Self::Storage) -> __m128 {
                load(storage)
            }
        }
    )+};
}

f32x4_kernel!(2, 3, 4);
