//! 3 and 4-lane `f64` kernels on one `__m256d` register.
//!
//! Only compiled on the `avx` backend. Shuffles use the AVX2 cross-lane
//! `vpermps` when available, with every `f64` index expanded to the two
//! 32-bit halves it occupies; AVX-only builds reorder element-wise.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{check_indices, movemask_bits};
use crate::simd::traits::{FloatKernel, Kernel, Register};
use crate::simd::utils::{lane_mask64, Align32};

pub const AVX_ALIGNMENT: usize = 32;

pub const LANE_COUNT: usize = 4;

/// Aligned storage of one `__m256d`.
pub type F64x4Storage = Align32<f64, LANE_COUNT>;

#[inline(always)]
fn load(storage: &F64x4Storage) -> __m256d {
    unsafe { _mm256_load_pd(storage.0.as_ptr()) }
}

#[inline(always)]
fn store(register: __m256d) -> F64x4Storage {
    let mut storage = Align32([0.0; LANE_COUNT]);
    unsafe { _mm256_store_pd(storage.0.as_mut_ptr(), register) };
    storage
}

/// Zeroes the padding lanes.
#[inline(always)]
fn mask<const N: usize>(v: __m256d) -> __m256d {
    let mask = Align32(lane_mask64::<LANE_COUNT>(N));
    unsafe { _mm256_and_pd(v, _mm256_castsi256_pd(_mm256_load_si256(mask.0.as_ptr().cast()))) }
}

/// Pairwise horizontal sum of all four lanes: `(v0 + v1) + (v2 + v3)`.
#[inline(always)]
fn hsum(v: __m256d) -> f64 {
    unsafe {
        // [v0 + v1, v0 + v1, v2 + v3, v2 + v3]
        let pairs = _mm256_hadd_pd(v, v);
        let total = _mm_add_sd(
            _mm256_castpd256_pd128(pairs),
            _mm256_extractf128_pd::<1>(pairs),
        );
        _mm_cvtsd_f64(total)
    }
}

#[cfg(avx2)]
#[inline(always)]
fn permute<const N: usize>(v: __m256d, indices: [usize; N]) -> __m256d {
    use crate::simd::utils::lane_control;

    let lanes = lane_control::<N, LANE_COUNT>(indices);
    let control = Align32::<i32, 8>(std::array::from_fn(|half| {
        lanes[half / 2] * 2 + (half % 2) as i32
    }));
    unsafe {
        let control = _mm256_load_si256(control.0.as_ptr().cast());
        mask::<N>(_mm256_castps_pd(_mm256_permutevar8x32_ps(
            _mm256_castpd_ps(v),
            control,
        )))
    }
}

#[cfg(not(avx2))]
#[inline(always)]
fn permute<const N: usize>(v: __m256d, indices: [usize; N]) -> __m256d {
    use crate::simd::portable;

    let lanes = store(v);
    load(&Align32::from_prefix(portable::shuffle(*lanes.prefix::<N>(), indices)))
}

#[cfg(fma)]
#[inline(always)]
fn mul_add(a: __m256d, b: __m256d, c: __m256d) -> __m256d {
    unsafe { _mm256_fmadd_pd(a, b, c) }
}

#[cfg(not(fma))]
#[inline(always)]
fn mul_add(a: __m256d, b: __m256d, c: __m256d) -> __m256d {
    unsafe { _mm256_add_pd(_mm256_mul_pd(a, b), c) }
}

#[cfg(fma)]
#[inline(always)]
fn mul_sub(a: __m256d, b: __m256d, c: __m256d) -> __m256d {
    unsafe { _mm256_fmsub_pd(a, b, c) }
}

#[cfg(not(fma))]
#[inline(always)]
fn mul_sub(a: __m256d, b: __m256d, c: __m256d) -> __m256d {
    unsafe { _mm256_sub_pd(_mm256_mul_pd(a, b), c) }
}

macro_rules! f64x4_kernel {
    ($($n:literal),+) => {$(
        impl Kernel<$n> for f64 {
            type Storage = F64x4Storage;

            const VECTORIZED: bool = true;

            #[inline(always)]
            fn splat(value: f64) -> Self::Storage {
                Align32::splat(value)
            }

            #[inline(always)]
            fn from_array(lanes: [f64; $n]) -> Self::Storage {
                Align32::from_prefix(lanes)
            }

            #[inline(always)]
            fn lanes(storage: &Self::Storage) -> &[f64; $n] {
                storage.prefix::<$n>()
            }

            #[inline(always)]
            fn lanes_mut(storage: &mut Self::Storage) -> &mut [f64; $n] {
                storage.prefix_mut::<$n>()
            }

            #[inline(always)]
            fn add(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { _mm256_add_pd(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn sub(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { _mm256_sub_pd(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn mul(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { _mm256_mul_pd(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn div(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { _mm256_div_pd(load(&a), load(&b)) })
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
                store(permute::<$n>(load(&v), indices))
            }

            #[inline(always)]
            fn dot(a: Self::Storage, b: Self::Storage) -> f64 {
                hsum(mask::<$n>(unsafe { _mm256_mul_pd(load(&a), load(&b)) }))
            }

            #[inline(always)]
            fn sum(v: Self::Storage) -> f64 {
                hsum(mask::<$n>(load(&v)))
            }

            #[inline(always)]
            fn abs(v: Self::Storage) -> Self::Storage {
                store(unsafe { _mm256_andnot_pd(_mm256_set1_pd(-0.0), load(&v)) })
            }

            #[inline(always)]
            fn eq(a: Self::Storage, b: Self::Storage) -> bool {
                let bits = unsafe {
                    _mm256_movemask_pd(_mm256_cmp_pd::<_CMP_EQ_OQ>(load(&a), load(&b)))
                };
                bits & movemask_bits::<$n>() == movemask_bits::<$n>()
            }
        }

        impl FloatKernel<$n> for f64 {
            #[inline(always)]
            fn sqrt(v: Self::Storage) -> Self::Storage {
                store(unsafe { _mm256_sqrt_pd(load(&v)) })
            }

            #[inline(always)]
            fn rcp(v: Self::Storage) -> Self::Storage {
                store(unsafe { _mm256_div_pd(_mm256_set1_pd(1.0), load(&v)) })
            }

            #[inline(always)]
            fn rsqrt(v: Self::Storage) -> Self::Storage {
                store(unsafe { _mm256_div_pd(_mm256_set1_pd(1.0), _mm256_sqrt_pd(load(&v))) })
            }
        }

        impl Register<$n> for f64 {
            type Register = __m256d;

            #[inline(always)]
            fn from_register(register: __m256d) -> Self::Storage {
                store(register)
            }

            #[inline(always)]
            fn to_register(storage: &Self::Storage) -> __m256d {
                load(storage)
            }
        }
    )+};
}

f64x4_kernel!(3, 4);
