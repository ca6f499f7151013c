//! 2-lane `f64` kernel on one `__m128d` register.
//!
//! The register holds exactly two lanes, so there is no padding to mask.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::check_indices;
use crate::simd::traits::{FloatKernel, Kernel, Register};
use crate::simd::utils::Align16;

pub const LANE_COUNT: usize = 2;

/// Aligned storage of one `__m128d`.
pub type F64x2Storage = Align16<f64, LANE_COUNT>;

#[inline(always)]
fn load(storage: &F64x2Storage) -> __m128d {
    unsafe { _mm_load_pd(storage.0.as_ptr()) }
}

#[inline(always)]
fn store(register: __m128d) -> F64x2Storage {
    let mut storage = Align16([0.0; LANE_COUNT]);
    unsafe { _mm_store_pd(storage.0.as_mut_ptr(), register) };
    storage
}

#[cfg(sse3)]
#[inline(always)]
fn hsum(v: __m128d) -> f64 {
    unsafe { _mm_cvtsd_f64(_mm_hadd_pd(v, v)) }
}

#[cfg(not(sse3))]
#[inline(always)]
fn hsum(v: __m128d) -> f64 {
    unsafe { _mm_cvtsd_f64(_mm_add_sd(v, _mm_unpackhi_pd(v, v))) }
}

#[cfg(sse41)]
#[inline(always)]
fn dot(a: __m128d, b: __m128d) -> f64 {
    unsafe { _mm_cvtsd_f64(_mm_dp_pd::<0x31>(a, b)) }
}

#[cfg(not(sse41))]
#[inline(always)]
fn dot(a: __m128d, b: __m128d) -> f64 {
    hsum(unsafe { _mm_mul_pd(a, b) })
}

/// `vpermilpd` reads bit 1 of each 64-bit selector, so indices are shifted
/// into that position.
#[cfg(avx)]
#[inline(always)]
fn permute(v: __m128d, indices: [usize; 2]) -> __m128d {
    unsafe {
        let control = _mm_slli_epi64::<1>(_mm_set_epi64x(indices[1] as i64, indices[0] as i64));
        _mm_permutevar_pd(v, control)
    }
}

#[cfg(not(avx))]
#[inline(always)]
fn permute(v: __m128d, indices: [usize; 2]) -> __m128d {
    use crate::simd::portable;

    load(&Align16(portable::shuffle(store(v).0, indices)))
}

#[cfg(fma)]
#[inline(always)]
fn mul_add(a: __m128d, b: __m128d, c: __m128d) -> __m128d {
    unsafe { _mm_fmadd_pd(a, b, c) }
}

#[cfg(not(fma))]
#[inline(always)]
fn mul_add(a: __m128d, b: __m128d, c: __m128d) -> __m128d {
    unsafe { _mm_add_pd(_mm_mul_pd(a, b), c) }
}

#[cfg(fma)]
#[inline(always)]
fn mul_sub(a: __m128d, b: __m128d, c: __m128d) -> __m128d {
    unsafe { _mm_fmsub_pd(a, b, c) }
}

#[cfg(not(fma))]
#[inline(always)]
fn mul_sub(a: __m128d, b: __m128d, c: __m128d) -> __m128d {
    unsafe { _mm_sub_pd(_mm_mul_pd(a, b), c) }
}

impl Kernel<2> for f64 {
    type Storage = F64x2Storage;

    const VECTORIZED: bool = true;

    #[inline(always)]
    fn splat(value: f64) -> Self::Storage {
        Align16::splat(value)
    }

    #[inline(always)]
    fn from_array(lanes: [f64; 2]) -> Self::Storage {
        Align16(lanes)
    }

    #[inline(always)]
    fn lanes(storage: &Self::Storage) -> &[f64; 2] {
        &storage.0
    }

    #[inline(always)]
    fn lanes_mut(storage: &mut Self::Storage) -> &mut [f64; 2] {
        &mut storage.0
    }

    #[inline(always)]
    fn add(a: Self::Storage, b: Self::Storage) -> Self::Storage {
        store(unsafe { _mm_add_pd(load(&a), load(&b)) })
    }

    #[inline(always)]
    fn sub(a: Self::Storage, b: Self::Storage) -> Self::Storage {
        store(unsafe { _mm_sub_pd(load(&a), load(&b)) })
    }

    #[inline(always)]
    fn mul(a: Self::Storage, b: Self::Storage) -> Self::Storage {
        store(unsafe { _mm_mul_pd(load(&a), load(&b)) })
    }

    #[inline(always)]
    fn div(a: Self::Storage, b: Self::Storage) -> Self::Storage {
        store(unsafe { _mm_div_pd(load(&a), load(&b)) })
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
    fn shuffle(v: Self::Storage, indices: [usize; 2]) -> Self::Storage {
        check_indices(&indices);
        store(permute(load(&v), indices))
    }

    #[inline(always)]
    fn dot(a: Self::Storage, b: Self::Storage) -> f64 {
        dot(load(&a), load(&b))
    }

    #[inline(always)]
    fn sum(v: Self::Storage) -> f64 {
        hsum(load(&v))
    }

    #[inline(always)]
    fn abs(v: Self::Storage) -> Self::Storage {
        store(unsafe { _mm_andnot_pd(_mm_set1_pd(-0.0), load(&v)) })
    }

    #[inline(always)]
    fn eq(a: Self::Storage, b: Self::Storage) -> bool {
        unsafe { _mm_movemask_pd(_mm_cmpeq_pd(load(&a), load(&b))) == 0b11 }
    }
}

impl FloatKernel<2> for f64 {
    #[inline(always)]
    fn sqrt(v: Self::Storage) -> Self::Storage {
        store(unsafe { _mm_sqrt_pd(load(&v)) })
    }

    #[inline(always)]
    fn rcp(v: Self::Storage) -> Self::Storage {
        store(unsafe { _mm_div_pd(_mm_set1_pd(1.0), load(&v)) })
    }

    #[inline(always)]
    fn rsqrt(v: Self::Storage) -> Self::Storage {
        store(unsafe { _mm_div_pd(_mm_set1_pd(1.0), _mm_sqrt_pd(load(&v))) })
    }
}

impl Register<2> for f64 {
    type Register = __m128d;

    #[inline(always)]
    fn from_register(register: __m128d) -> Self::Storage {
        store(register)
    }

    #[inline(always)]
    fn to_register(storage: &Self::Storage) -> __m128d {
        load(storage)
    }
}
