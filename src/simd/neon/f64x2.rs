//! 2-lane `f64` kernel on one `float64x2_t`.

use std::arch::aarch64::*;

use super::{check_indices, permute_bytes};
use crate::simd::traits::{FloatKernel, Kernel, Register};
use crate::simd::utils::Align16;

pub const LANE_COUNT: usize = 2;

/// Aligned storage of one `float64x2_t`.
pub type F64x2Storage = Align16<f64, LANE_COUNT>;

#[inline(always)]
fn load(storage: &F64x2Storage) -> float64x2_t {
    unsafe { vld1q_f64(storage.0.as_ptr()) }
}

#[inline(always)]
fn store(register: float64x2_t) -> F64x2Storage {
    let mut storage = Align16([0.0; LANE_COUNT]);
    unsafe { vst1q_f64(storage.0.as_mut_ptr(), register) };
    storage
}

#[cfg(fma)]
#[inline(always)]
fn mul_add(a: float64x2_t, b: float64x2_t, c: float64x2_t) -> float64x2_t {
    unsafe { vfmaq_f64(c, a, b) }
}

#[cfg(not(fma))]
#[inline(always)]
fn mul_add(a: float64x2_t, b: float64x2_t, c: float64x2_t) -> float64x2_t {
    unsafe { vaddq_f64(vmulq_f64(a, b), c) }
}

#[cfg(fma)]
#[inline(always)]
fn mul_sub(a: float64x2_t, b: float64x2_t, c: float64x2_t) -> float64x2_t {
    unsafe { vfmaq_f64(vnegq_f64(c), a, b) }
}

#[cfg(not(fma))]
#[inline(always)]
fn mul_sub(a: float64x2_t, b: float64x2_t, c: float64x2_t) -> float64x2_t {
    unsafe { vsubq_f64(vmulq_f64(a, b), c) }
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
        store(unsafe { vaddq_f64(load(&a), load(&b)) })
    }

    #[inline(always)]
    fn sub(a: Self::Storage, b: Self::Storage) -> Self::Storage {
        store(unsafe { vsubq_f64(load(&a), load(&b)) })
    }

    #[inline(always)]
    fn mul(a: Self::Storage, b: Self::Storage) -> Self::Storage {
        store(unsafe { vmulq_f64(load(&a), load(&b)) })
    }

    #[inline(always)]
    fn div(a: Self::Storage, b: Self::Storage) -> Self::Storage {
        store(unsafe { vdivq_f64(load(&a), load(&b)) })
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
        let bytes = unsafe { vreinterpretq_u8_f64(load(&v)) };
        store(unsafe { vreinterpretq_f64_u8(permute_bytes(bytes, indices, 8)) })
    }

    #[inline(always)]
    fn dot(a: Self::Storage, b: Self::Storage) -> f64 {
        unsafe { vpaddd_f64(vmulq_f64(load(&a), load(&b))) }
    }

    #[inline(always)]
    fn sum(v: Self::Storage) -> f64 {
        unsafe { vpaddd_f64(load(&v)) }
    }

    #[inline(always)]
    fn abs(v: Self::Storage) -> Self::Storage {
        store(unsafe {
            let sign = vreinterpretq_u64_f64(vdupq_n_f64(-0.0));
            vreinterpretq_f64_u64(vbicq_u64(vreinterpretq_u64_f64(load(&v)), sign))
        })
    }

    #[inline(always)]
    fn eq(a: Self::Storage, b: Self::Storage) -> bool {
        unsafe { vminvq_u32(vreinterpretq_u32_u64(vceqq_f64(load(&a), load(&b)))) == u32::MAX }
    }
}

impl FloatKernel<2> for f64 {
    #[inline(always)]
    fn sqrt(v: Self::Storage) -> Self::Storage {
        store(unsafe { vsqrtq_f64(load(&v)) })
    }

    #[inline(always)]
    fn rcp(v: Self::Storage) -> Self::Storage {
        store(unsafe { vdivq_f64(vdupq_n_f64(1.0), load(&v)) })
    }

    #[inline(always)]
    fn rsqrt(v: Self::Storage) -> Self::Storage {
        store(unsafe { vdivq_f64(vdupq_n_f64(1.0), vsqrtq_f64(load(&v))) })
    }
}

impl Register<2> for f64 {
    type Register = float64x2_t;

    #[inline(always)]
    fn from_register(register: float64x2_t) -> Self::Storage {
        store(register)
    }

    #[inline(always)]
    fn to_register(storage: &Self::Storage) -> float64x2_t {
        load(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_all_index_pairs() {
        let v = Align16([1.5, -2.5]);
        for i0 in 0..2 {
            for i1 in 0..2 {
                let shuffled = <f64 as Kernel<2>>::shuffle(v, [i0, i1]);
                assert_eq!(shuffled.0, [v.0[i0], v.0[i1]]);
            }
        }
    }

    #[test]
    fn test_dot_sum_eq() {
        let a = Align16([1.0, 1.0]);
        let b = Align16([1.0, 2.0]);
        assert_eq!(<f64 as Kernel<2>>::dot(a, b), 3.0);
        assert_eq!(<f64 as Kernel<2>>::sum(b), 3.0);
        assert!(!<f64 as Kernel<2>>::eq(a, b));
        assert!(<f64 as Kernel<2>>::eq(b, b));
    }
}
