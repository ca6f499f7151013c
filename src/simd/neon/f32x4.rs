use std::arch::aarch64::*;

use super::{all_lanes, check_indices, mask32, permute_bytes, LANE_COUNT};
use crate::simd::traits::{FloatKernel, Kernel, Register};
use crate::simd::utils::Align16;

/// Aligned storage of one `float32x4_t`.
pub type F32x4Storage = Align16<f32, LANE_COUNT>;

#[inline(always)]
fn load(storage: &F32x4Storage) -> float32x4_t {
    unsafe { vld1q_f32(storage.0.as_ptr()) }
}

#[inline(always)]
fn store(register: float32x4_t) -> F32x4Storage {
    let mut storage = Align16([0.0; LANE_COUNT]);
    unsafe { vst1q_f32(storage.0.as_mut_ptr(), register) };
    storage
}

/// Zeroes the padding lanes.
#[inline(always)]
fn mask<const N: usize>(v: float32x4_t) -> float32x4_t {
    unsafe { vreinterpretq_f32_u32(vandq_u32(vreinterpretq_u32_f32(v), mask32::<N>())) }
}

/// Pairwise horizontal sum of all four lanes: `(v0 + v1) + (v2 + v3)`.
#[inline(always)]
fn hsum(v: float32x4_t) -> f32 {
    unsafe {
        let pairs = vpaddq_f32(v, v);
        vgetq_lane_f32::<0>(vpaddq_f32(pairs, pairs))
    }
}

#[cfg(fma)]
#[inline(always)]
fn mul_add(a: float32x4_t, b: float32x4_t, c: float32x4_t) -> float32x4_t {
    unsafe { vfmaq_f32(c, a, b) }
}

#[cfg(not(fma))]
#[inline(always)]
fn mul_add(a: float32x4_t, b: float32x4_t, c: float32x4_t) -> float32x4_t {
    unsafe { vaddq_f32(vmulq_f32(a, b), c) }
}

/// `a * b - c` as the fused `a * b + (-c)`, so an exact zero stays `+0.0`.
#[cfg(fma)]
#[inline(always)]
fn mul_sub(a: float32x4_t, b: float32x4_t, c: float32x4_t) -> float32x4_t {
    unsafe { vfmaq_f32(vnegq_f32(c), a, b) }
}

#[cfg(not(fma))]
#[inline(always)]
fn mul_sub(a: float32x4_t, b: float32x4_t, c: float32x4_t) -> float32x4_t {
    unsafe { vsubq_f32(vmulq_f32(a, b), c) }
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
                store(unsafe { vaddq_f32(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn sub(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { vsubq_f32(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn mul(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { vmulq_f32(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn div(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { vdivq_f32(load(&a), load(&b)) })
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
                let bytes = unsafe { vreinterpretq_u8_f32(load(&v)) };
                store(unsafe { vreinterpretq_f32_u8(permute_bytes(bytes, indices, 4)) })
            }

            #[inline(always)]
            fn dot(a: Self::Storage, b: Self::Storage) -> f32 {
                hsum(mask::<$n>(unsafe { vmulq_f32(load(&a), load(&b)) }))
            }

            #[inline(always)]
            fn sum(v: Self::Storage) -> f32 {
                hsum(mask::<$n>(load(&v)))
            }

            #[inline(always)]
            fn abs(v: Self::Storage) -> Self::Storage {
                store(unsafe {
                    let sign = vreinterpretq_u32_f32(vdupq_n_f32(-0.0));
                    vreinterpretq_f32_u32(vbicq_u32(vreinterpretq_u32_f32(load(&v)), sign))
                })
            }

            #[inline(always)]
            fn eq(a: Self::Storage, b: Self::Storage) -> bool {
                all_lanes::<$n>(unsafe { vceqq_f32(load(&a), load(&b)) })
            }
        }

        impl FloatKernel<$n> for f32 {
            #[inline(always)]
            fn sqrt(v: Self::Storage) -> Self::Storage {
                store(unsafe { vsqrtq_f32(load(&v)) })
            }

            #[inline(always)]
            fn rcp(v: Self::Storage) -> Self::Storage {
                store(unsafe { vdivq_f32(vdupq_n_f32(1.0), load(&v)) })
            }

            #[inline(always)]
            fn rsqrt(v: Self::Storage) -> Self::Storage {
                store(unsafe { vdivq_f32(vdupq_n_f32(1.0), vsqrtq_f32(load(&v))) })
            }
        }

        impl Register<$n> for f32 {
            type Register = float32x4_t;

            #[inline(always)]
            fn from_register(register: float32x4_t) -> Self::Storage {
                store(register)
            }

            #[inline(always)]
            fn to_register(storage: &Self::Storage) -> float32x4_t {
                load(storage)
            }
        }
    )+};
}

f32x4_kernel!(2, 3, 4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_ignores_padding() {
        let mut a = <f32 as Kernel<3>>::from_array([1.0, 1.0, 1.0]);
        let b = <f32 as Kernel<3>>::from_array([1.0, 2.0, 3.0]);
        a.0[3] = f32::NAN;
        assert_eq!(<f32 as Kernel<3>>::dot(a, b), 6.0);
    }

    #[test]
    fn test_shuffle_zeroes_padding() {
        let v = <f32 as Kernel<2>>::splat(3.0);
        assert_eq!(<f32 as Kernel<2>>::shuffle(v, [1, 0]).0, [3.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_eq_ignores_padding() {
        let a = <f32 as Kernel<3>>::splat(1.0);
        let b = <f32 as Kernel<3>>::from_array([1.0, 1.0, 1.0]);
        assert!(<f32 as Kernel<3>>::eq(a, b));
        assert!(!<f32 as Kernel<4>>::eq(a, b));
    }

    #[test]
    fn test_abs_and_mul_sub() {
        let v = <f32 as Kernel<4>>::from_array([-1.0, 2.0, -0.0, f32::NEG_INFINITY]);
        assert_eq!(<f32 as Kernel<4>>::abs(v).0, [1.0, 2.0, 0.0, f32::INFINITY]);

        let a = <f32 as Kernel<2>>::from_array([2.0, 3.0]);
        let b = <f32 as Kernel<2>>::from_array([4.0, 5.0]);
        let c = <f32 as Kernel<2>>::from_array([1.0, 1.0]);
        assert_eq!(<f32 as Kernel<2>>::mul_sub(a, b, c).0, [7.0, 14.0, 0.0, 0.0]);
    }

    #[test]
    fn test_register_round_trip() {
        let v = <f32 as Kernel<4>>::from_array([1.0, 2.0, 3.0, 4.0]);
        let register = <f32 as Register<4>>::to_register(&v);
        assert_eq!(<f32 as Register<4>>::from_register(register), v);
    }
}
