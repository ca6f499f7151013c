//! `i32` and `u32` kernels.
//!
//! Both element types run on `uint32x4_t` internally: wrapping add, sub and
//! multiply produce the same bits for signed and unsigned lanes. The
//! register view hands out the signed or unsigned type matching the scalar.

use std::arch::aarch64::*;

use super::{all_lanes, check_indices, mask32, permute_bytes, LANE_COUNT};
use crate::simd::portable;
use crate::simd::traits::{Kernel, Register};
use crate::simd::utils::Align16;

#[inline(always)]
fn load<T>(storage: &Align16<T, LANE_COUNT>) -> uint32x4_t {
    unsafe { vld1q_u32(storage.0.as_ptr().cast()) }
}

#[inline(always)]
fn store<T: Copy + Default>(register: uint32x4_t) -> Align16<T, LANE_COUNT> {
    let mut storage = Align16([T::default(); LANE_COUNT]);
    unsafe { vst1q_u32(storage.0.as_mut_ptr().cast(), register) };
    storage
}

/// Wrapping sum of the first `N` lanes.
#[inline(always)]
fn sum_bits<const N: usize>(v: uint32x4_t) -> u32 {
    unsafe { vaddvq_u32(vandq_u32(v, mask32::<N>())) }
}

/// `vabsq_s32` wraps `i32::MIN` to itself.
#[inline(always)]
fn abs_i32(v: uint32x4_t) -> uint32x4_t {
    unsafe { vreinterpretq_u32_s32(vabsq_s32(vreinterpretq_s32_u32(v))) }
}

#[inline(always)]
fn abs_u32(v: uint32x4_t) -> uint32x4_t {
    v
}

#[inline(always)]
fn to_signed(v: uint32x4_t) -> int32x4_t {
    unsafe { vreinterpretq_s32_u32(v) }
}

#[inline(always)]
fn from_signed(v: int32x4_t) -> uint32x4_t {
    unsafe { vreinterpretq_u32_s32(v) }
}

#[inline(always)]
fn to_unsigned(v: uint32x4_t) -> uint32x4_t {
    v
}

macro_rules! i32x4_kernel {
    ($t:ty, $register:ty, $abs:ident, $to:ident, $from:ident => $($n:literal),+) => {$(
        impl Kernel<$n> for $t {
            type Storage = Align16<$t, LANE_COUNT>;

            const VECTORIZED: bool = true;

            #[inline(always)]
            fn splat(value: $t) -> Self::Storage {
                Align16::splat(value)
            }

            #[inline(always)]
            fn from_array(lanes: [$t; $n]) -> Self::Storage {
                Align16::from_prefix(lanes)
            }

            #[inline(always)]
            fn lanes(storage: &Self::Storage) -> &[$t; $n] {
                storage.prefix::<$n>()
            }

            #[inline(always)]
            fn lanes_mut(storage: &mut Self::Storage) -> &mut [$t; $n] {
                storage.prefix_mut::<$n>()
            }

            #[inline(always)]
            fn add(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { vaddq_u32(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn sub(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { vsubq_u32(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn mul(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { vmulq_u32(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn div(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                Align16::from_prefix(portable::div(*a.prefix::<$n>(), *b.prefix::<$n>()))
            }

            #[inline(always)]
            fn mul_add(a: Self::Storage, b: Self::Storage, c: Self::Storage) -> Self::Storage {
                store(unsafe { vmlaq_u32(load(&c), load(&a), load(&b)) })
            }

            #[inline(always)]
            fn mul_sub(a: Self::Storage, b: Self::Storage, c: Self::Storage) -> Self::Storage {
                store(unsafe { vsubq_u32(vmulq_u32(load(&a), load(&b)), load(&c)) })
            }

            #[inline(always)]
            fn shuffle(v: Self::Storage, indices: [usize; $n]) -> Self::Storage {
                check_indices(&indices);
                let bytes = unsafe { vreinterpretq_u8_u32(load(&v)) };
                store(unsafe { vreinterpretq_u32_u8(permute_bytes(bytes, indices, 4)) })
            }

            #[inline(always)]
            fn dot(a: Self::Storage, b: Self::Storage) -> $t {
                sum_bits::<$n>(unsafe { vmulq_u32(load(&a), load(&b)) }) as $t
            }

            #[inline(always)]
            fn sum(v: Self::Storage) -> $t {
                sum_bits::<$n>(load(&v)) as $t
            }

            #[inline(always)]
            fn abs(v: Self::Storage) -> Self::Storage {
                store($abs(load(&v)))
            }

            #[inline(always)]
            fn eq(a: Self::Storage, b: Self::Storage) -> bool {
                all_lanes::<$n>(unsafe { vceqq_u32(load(&a), load(&b)) })
            }
        }

        impl Register<$n> for $t {
            type Register = $register;

            #[inline(always)]
            fn from_register(register: $register) -> Self::Storage {
                store($from(register))
            }

            #[inline(always)]
            fn to_register(storage: &Self::Storage) -> $register {
                $to(load(storage))
            }
        }
    )+};
}

i32x4_kernel!(i32, int32x4_t, abs_i32, to_signed, from_signed => 2, 3, 4);
i32x4_kernel!(u32, uint32x4_t, abs_u32, to_unsigned, to_unsigned => 2, 3, 4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_wraps() {
        let a = <i32 as Kernel<4>>::from_array([i32::MAX, -3, 65_536, 7]);
        let b = <i32 as Kernel<4>>::from_array([1, 5, 65_536, -7]);
        assert_eq!(<i32 as Kernel<4>>::add(a, b).0, [i32::MIN, 2, 131_072, 0]);
        assert_eq!(<i32 as Kernel<4>>::mul(a, b).0, [i32::MAX, -15, 0, -49]);
    }

    #[test]
    fn test_reductions_ignore_padding() {
        let v = <u32 as Kernel<3>>::splat(5);
        assert_eq!(<u32 as Kernel<3>>::sum(v), 15);
        assert_eq!(<u32 as Kernel<3>>::dot(v, v), 75);
    }

    #[test]
    fn test_abs() {
        let v = <i32 as Kernel<4>>::from_array([-1, 2, i32::MIN, 0]);
        assert_eq!(<i32 as Kernel<4>>::abs(v).0, [1, 2, i32::MIN, 0]);
    }

    #[test]
    fn test_shuffle_and_eq() {
        let v = <i32 as Kernel<3>>::from_array([1, 2, 3]);
        let shuffled = <i32 as Kernel<3>>::shuffle(v, [2, 2, 0]);
        assert_eq!(shuffled.0, [3, 3, 1, 0]);
        assert!(<i32 as Kernel<3>>::eq(shuffled, <i32 as Kernel<3>>::from_array([3, 3, 1])));
    }

    #[test]
    fn test_signed_register_round_trip() {
        let v = <i32 as Kernel<4>>::from_array([-1, -2, 3, 4]);
        let register = <i32 as Register<4>>::to_register(&v);
        assert_eq!(unsafe { vgetq_lane_s32::<1>(register) }, -2);
        assert_eq!(<i32 as Register<4>>::from_register(register), v);
    }
}
