//! Portable element-wise backend.
//!
//! Storage is a plain `[T; N]`. This backend serves every combination when no
//! register backend is compiled in, serves the combinations a register
//! backend does not cover (e.g. 3 and 4-lane `f64` on SSE or NEON), and
//! provides the element-by-element fallbacks register kernels use for
//! operations without a matching instruction.

#![cfg_attr(any(sse, neon), allow(dead_code, unused_macros))]

use crate::scalar::{FloatScalar, Scalar};

#[inline(always)]
pub(crate) fn add<T: Scalar, const N: usize>(a: [T; N], b: [T; N]) -> [T; N] {
    std::array::from_fn(|i| a[i].lane_add(b[i]))
}

#[inline(always)]
pub(crate) fn sub<T: Scalar, const N: usize>(a: [T; N], b: [T; N]) -> [T; N] {
    std::array::from_fn(|i| a[i].lane_sub(b[i]))
}

#[inline(always)]
pub(crate) fn mul<T: Scalar, const N: usize>(a: [T; N], b: [T; N]) -> [T; N] {
    std::array::from_fn(|i| a[i].lane_mul(b[i]))
}

#[inline(always)]
pub(crate) fn div<T: Scalar, const N: usize>(a: [T; N], b: [T; N]) -> [T; N] {
    std::array::from_fn(|i| a[i].lane_div(b[i]))
}

#[inline(always)]
pub(crate) fn mul_add<T: Scalar, const N: usize>(a: [T; N], b: [T; N], c: [T; N]) -> [T; N] {
    std::array::from_fn(|i| a[i].lane_mul_add(b[i], c[i]))
}

#[inline(always)]
pub(crate) fn mul_sub<T: Scalar, const N: usize>(a: [T; N], b: [T; N], c: [T; N]) -> [T; N] {
    std::array::from_fn(|i| a[i].lane_mul_sub(b[i], c[i]))
}

/// Element-by-element reorder: output lane `i` is `v[indices[i]]`.
#[inline(always)]
pub(crate) fn shuffle<T: Scalar, const N: usize>(v: [T; N], indices: [usize; N]) -> [T; N] {
    std::array::from_fn(|i| v[indices[i]])
}

#[inline(always)]
pub(crate) fn dot<T: Scalar, const N: usize>(a: [T; N], b: [T; N]) -> T {
    sum(mul(a, b))
}

/// Pairwise reduction, the same association order as the `hadd` register path:
/// `(v0 + v1) + (v2 + v3)`.
#[inline(always)]
pub(crate) fn sum<T: Scalar, const N: usize>(v: [T; N]) -> T {
    v.chunks(2)
        .map(|pair| pair.iter().fold(T::zero(), |acc, &lane| acc.lane_add(lane)))
        .fold(T::zero(), |acc, partial| acc.lane_add(partial))
}

#[inline(always)]
pub(crate) fn abs<T: Scalar, const N: usize>(v: [T; N]) -> [T; N] {
    v.map(Scalar::lane_abs)
}

#[inline(always)]
pub(crate) fn eq<T: Scalar, const N: usize>(a: [T; N], b: [T; N]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x == y)
}

#[inline(always)]
pub(crate) fn sqrt<T: FloatScalar, const N: usize>(v: [T; N]) -> [T; N] {
    v.map(num::Float::sqrt)
}

#[inline(always)]
pub(crate) fn rcp<T: FloatScalar, const N: usize>(v: [T; N]) -> [T; N] {
    v.map(|lane| T::one() / lane)
}

#[inline(always)]
pub(crate) fn rsqrt<T: FloatScalar, const N: usize>(v: [T; N]) -> [T; N] {
    v.map(|lane| T::one() / num::Float::sqrt(lane))
}

/// Implements [`Kernel`](crate::simd::traits::Kernel) with `[T; N]` storage for
/// the listed widths.
macro_rules! portable_kernel {
    ($t:ty => $($n:literal),+) => {$(
        impl $crate::simd::traits::Kernel<$n> for $t {
            type Storage = [$t; $n];

            const VECTORIZED: bool = false;

            #[inline(always)]
            fn splat(value: $t) -> Self::Storage {
                [value; $n]
            }

            #[inline(always)]
            fn from_array(lanes: [$t; $n]) -> Self::Storage {
                lanes
            }

            #[inline(always)]
            fn lanes(storage: &Self::Storage) -> &[$t; $n] {
                storage
            }

            #[inline(always)]
            fn lanes_mut(storage: &mut Self::Storage) -> &mut [$t; $n] {
                storage
            }

            #[inline(always)]
            fn add(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                $crate::simd::portable::add(a, b)
            }

            #[inline(always)]
            fn sub(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                $crate::simd::portable::sub(a, b)
            }

            #[inline(always)]
            fn mul(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                $crate::simd::portable::mul(a, b)
            }

            #[inline(always)]
            fn div(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                $crate::simd::portable::div(a, b)
            }

            #[inline(always)]
            fn mul_add(a: Self::Storage, b: Self::Storage, c: Self::Storage) -> Self::Storage {
                $crate::simd::portable::mul_add(a, b, c)
            }

            #[inline(always)]
            fn mul_sub(a: Self::Storage, b: Self::Storage, c: Self::Storage) -> Self::Storage {
                $crate::simd::portable::mul_sub(a, b, c)
            }

            #[inline(always)]
            fn shuffle(v: Self::Storage, indices: [usize; $n]) -> Self::Storage {
                $crate::simd::portable::shuffle(v, indices)
            }

            #[inline(always)]
            fn dot(a: Self::Storage, b: Self::Storage) -> $t {
                $crate::simd::portable::dot(a, b)
            }

            #[inline(always)]
            fn sum(v: Self::Storage) -> $t {
                $crate::simd::portable::sum(v)
            }

            #[inline(always)]
            fn abs(v: Self::Storage) -> Self::Storage {
                $crate::simd::portable::abs(v)
            }

            #[inline(always)]
            fn eq(a: Self::Storage, b: Self::Storage) -> bool {
                $crate::simd::portable::eq(a, b)
            }
        }
    )+};
}

/// [`portable_kernel!`] plus the floating-point
/// [`FloatKernel`](crate::simd::traits::FloatKernel) operations.
macro_rules! portable_float_kernel {
    ($t:ty => $($n:literal),+) => {
        portable_kernel!($t => $($n),+);

        $(
            impl $crate::simd::traits::FloatKernel<$n> for $t {
                #[inline(always)]
                fn sqrt(v: Self::Storage) -> Self::Storage {
                    $crate::simd::portable::sqrt(v)
                }

                #[inline(always)]
                fn rcp(v: Self::Storage) -> Self::Storage {
                    $crate::simd::portable::rcp(v)
                }

                #[inline(always)]
                fn rsqrt(v: Self::Storage) -> Self::Storage {
                    $crate::simd::portable::rsqrt(v)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elementwise_arithmetic() {
        assert_eq!(add([1.0f32, 2.0], [3.0, 4.0]), [4.0, 6.0]);
        assert_eq!(sub([1i32, 2, 3], [3, 2, 1]), [-2, 0, 2]);
        assert_eq!(mul([1u32, 2, 3, 4], [2, 2, 2, 2]), [2, 4, 6, 8]);
        assert_eq!(div([1.0f64, 3.0], [2.0, 2.0]), [0.5, 1.5]);
    }

    #[test]
    fn test_shuffle_reorders_lanes() {
        assert_eq!(shuffle([1, 2, 3, 4], [3, 2, 1, 0]), [4, 3, 2, 1]);
        assert_eq!(shuffle([5.0f32, 6.0, 7.0], [0, 0, 2]), [5.0, 5.0, 7.0]);
    }

    #[test]
    fn test_reductions() {
        assert_eq!(dot([1, 1, 1, 1], [1, 2, 3, 4]), 10);
        assert_eq!(dot([1.0f32, 1.0, 1.0], [1.0, 2.0, 3.0]), 6.0);
        assert_eq!(sum([1u32, 1]), 2);
        assert_eq!(sum([1.0f64, 2.0, 3.0, 4.0]), 10.0);
    }

    #[test]
    fn test_equality_is_exact() {
        assert!(eq([1.0f32, 2.0], [1.0, 2.0]));
        assert!(!eq([1.0f32, 2.0], [1.0, 2.000_001]));
        assert!(!eq([f64::NAN, 0.0], [f64::NAN, 0.0]));
        assert!(eq([0.0f32, 1.0], [-0.0, 1.0]));
    }

    #[test]
    fn test_float_math() {
        assert_eq!(sqrt([4.0f32, 9.0]), [2.0, 3.0]);
        assert_eq!(rcp([2.0f64, 4.0]), [0.5, 0.25]);
        assert_eq!(rsqrt([4.0f32, 16.0]), [0.5, 0.25]);
        assert!(sqrt([-1.0f32])[0].is_nan());
    }
}
