//! Scalar element types a vector lane can hold.
//!
//! The lane operations defined here are the reference semantics every backend
//! reproduces: integer arithmetic wraps like a two's-complement SIMD lane,
//! integer division uses the native operator (so a zero divisor panics), and
//! floating-point arithmetic follows IEEE-754.

use std::fmt::{Debug, Display};

use num::traits::{Float, NumCast, One, Zero};

mod sealed {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
}

/// A lane type supported by [`Vector`](crate::Vector).
///
/// This trait is sealed; it is implemented for `f32`, `f64`, `i32` and `u32`.
pub trait Scalar:
    sealed::Sealed
    + Copy
    + Default
    + PartialEq
    + PartialOrd
    + Debug
    + Display
    + Send
    + Sync
    + NumCast
    + Zero
    + One
    + 'static
{
    /// Floating-point type used for lengths of vectors of this scalar.
    type Real: Float + Debug + Display;

    /// Name used in error messages.
    const NAME: &'static str;

    /// Whether this is a floating-point type.
    const IS_FLOAT: bool;

    fn lane_add(self, rhs: Self) -> Self;

    fn lane_sub(self, rhs: Self) -> Self;

    fn lane_mul(self, rhs: Self) -> Self;

    /// Native division. Integer division by zero panics.
    fn lane_div(self, rhs: Self) -> Self;

    /// Absolute value: sign bit cleared for floats, wrapping for `i32`,
    /// identity for `u32`.
    fn lane_abs(self) -> Self;

    /// `self * a + b`, fused when the build has FMA and `Self` is a float.
    fn lane_mul_add(self, a: Self, b: Self) -> Self;

    /// `self * a - b`, fused when the build has FMA and `Self` is a float.
    fn lane_mul_sub(self, a: Self, b: Self) -> Self;

    fn to_real(self) -> Self::Real;
}

/// Floating-point lane types, which additionally support `sqrt`, `rcp`,
/// `rsqrt` and `lerp`.
pub trait FloatScalar: Scalar<Real = Self> + Float {}

impl FloatScalar for f32 {}
impl FloatScalar for f64 {}

macro_rules! impl_float_scalar {
    ($t:ty) => {
        impl Scalar for $t {
            type Real = $t;

            const NAME: &'static str = stringify!($t);
            const IS_FLOAT: bool = true;

            #[inline(always)]
            fn lane_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline(always)]
            fn lane_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline(always)]
            fn lane_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline(always)]
            fn lane_div(self, rhs: Self) -> Self {
                self / rhs
            }

            #[inline(always)]
            fn lane_abs(self) -> Self {
                <$t>::from_bits(self.to_bits() & !(-0.0 as $t).to_bits())
            }

            #[inline(always)]
            fn lane_mul_add(self, a: Self, b: Self) -> Self {
                if cfg!(fma) {
                    self.mul_add(a, b)
                } else {
                    self * a + b
                }
            }

            #[inline(always)]
            fn lane_mul_sub(self, a: Self, b: Self) -> Self {
                if cfg!(fma) {
                    self.mul_add(a, -b)
                } else {
                    self * a - b
                }
            }

            #[inline(always)]
            fn to_real(self) -> Self::Real {
                self
            }
        }
    };
}

macro_rules! impl_int_scalar {
    ($t:ty, abs: $abs:expr) => {
        impl Scalar for $t {
            type Real = f64;

            const NAME: &'static str = stringify!($t);
            const IS_FLOAT: bool = false;

            #[inline(always)]
            fn lane_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline(always)]
            fn lane_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline(always)]
            fn lane_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            #[inline(always)]
            fn lane_div(self, rhs: Self) -> Self {
                self / rhs
            }

            #[inline(always)]
            fn lane_abs(self) -> Self {
                let abs: fn($t) -> $t = $abs;
                abs(self)
            }

            #[inline(always)]
            fn lane_mul_add(self, a: Self, b: Self) -> Self {
                self.wrapping_mul(a).wrapping_add(b)
            }

            #[inline(always)]
            fn lane_mul_sub(self, a: Self, b: Self) -> Self {
                self.wrapping_mul(a).wrapping_sub(b)
            }

            #[inline(always)]
            fn to_real(self) -> Self::Real {
                <f64 as From<Self>>::from(self)
            }
        }
    };
}

impl_float_scalar!(f32);
impl_float_scalar!(f64);
impl_int_scalar!(i32, abs: |v| v.wrapping_abs());
impl_int_scalar!(u32, abs: |v| v);
