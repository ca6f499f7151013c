//! Arithmetic operators.
//!
//! Every operator is lane-wise: lane `i` of the result is `lhs[i] OP rhs[i]`,
//! with a scalar operand broadcast to every lane first. Integer `+`, `-` and
//! `*` wrap. Integer `/` panics on a zero divisor in a logical lane. Float
//! operators follow IEEE-754.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::Vector;
use crate::simd::traits::Kernel;

macro_rules! impl_binary_op {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $kernel:ident) => {
        impl<T: Kernel<N>, const N: usize> $op for Vector<T, N> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self::from_storage(<T as Kernel<N>>::$kernel(self.storage(), rhs.storage()))
            }
        }

        impl<T: Kernel<N>, const N: usize> $op<T> for Vector<T, N> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: T) -> Self {
                self.$method(Self::splat(rhs))
            }
        }

        impl<T: Kernel<N>, const N: usize> $assign for Vector<T, N> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = (*self).$method(rhs);
            }
        }

        impl<T: Kernel<N>, const N: usize> $assign<T> for Vector<T, N> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: T) {
                *self = (*self).$method(Self::splat(rhs));
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, add);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, sub);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, mul);
impl_binary_op!(Div, div, DivAssign, div_assign, div);

// A blanket `impl<T> Add<Vector<T, N>> for T` is not allowed for a foreign
// `T`, so the scalar-on-the-left forms are spelled out per scalar.
macro_rules! impl_scalar_lhs_ops {
    ($($t:ty),+) => {$(
        impl<const N: usize> Add<Vector<$t, N>> for $t
        where
            $t: Kernel<N>,
        {
            type Output = Vector<$t, N>;

            #[inline(always)]
            fn add(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                Vector::splat(self) + rhs
            }
        }

        impl<const N: usize> Sub<Vector<$t, N>> for $t
        where
            $t: Kernel<N>,
        {
            type Output = Vector<$t, N>;

            #[inline(always)]
            fn sub(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                Vector::splat(self) - rhs
            }
        }

        impl<const N: usize> Mul<Vector<$t, N>> for $t
        where
            $t: Kernel<N>,
        {
            type Output = Vector<$t, N>;

            #[inline(always)]
            fn mul(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                Vector::splat(self) * rhs
            }
        }

        impl<const N: usize> Div<Vector<$t, N>> for $t
        where
            $t: Kernel<N>,
        {
            type Output = Vector<$t, N>;

            #[inline(always)]
            fn div(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                Vector::splat(self) / rhs
            }
        }
    )+};
}

impl_scalar_lhs_ops!(f32, f64, i32, u32);

macro_rules! impl_neg {
    ($($t:ty => $neg:expr),+) => {$(
        impl<const N: usize> Neg for Vector<$t, N>
        where
            $t: Kernel<N>,
        {
            type Output = Self;

            #[inline(always)]
            fn neg(self) -> Self {
                let neg: fn(Self) -> Self = $neg;
                neg(self)
            }
        }
    )+};
}

// Floats flip the sign bit of zero and NaN lanes too; `i32::MIN` wraps to itself.
impl_neg!(
    f32 => |v| v * -1.0,
    f64 => |v| v * -1.0,
    i32 => |v| Vector::zero() - v
);

impl<T: Kernel<N>, const N: usize> Sum for Vector<T, N> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc + v)
    }
}

impl<'a, T: Kernel<N>, const N: usize> Sum<&'a Vector<T, N>> for Vector<T, N> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, &v| acc + v)
    }
}
