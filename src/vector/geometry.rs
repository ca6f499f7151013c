use num::traits::Float;

use super::Vector;
use crate::simd::traits::{FloatKernel, Kernel};

impl<T: Kernel<N>, const N: usize> Vector<T, N> {
    /// Sum of the lane-wise products.
    #[inline(always)]
    pub fn dot(self, other: Self) -> T {
        <T as Kernel<N>>::dot(self.storage(), other.storage())
    }

    /// `self.dot(self)`. Wraps for integer vectors.
    #[inline(always)]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    /// Euclidean length. Integer vectors measure in `f64`.
    #[inline(always)]
    pub fn length(self) -> T::Real {
        self.length_squared().to_real().sqrt()
    }
}

impl<T: FloatKernel<N>, const N: usize> Vector<T, N> {
    #[inline(always)]
    pub fn distance(self, other: Self) -> T {
        (self - other).length()
    }

    /// `self / self.length()`. The zero vector normalizes to NaN lanes.
    #[inline(always)]
    pub fn normalize(self) -> Self {
        self / self.length()
    }
}

impl<T: Kernel<3>> Vector<T, 3> {
    /// Right-handed cross product: `a.yzx * b.zxy - a.zxy * b.yzx`.
    #[inline(always)]
    pub fn cross(self, other: Self) -> Self {
        let t1 = self.shuffle::<1, 2, 0>();
        let t2 = other.shuffle::<2, 0, 1>();
        let t3 = self.shuffle::<2, 0, 1>() * other.shuffle::<1, 2, 0>();
        t1.mul_sub(t2, t3)
    }
}

impl<T: Kernel<2>> Vector<T, 2> {
    /// The z component of the 3-D cross product of `(x, y, 0)` vectors.
    #[inline(always)]
    pub fn cross(self, other: Self) -> T {
        self[0].lane_mul_sub(other[1], self[1].lane_mul(other[0]))
    }
}
