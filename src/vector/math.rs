use super::Vector;
use crate::simd::traits::{FloatKernel, Kernel};

impl<T: Kernel<N>, const N: usize> Vector<T, N> {
    /// Lane-wise absolute value. Floats clear the sign bit (NaN stays NaN),
    /// `i32::MIN` wraps to itself and `u32` is unchanged.
    #[inline(always)]
    pub fn abs(self) -> Self {
        Self::from_storage(<T as Kernel<N>>::abs(self.storage()))
    }

    /// Horizontal sum of the lanes.
    #[inline(always)]
    pub fn sum(self) -> T {
        <T as Kernel<N>>::sum(self.storage())
    }

    #[inline(always)]
    pub fn square(self) -> Self {
        self * self
    }

    /// `self * a + b`, with a single rounding when the build has FMA.
    #[inline(always)]
    pub fn mul_add(self, a: Self, b: Self) -> Self {
        Self::from_storage(<T as Kernel<N>>::mul_add(self.storage(), a.storage(), b.storage()))
    }

    /// `self * a - b`, with a single rounding when the build has FMA.
    #[inline(always)]
    pub fn mul_sub(self, a: Self, b: Self) -> Self {
        Self::from_storage(<T as Kernel<N>>::mul_sub(self.storage(), a.storage(), b.storage()))
    }
}

impl<T: FloatKernel<N>, const N: usize> Vector<T, N> {
    #[inline(always)]
    pub fn sqrt(self) -> Self {
        Self::from_storage(<T as FloatKernel<N>>::sqrt(self.storage()))
    }

    /// `1 / x`, correctly rounded.
    #[inline(always)]
    pub fn rcp(self) -> Self {
        Self::from_storage(<T as FloatKernel<N>>::rcp(self.storage()))
    }

    /// `1 / sqrt(x)`, correctly rounded per step.
    #[inline(always)]
    pub fn rsqrt(self) -> Self {
        Self::from_storage(<T as FloatKernel<N>>::rsqrt(self.storage()))
    }

    /// `(1 - t) * self + t * other`, as one multiply-add of `1 - t` against
    /// `self` with `t * other` as the addend.
    #[inline(always)]
    pub fn lerp(self, other: Self, t: T) -> Self {
        Self::splat(T::one() - t).mul_add(self, other * t)
    }

    /// [`lerp`](Self::lerp) with a weight per lane.
    #[inline(always)]
    pub fn lerp_vec(self, other: Self, t: Self) -> Self {
        (Self::splat(T::one()) - t).mul_add(self, other * t)
    }
}
