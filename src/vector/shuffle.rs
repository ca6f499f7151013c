//! Lane permutation.
//!
//! `shuffle::<..>()` takes its indices as const generics, so an out-of-range
//! index fails to compile and the kernel sees constant indices it can fold
//! into a constant control. `shuffle_dyn` takes runtime indices and builds
//! the control on every call.
//!
//! On register backends the lanes past `N` come out of every shuffle as zero,
//! so repeated shuffles never carry stale padding into later operations.

use super::Vector;
use crate::simd::traits::Kernel;

impl<T: Kernel<N>, const N: usize> Vector<T, N> {
    /// Output lane `i` is `self[indices[i]]`.
    ///
    /// Indices are checked with `debug_assert!`. Release builds require every
    /// index to be below `N`.
    #[inline(always)]
    pub fn shuffle_dyn(self, indices: [usize; N]) -> Self {
        debug_assert!(
            indices.iter().all(|&index| index < N),
            "shuffle index out of range for {N} lanes: {indices:?}"
        );
        Self::from_storage(<T as Kernel<N>>::shuffle(self.storage(), indices))
    }
}

impl<T: Kernel<2>> Vector<T, 2> {
    /// `(self[A], self[B])`.
    #[inline(always)]
    pub fn shuffle<const A: usize, const B: usize>(self) -> Self {
        const { assert!(A < 2 && B < 2, "shuffle index out of range for 2 lanes") };
        Self::from_storage(<T as Kernel<2>>::shuffle(self.storage(), [A, B]))
    }
}

impl<T: Kernel<3>> Vector<T, 3> {
    /// `(self[A], self[B], self[C])`.
    #[inline(always)]
    pub fn shuffle<const A: usize, const B: usize, const C: usize>(self) -> Self {
        const { assert!(A < 3 && B < 3 && C < 3, "shuffle index out of range for 3 lanes") };
        Self::from_storage(<T as Kernel<3>>::shuffle(self.storage(), [A, B, C]))
    }
}

impl<T: Kernel<4>> Vector<T, 4> {
    /// `(self[A], self[B], self[C], self[D])`.
    #[inline(always)]
    pub fn shuffle<const A: usize, const B: usize, const C: usize, const D: usize>(self) -> Self {
        const {
            assert!(
                A < 4 && B < 4 && C < 4 && D < 4,
                "shuffle index out of range for 4 lanes"
            )
        };
        Self::from_storage(<T as Kernel<4>>::shuffle(self.storage(), [A, B, C, D]))
    }
}
