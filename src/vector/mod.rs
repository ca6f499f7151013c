//! The [`Vector`] value type.
//!
//! A `Vector<T, N>` owns one `T::Storage`, whichever storage the build's
//! [`Kernel`] for `(T, N)` uses: a plain `[T; N]` on the portable backend or
//! a register-aligned array on a register backend. Every way of reading the
//! vector (named fields, colour fields, indexing, the array view and the
//! register view) goes through that one storage, so a write through any of
//! them is visible through all of them.
//!
//! # Examples
//!
//! ```rust
//! use simdvec::{vec3, Vec3f};
//!
//! let a = vec3(1.0f32, 1.0, 1.0);
//! let b = Vec3f::new(1.0, 2.0, 3.0);
//!
//! assert_eq!(a.dot(b), 6.0);
//! assert_eq!(a.cross(b), vec3(1.0, -2.0, 1.0));
//! assert_eq!(b.shuffle::<2, 1, 0>(), vec3(3.0, 2.0, 1.0));
//! assert_eq!(b.z, 3.0);
//! ```

mod geometry;
mod math;
mod ops;
mod shuffle;
pub mod views;

use std::fmt;
use std::ops::{Index, IndexMut};

use num::traits::{NumCast, ToPrimitive};

use crate::error::{conversion_error, length_mismatch, Result};
use crate::simd::traits::{Kernel, Register};

/// An `N`-lane vector of `T`, for `T` in {`f32`, `f64`, `i32`, `u32`} and `N`
/// in {2, 3, 4}.
#[repr(transparent)]
pub struct Vector<T: Kernel<N>, const N: usize> {
    storage: T::Storage,
}

impl<T: Kernel<N>, const N: usize> Clone for Vector<T, N> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Kernel<N>, const N: usize> Copy for Vector<T, N> {}

impl<T: Kernel<N>, const N: usize> Vector<T, N> {
    /// Whether this vector type is register-backed in the current build.
    pub const VECTORIZED: bool = T::VECTORIZED;

    /// Number of logical lanes.
    pub const LANES: usize = N;

    #[inline(always)]
    pub(crate) fn from_storage(storage: T::Storage) -> Self {
        Self { storage }
    }

    #[inline(always)]
    pub(crate) fn storage(self) -> T::Storage {
        self.storage
    }

    /// Every lane set to `value`. On register backends the padding lanes are
    /// set too.
    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Self::from_storage(<T as Kernel<N>>::splat(value))
    }

    /// All lanes zero.
    #[inline(always)]
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    #[inline(always)]
    pub fn from_array(lanes: [T; N]) -> Self {
        Self::from_storage(<T as Kernel<N>>::from_array(lanes))
    }

    /// Builds a vector from a slice of exactly `N` elements.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::LengthMismatch`](crate::VectorError::LengthMismatch)
    /// when `slice.len() != N`.
    pub fn try_from_slice(slice: &[T]) -> Result<Self> {
        let lanes: [T; N] = slice
            .try_into()
            .map_err(|_| length_mismatch(N, slice.len()))?;
        Ok(Self::from_array(lanes))
    }

    /// Broadcasts `value` after converting it to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ConversionError`](crate::VectorError::ConversionError)
    /// when `value` is out of range for `T` (or is NaN for an integer `T`).
    pub fn splat_cast<V: ToPrimitive + fmt::Debug + Copy>(value: V) -> Result<Self> {
        let lane = <T as NumCast>::from(value).ok_or_else(|| conversion_error(value, T::NAME))?;
        Ok(Self::splat(lane))
    }

    /// The logical lanes as an array.
    #[inline(always)]
    pub fn as_array(&self) -> &[T; N] {
        <T as Kernel<N>>::lanes(&self.storage)
    }

    /// The logical lanes as a mutable array. Padding lanes are not reachable.
    #[inline(always)]
    pub fn as_mut_array(&mut self) -> &mut [T; N] {
        <T as Kernel<N>>::lanes_mut(&mut self.storage)
    }

    #[inline(always)]
    pub fn to_array(self) -> [T; N] {
        *self.as_array()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        self.as_array()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_array().iter()
    }

    /// Wraps a native register without checking its padding lanes.
    #[inline(always)]
    pub fn from_register(register: <T as Register<N>>::Register) -> Self
    where
        T: Register<N>,
    {
        Self::from_storage(T::from_register(register))
    }

    /// Loads the vector, padding lanes included, into its native register.
    #[inline(always)]
    pub fn to_register(self) -> <T as Register<N>>::Register
    where
        T: Register<N>,
    {
        T::to_register(&self.storage)
    }
}

impl<T: Kernel<2>> Vector<T, 2> {
    #[inline(always)]
    pub fn new(x: T, y: T) -> Self {
        Self::from_array([x, y])
    }

    /// Appends `z`.
    #[inline(always)]
    pub fn extend(self, z: T) -> Vector<T, 3>
    where
        T: Kernel<3>,
    {
        Vector::<T, 3>::new(self[0], self[1], z)
    }
}

impl<T: Kernel<3>> Vector<T, 3> {
    #[inline(always)]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self::from_array([x, y, z])
    }

    /// `(x, y, 0)`.
    #[inline(always)]
    pub fn from_xy(x: T, y: T) -> Self {
        Self::from_array([x, y, T::zero()])
    }

    /// Appends `w`.
    #[inline(always)]
    pub fn extend(self, w: T) -> Vector<T, 4>
    where
        T: Kernel<4>,
    {
        Vector::<T, 4>::new(self[0], self[1], self[2], w)
    }

    /// Drops `z`.
    #[inline(always)]
    pub fn truncate(self) -> Vector<T, 2>
    where
        T: Kernel<2>,
    {
        Vector::<T, 2>::new(self[0], self[1])
    }
}

impl<T: Kernel<4>> Vector<T, 4> {
    #[inline(always)]
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self::from_array([x, y, z, w])
    }

    /// `(x, y, z, 0)`.
    #[inline(always)]
    pub fn from_xyz(x: T, y: T, z: T) -> Self {
        Self::from_array([x, y, z, T::zero()])
    }

    /// Drops `w`.
    #[inline(always)]
    pub fn truncate(self) -> Vector<T, 3>
    where
        T: Kernel<3>,
    {
        Vector::<T, 3>::new(self[0], self[1], self[2])
    }
}

impl<T: Kernel<N>, const N: usize> Default for Vector<T, N> {
    #[inline(always)]
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Kernel<N>, const N: usize> From<[T; N]> for Vector<T, N> {
    #[inline(always)]
    fn from(lanes: [T; N]) -> Self {
        Self::from_array(lanes)
    }
}

impl<T: Kernel<N>, const N: usize> From<Vector<T, N>> for [T; N] {
    #[inline(always)]
    fn from(vector: Vector<T, N>) -> Self {
        vector.to_array()
    }
}

impl<T: Kernel<N>, const N: usize> From<T> for Vector<T, N> {
    #[inline(always)]
    fn from(value: T) -> Self {
        Self::splat(value)
    }
}

impl<T: Kernel<N>, const N: usize> TryFrom<&[T]> for Vector<T, N> {
    type Error = crate::VectorError;

    fn try_from(slice: &[T]) -> Result<Self> {
        Self::try_from_slice(slice)
    }
}

impl<T: Kernel<N>, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[inline(always)]
    fn index(&self, index: usize) -> &T {
        &self.as_array()[index]
    }
}

impl<T: Kernel<N>, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_array()[index]
    }
}

/// Exact lane-wise comparison of the logical lanes.
impl<T: Kernel<N>, const N: usize> PartialEq for Vector<T, N> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        <T as Kernel<N>>::eq(self.storage, other.storage)
    }
}

impl<const N: usize> Eq for Vector<i32, N> where i32: Kernel<N> {}

impl<const N: usize> Eq for Vector<u32, N> where u32: Kernel<N> {}

impl<T: Kernel<N>, const N: usize> fmt::Debug for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vector").field(self.as_array()).finish()
    }
}

/// Formats as `(x, y, z)`.
impl<T: Kernel<N>, const N: usize> fmt::Display for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, lane) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            fmt::Display::fmt(lane, f)?;
        }
        write!(f, ")")
    }
}

impl<T: Kernel<N>, const N: usize> IntoIterator for Vector<T, N> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.to_array().into_iter()
    }
}

impl<'a, T: Kernel<N>, const N: usize> IntoIterator for &'a Vector<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
