//! Conversions between vectors and `ndarray` arrays.
//!
//! A single vector maps to an [`Array1`] of its logical lanes. A slice of
//! vectors maps to an [`Array2`] with one row per vector and `N` columns.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{length_mismatch, Result};
use crate::simd::traits::Kernel;
use crate::vector::Vector;

impl<T: Kernel<N>, const N: usize> From<Vector<T, N>> for Array1<T> {
    fn from(vector: Vector<T, N>) -> Self {
        Array1::from(vector.to_array().to_vec())
    }
}

impl<'a, T: Kernel<N>, const N: usize> TryFrom<ArrayView1<'a, T>> for Vector<T, N> {
    type Error = crate::VectorError;

    /// Works for non-contiguous views such as matrix columns.
    fn try_from(view: ArrayView1<'a, T>) -> Result<Self> {
        if view.len() != N {
            return Err(length_mismatch(N, view.len()));
        }
        let mut lanes = [T::zero(); N];
        for (lane, &value) in lanes.iter_mut().zip(view.iter()) {
            *lane = value;
        }
        Ok(Self::from_array(lanes))
    }
}

impl<'a, T: Kernel<N>, const N: usize> TryFrom<&'a Array1<T>> for Vector<T, N> {
    type Error = crate::VectorError;

    fn try_from(array: &'a Array1<T>) -> Result<Self> {
        Self::try_from(array.view())
    }
}

/// Stacks `vectors` into a `(vectors.len(), N)` matrix, one vector per row.
pub fn to_matrix<T: Kernel<N>, const N: usize>(vectors: &[Vector<T, N>]) -> Array2<T> {
    Array2::from_shape_fn((vectors.len(), N), |(row, col)| vectors[row][col])
}

/// Reads each row of `matrix` as a vector.
///
/// # Errors
///
/// Returns [`VectorError::LengthMismatch`](crate::VectorError::LengthMismatch)
/// when the matrix does not have exactly `N` columns.
pub fn from_matrix<T: Kernel<N>, const N: usize>(
    matrix: ArrayView2<'_, T>,
) -> Result<Vec<Vector<T, N>>> {
    if matrix.ncols() != N {
        return Err(length_mismatch(N, matrix.ncols()));
    }
    matrix.rows().into_iter().map(Vector::try_from).collect()
}
