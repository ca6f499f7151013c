//! Operations over slices of vectors.
//!
//! Each operation has a sequential form and a `par_` form on rayon. The
//! parallel forms fall back to the sequential path below
//! [`PAR_THRESHOLD`] vectors, where thread dispatch costs more than it saves,
//! and otherwise split the slice into chunks of [`PAR_CHUNK_SIZE`] vectors.
//!
//! Integer results are identical between the two forms. Float reductions
//! (`par_total`) may differ in the last bits because the association order
//! of the partial sums differs.
//!
//! ```rust
//! use simdvec::{vec3, FloatBatch, VectorBatch};
//!
//! let a = vec![vec3(1.0f32, 0.0, 0.0), vec3(0.0, 3.0, 4.0)];
//! let b = vec![vec3(2.0f32, 0.0, 0.0), vec3(0.0, 1.0, 1.0)];
//!
//! assert_eq!(a.dot_each(&b).unwrap(), vec![2.0, 7.0]);
//! assert_eq!(a.lengths(), vec![1.0, 5.0]);
//! assert_eq!(a.total(), vec3(1.0, 3.0, 4.0));
//! ```

use rayon::prelude::*;

use crate::error::{validation_error, Result};
use crate::simd::traits::{FloatKernel, Kernel};
use crate::vector::Vector;

/// Slices shorter than this run sequentially in the `par_` methods.
pub const PAR_THRESHOLD: usize = 4096;

/// Vectors per rayon task in the `par_` methods.
pub const PAR_CHUNK_SIZE: usize = 1024;

/// Batch operations available for every scalar type.
pub trait VectorBatch<T: Kernel<N>, const N: usize> {
    /// `self[i].dot(other[i])` for every `i`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ValidationError`](crate::VectorError::ValidationError)
    /// when the slices have different lengths.
    fn dot_each(&self, other: &[Vector<T, N>]) -> Result<Vec<T>>;

    /// Parallel [`dot_each`](Self::dot_each).
    ///
    /// # Errors
    ///
    /// Same as [`dot_each`](Self::dot_each).
    fn par_dot_each(&self, other: &[Vector<T, N>]) -> Result<Vec<T>>;

    /// Lane-wise sum of all vectors, the zero vector for an empty slice.
    fn total(&self) -> Vector<T, N>;

    /// Parallel [`total`](Self::total).
    fn par_total(&self) -> Vector<T, N>;
}

/// Batch operations for floating-point vectors.
pub trait FloatBatch<T: FloatKernel<N>, const N: usize> {
    fn lengths(&self) -> Vec<T>;

    fn par_lengths(&self) -> Vec<T>;

    /// Normalizes every vector in place.
    fn normalize_each(&mut self);

    fn par_normalize_each(&mut self);
}

fn check_lengths(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(validation_error(format!(
            "input slices must have same length ({} != {})",
            left, right
        )));
    }
    Ok(())
}

fn use_parallel(len: usize, operation: &str) -> bool {
    let parallel = len >= PAR_THRESHOLD;
    if !parallel {
        log::trace!("{operation}: {len} vectors below PAR_THRESHOLD, running sequentially");
    }
    parallel
}

impl<T: Kernel<N>, const N: usize> VectorBatch<T, N> for [Vector<T, N>] {
    fn dot_each(&self, other: &[Vector<T, N>]) -> Result<Vec<T>> {
        check_lengths(self.len(), other.len())?;
        Ok(self.iter().zip(other).map(|(a, b)| a.dot(*b)).collect())
    }

    fn par_dot_each(&self, other: &[Vector<T, N>]) -> Result<Vec<T>> {
        check_lengths(self.len(), other.len())?;
        if !use_parallel(self.len(), "par_dot_each") {
            return self.dot_each(other);
        }

        let mut out = vec![T::zero(); self.len()];
        out.par_chunks_mut(PAR_CHUNK_SIZE)
            .zip(self.par_chunks(PAR_CHUNK_SIZE))
            .zip(other.par_chunks(PAR_CHUNK_SIZE))
            .for_each(|((out, a), b)| {
                for ((out, a), b) in out.iter_mut().zip(a).zip(b) {
                    *out = a.dot(*b);
                }
            });
        Ok(out)
    }

    fn total(&self) -> Vector<T, N> {
        self.iter().sum()
    }

    fn par_total(&self) -> Vector<T, N> {
        if !use_parallel(self.len(), "par_total") {
            return self.total();
        }

        self.par_chunks(PAR_CHUNK_SIZE)
            .map(|chunk| chunk.iter().sum::<Vector<T, N>>())
            .reduce(Vector::zero, |a, b| a + b)
    }
}

impl<T: FloatKernel<N>, const N: usize> FloatBatch<T, N> for [Vector<T, N>] {
    fn lengths(&self) -> Vec<T> {
        self.iter().map(|v| v.length()).collect()
    }

    fn par_lengths(&self) -> Vec<T> {
        if !use_parallel(self.len(), "par_lengths") {
            return self.lengths();
        }

        let mut out = vec![T::zero(); self.len()];
        out.par_chunks_mut(PAR_CHUNK_SIZE)
            .zip(self.par_chunks(PAR_CHUNK_SIZE))
            .for_each(|(out, vectors)| {
                for (out, v) in out.iter_mut().zip(vectors) {
                    *out = v.length();
                }
            });
        out
    }

    fn normalize_each(&mut self) {
        for v in self.iter_mut() {
            *v = v.normalize();
        }
    }

    fn par_normalize_each(&mut self) {
        if !use_parallel(self.len(), "par_normalize_each") {
            return self.normalize_each();
        }

        self.par_chunks_mut(PAR_CHUNK_SIZE).for_each(|chunk| chunk.normalize_each());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VectorError;

    #[test]
    fn test_dot_each_length_mismatch() {
        let a = vec![Vector::<i32, 2>::splat(1); 3];
        let b = vec![Vector::<i32, 2>::splat(1); 2];
        let error = a.dot_each(&b).unwrap_err();
        assert!(matches!(error, VectorError::ValidationError { .. }));
        assert_eq!(a.par_dot_each(&b), Err(error));
    }

    #[test]
    fn test_total_of_empty_slice_is_zero() {
        let empty: [Vector<f32, 3>; 0] = [];
        assert_eq!(empty.total(), Vector::zero());
        assert_eq!(empty.par_total(), Vector::zero());
    }

    #[test]
    fn test_small_inputs_run_sequentially() {
        let a: Vec<_> = (0..10).map(|i| Vector::<u32, 3>::splat(i)).collect();
        assert_eq!(a.par_dot_each(&a).unwrap(), a.dot_each(&a).unwrap());
        assert_eq!(a.par_total(), Vector::splat(45));
    }

    #[test]
    fn test_normalize_each() {
        let mut vectors = vec![Vector::<f64, 2>::new(3.0, 4.0), Vector::<_, 2>::new(0.0, 2.0)];
        vectors.normalize_each();
        assert_eq!(vectors[0], Vector::<_, 2>::new(0.6, 0.8));
        assert_eq!(vectors[1], Vector::<_, 2>::new(0.0, 1.0));
    }
}
