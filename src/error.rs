//! Error types for simdvec conversions.
//!
//! Vector arithmetic itself has no recoverable failure: arity and lane-count
//! mistakes are rejected at compile time and numeric faults follow the scalar
//! type's own rules. The errors below cover the fallible conversions into a
//! vector (slices, casts, ndarray views) and the batch helpers.

use std::fmt;

/// Errors that can occur when building vectors from untyped data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    /// The input did not hold exactly as many lanes as the vector.
    LengthMismatch {
        /// The number of lanes the vector expects.
        expected: usize,
        /// The number of elements that were provided.
        found: usize,
    },
    /// A value could not be represented in the vector's scalar type.
    ConversionError {
        /// Debug rendering of the offending value.
        value: String,
        /// Name of the scalar type the value was converted into.
        target: &'static str,
    },
    /// Input validation error.
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::LengthMismatch { expected, found } => write!(
                f,
                "Length mismatch: expected {} lanes, found {} elements",
                expected, found
            ),
            VectorError::ConversionError { value, target } => {
                write!(f, "Conversion error: {} is not representable as {}", value, target)
            }
            VectorError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
        }
    }
}

impl std::error::Error for VectorError {}

/// Result type alias for simdvec operations.
pub type Result<T> = std::result::Result<T, VectorError>;

/// Creates a length mismatch error.
pub fn length_mismatch(expected: usize, found: usize) -> VectorError {
    VectorError::LengthMismatch { expected, found }
}

/// Creates a conversion error for `value` targeting the scalar type `target`.
pub fn conversion_error(value: impl fmt::Debug, target: &'static str) -> VectorError {
    VectorError::ConversionError {
        value: format!("{value:?}"),
        target,
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> VectorError {
    VectorError::ValidationError {
        message: message.into(),
    }
}
