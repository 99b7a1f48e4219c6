//! Error types and validation functions for the numeric kernels.
//!
//! Every fallible constructor in this crate validates its inputs up front and
//! fails fast with a structured error; no partially initialized object is ever
//! returned. Numerical edge values (NaN, infinities) flowing through already
//! constructed objects are *not* errors — they propagate per IEEE 754.

use thiserror::Error;

/// Errors reported by constructors and transforms in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum NumericError {
    /// Insufficient data for the requested operation.
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimum required data points
        required: usize,
        /// Actual number of data points provided
        actual: usize,
    },

    /// Two parallel input arrays must have the same length.
    #[error("Mismatched input lengths: {left} vs {right}")]
    MismatchedLengths {
        /// Length of the first array
        left: usize,
        /// Length of the second array
        right: usize,
    },

    /// Input values must be strictly increasing.
    #[error("Data not strictly increasing at index {index}")]
    NonMonotonicData {
        /// Index of the first offending element
        index: usize,
    },

    /// Input contains a NaN or infinite value where a finite one is required.
    #[error("Non-finite value at index {index}: {value}")]
    NonFiniteValue {
        /// Index of the offending element
        index: usize,
        /// The offending value
        value: f64,
    },

    /// Invalid parameter value.
    #[error("Invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value provided
        value: f64,
        /// Valid range or constraint description
        constraint: String,
    },

    /// FFT input size is not supported.
    #[error("FFT computation failed: input size {size} is not a power of two")]
    FftSize {
        /// Input size that caused the failure
        size: usize,
    },

    /// Input slice is too short to supply the requested strided samples.
    #[error("Input slice of length {len} cannot supply {n} samples at stride {skip}")]
    ShortInput {
        /// Length of the provided slice
        len: usize,
        /// Number of samples requested
        n: usize,
        /// Stride between samples
        skip: usize,
    },
}

/// Result type for operations that may fail with [`NumericError`].
pub type NumericResult<T> = Result<T, NumericError>;

/// Validates that data has sufficient length.
///
/// # Example
/// ```rust
/// use quadnum::errors::validate_data_length;
///
/// let data = vec![1.0, 2.0, 3.0];
/// assert!(validate_data_length(&data, 2).is_ok());
/// assert!(validate_data_length(&data, 5).is_err());
/// ```
pub fn validate_data_length(data: &[f64], min_required: usize) -> NumericResult<()> {
    if data.len() < min_required {
        Err(NumericError::InsufficientData {
            required: min_required,
            actual: data.len(),
        })
    } else {
        Ok(())
    }
}

/// Validates that every element of a slice is finite.
pub fn validate_finite_slice(data: &[f64]) -> NumericResult<()> {
    for (index, &value) in data.iter().enumerate() {
        if !value.is_finite() {
            return Err(NumericError::NonFiniteValue { index, value });
        }
    }
    Ok(())
}

/// Validates that a slice is strictly increasing.
///
/// Reports the index of the first element that is not greater than its
/// predecessor. NaN comparisons fail the `>` test and are therefore caught
/// here as well, but [`validate_finite_slice`] gives the clearer error and
/// should run first.
pub fn validate_strictly_increasing(data: &[f64]) -> NumericResult<()> {
    for index in 1..data.len() {
        if !(data[index] > data[index - 1]) {
            return Err(NumericError::NonMonotonicData { index });
        }
    }
    Ok(())
}

/// Validates that `n` is a nonzero power of two.
pub fn validate_power_of_two(n: usize) -> NumericResult<()> {
    if n == 0 || !n.is_power_of_two() {
        Err(NumericError::FftSize { size: n })
    } else {
        Ok(())
    }
}
