//! # Error Module - Custom *Kernel* Error Type
//!
//! Defines the unified error type for the conditional selection kernels.
//!
//! ## Features
//! - Covers type unification failures, array length mismatches, out-of-range
//! `choose` indices, output allocation failures, and malformed argument lists.
//! - Implements `Display` for readable output and `Error` for integration
//! with standard Rust error handling.
//!
//! A kernel call either returns a complete output array or one of these errors.
//! There is no partial-success mode and nothing is retried internally.

use std::error::Error;
use std::fmt;

/// Catch all error type for the selection kernels
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Argument types cannot be unified to one output type.
    TypeMismatch {
        kernel: &'static str,
        expected: String,
        found: String,
    },
    /// Array-typed arguments disagree in logical length.
    LengthMismatch {
        kernel: &'static str,
        expected: usize,
        found: usize,
    },
    /// `choose` only: a non-null index is outside `[0, n_choices)`.
    IndexOutOfBounds {
        row: usize,
        index: i64,
        n_choices: usize,
    },
    /// An output buffer could not be obtained.
    AllocationFailure {
        message: String,
    },
    /// Wrong arity or otherwise malformed argument list.
    InvalidArguments(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::TypeMismatch { kernel, expected, found } => {
                write!(f, "Type mismatch in '{}': expected {}, found {}.", kernel, expected, found)
            }
            KernelError::LengthMismatch { kernel, expected, found } => {
                write!(
                    f,
                    "Length mismatch in '{}': expected {} rows, found {}.",
                    kernel, expected, found
                )
            }
            KernelError::IndexOutOfBounds { row, index, n_choices } => {
                write!(
                    f,
                    "Index out of bounds at row {}: index {} is not in [0, {}).",
                    row, index, n_choices
                )
            }
            KernelError::AllocationFailure { message } => {
                write!(f, "Allocation failure: {}", message)
            }
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// Builds a `TypeMismatch` from anything printable.
#[inline]
pub(crate) fn type_mismatch(
    kernel: &'static str,
    expected: impl fmt::Display,
    found: impl fmt::Display,
) -> KernelError {
    KernelError::TypeMismatch {
        kernel,
        expected: expected.to_string(),
        found: found.to_string(),
    }
}
