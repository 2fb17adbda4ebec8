//! # Value Module
//!
//! Contains the `Value` enum, the argument type every selection kernel takes.
//!
//! ## Description
//! - Wraps either a windowed array or a broadcastable scalar under one type,
//! so kernels accept mixed array/scalar argument lists.
//! - `From` conversions from `Array`, `ArrayV` and `Scalar` keep call sites short.

use std::convert::From;
use std::fmt::{Display, Formatter};

use crate::enums::arrow_type::ArrowType;
use crate::{Array, ArrayV, Scalar};

/// # Value
///
/// A kernel argument: a materialised array slice, or a scalar that behaves
/// as a constant column of whatever length the call resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Array(ArrayV),
    Scalar(Scalar),
}

impl Value {
    /// Logical type; `ArrowType::Null` for the untyped null literal.
    #[inline]
    pub fn arrow_type(&self) -> ArrowType {
        match self {
            Value::Array(v) => v.arrow_type(),
            Value::Scalar(s) => s.arrow_type(),
        }
    }

    /// Row count for arrays, `None` for scalars.
    #[inline]
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(v) => Some(v.len()),
            Value::Scalar(_) => None,
        }
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// True when the argument carries a concrete type.
    #[inline]
    pub fn is_typed(&self) -> bool {
        !matches!(self, Value::Scalar(Scalar::Null))
    }

    /// True when row `i` of the (broadcast) argument is null.
    #[inline]
    pub fn is_null_at(&self, i: usize) -> bool {
        match self {
            Value::Array(v) => v.is_null(i),
            Value::Scalar(s) => s.is_null(),
        }
    }

    /// Number of nulls across `len` broadcast rows.
    pub fn null_count(&self, len: usize) -> usize {
        match self {
            Value::Array(v) => v.null_count(),
            Value::Scalar(s) if s.is_null() => len,
            Value::Scalar(_) => 0,
        }
    }

    /// Restricts an array argument to `[offset, offset + len)`; scalars pass through.
    pub fn slice(&self, offset: usize, len: usize) -> Value {
        match self {
            Value::Array(v) => Value::Array(v.slice(offset, len)),
            Value::Scalar(s) => Value::Scalar(s.clone()),
        }
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(ArrayV::from(array))
    }
}

impl From<ArrayV> for Value {
    fn from(view: ArrayV) -> Self {
        Value::Array(view)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Array(v) => write!(f, "{}", v),
            Value::Scalar(s) => write!(f, "Scalar({})", s),
        }
    }
}
