//! # **NumericArray Module** - *Numeric arm of the `Array` enum*
//!
//! NumericArray unifies all integer and floating-point arrays
//! into a single enum, so kernels handle the whole fixed-width
//! storage category with one code path.

use std::{
    fmt::{Display, Formatter},
    sync::Arc,
};

use crate::enums::arrow_type::ArrowType;
use crate::{Bitmask, FloatArray, IntegerArray, MaskedArray};

/// # NumericArray
///
/// Unified numerical array container.
///
/// ## Usage:
/// - It is accessible from `Array` using `.num()`,
/// and provides typed variant access via for e.g.,
/// `.i64()`, so one can drill down to the required
/// granularity via `myarr.num().i64()`.
/// - Inner arrays sit behind `Arc` so windows and clones share buffers.
#[repr(C, align(64))]
#[derive(PartialEq, Clone, Debug, Default)]
pub enum NumericArray {
    Int32(Arc<IntegerArray<i32>>),
    Int64(Arc<IntegerArray<i64>>),
    UInt32(Arc<IntegerArray<u32>>),
    UInt64(Arc<IntegerArray<u64>>),
    Float32(Arc<FloatArray<f32>>),
    Float64(Arc<FloatArray<f64>>),
    #[default]
    Null, // Default Marker for mem::take
}

/// Applies `$body` to the inner array of every typed variant, with `$null` for `Null`.
macro_rules! match_numeric {
    ($self:expr, $arr:ident => $body:expr, $null:expr) => {
        match $self {
            NumericArray::Int32($arr) => $body,
            NumericArray::Int64($arr) => $body,
            NumericArray::UInt32($arr) => $body,
            NumericArray::UInt64($arr) => $body,
            NumericArray::Float32($arr) => $body,
            NumericArray::Float64($arr) => $body,
            NumericArray::Null => $null,
        }
    };
}

impl NumericArray {
    /// Returns the logical length of the numeric array.
    #[inline]
    pub fn len(&self) -> usize {
        match_numeric!(self, arr => arr.len(), 0)
    }

    /// Returns true if the array is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the underlying null mask, if any.
    #[inline]
    pub fn null_mask(&self) -> Option<&Bitmask> {
        match_numeric!(self, arr => arr.null_mask.as_ref(), None)
    }

    /// Logical type tag of the variant.
    pub fn arrow_type(&self) -> ArrowType {
        match self {
            NumericArray::Int32(_) => ArrowType::Int32,
            NumericArray::Int64(_) => ArrowType::Int64,
            NumericArray::UInt32(_) => ArrowType::UInt32,
            NumericArray::UInt64(_) => ArrowType::UInt64,
            NumericArray::Float32(_) => ArrowType::Float32,
            NumericArray::Float64(_) => ArrowType::Float64,
            NumericArray::Null => ArrowType::Null,
        }
    }

    /// Copies `[offset, offset + len)` into a new variant of the same type.
    pub fn slice_clone(&self, offset: usize, len: usize) -> Self {
        match self {
            NumericArray::Int32(a) => NumericArray::Int32(Arc::new(a.slice_clone(offset, len))),
            NumericArray::Int64(a) => NumericArray::Int64(Arc::new(a.slice_clone(offset, len))),
            NumericArray::UInt32(a) => NumericArray::UInt32(Arc::new(a.slice_clone(offset, len))),
            NumericArray::UInt64(a) => NumericArray::UInt64(Arc::new(a.slice_clone(offset, len))),
            NumericArray::Float32(a) => NumericArray::Float32(Arc::new(a.slice_clone(offset, len))),
            NumericArray::Float64(a) => NumericArray::Float64(Arc::new(a.slice_clone(offset, len))),
            NumericArray::Null => NumericArray::Null,
        }
    }

    /// Returns the inner `IntegerArray<i64>`, panicking on any other variant.
    pub fn i64(&self) -> &IntegerArray<i64> {
        match self {
            NumericArray::Int64(a) => a,
            other => panic!("expected Int64, found {}", other.arrow_type()),
        }
    }

    /// Returns the inner `IntegerArray<i32>`, panicking on any other variant.
    pub fn i32(&self) -> &IntegerArray<i32> {
        match self {
            NumericArray::Int32(a) => a,
            other => panic!("expected Int32, found {}", other.arrow_type()),
        }
    }

    /// Returns the inner `FloatArray<f64>`, panicking on any other variant.
    pub fn f64(&self) -> &FloatArray<f64> {
        match self {
            NumericArray::Float64(a) => a,
            other => panic!("expected Float64, found {}", other.arrow_type()),
        }
    }
}

impl Display for NumericArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match_numeric!(self, arr => write!(f, "{}", arr), write!(f, "NullNumericArray [0 values]"))
    }
}
