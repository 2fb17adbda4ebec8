//! # **Array Module** - *Main High-Level Array Type*
//!
//! `Array` is the unified container for every array type the selection
//! kernels accept and produce.
//!
//! ## Features:
//! - direct variant access to numeric, text, boolean and list categories
//! - one dispatch arm per storage category (fixed-width, bit-packed,
//!   variable-length, nested)
//! - `Arc`-wrapped inner arrays so clones and windows never copy buffers.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::enums::arrow_type::ArrowType;
use crate::enums::scalar::Scalar;
use crate::{
    ArrayV, Bitmask, BooleanArray, FloatArray, IntegerArray, ListArray, MaskedArray,
    NumericArray, StringArray, TextArray,
};

/// # Array
///
/// Standard `Array` type.
///
/// ## Overview
/// The dual-enum approach may look verbose but works well in practice:
///
/// - Enables clean function signatures with direct access to concrete types
///   (e.g. `&NumericArray`), supporting category-level dispatch without
///   exhaustive matches at every call site.
/// - Kernels match on the outer enum for the storage category, and only
///   drop to the inner variant where the element type matters.
///
/// ## Usage
/// ```rust
/// use mux_kernels::{Array, arr_i64_opt};
///
/// let arr = arr_i64_opt![Some(1), None, Some(3)];
/// assert_eq!(arr.len(), 3);
/// assert_eq!(arr.null_count(), 1);
/// ```
#[repr(C, align(64))]
#[derive(PartialEq, Clone, Debug, Default)]
pub enum Array {
    NumericArray(NumericArray),
    TextArray(TextArray),
    BooleanArray(Arc<BooleanArray>),
    ListArray(Arc<ListArray>),
    #[default]
    Null, // Default Marker for mem::take
}

impl Array {
    /// Creates an Array enum with an Int32 array.
    pub fn from_int32(arr: IntegerArray<i32>) -> Self {
        Array::NumericArray(NumericArray::Int32(Arc::new(arr)))
    }

    /// Creates an Array enum with an Int64 array.
    pub fn from_int64(arr: IntegerArray<i64>) -> Self {
        Array::NumericArray(NumericArray::Int64(Arc::new(arr)))
    }

    /// Creates an Array enum with a UInt32 array.
    pub fn from_uint32(arr: IntegerArray<u32>) -> Self {
        Array::NumericArray(NumericArray::UInt32(Arc::new(arr)))
    }

    /// Creates an Array enum with a UInt64 array.
    pub fn from_uint64(arr: IntegerArray<u64>) -> Self {
        Array::NumericArray(NumericArray::UInt64(Arc::new(arr)))
    }

    /// Creates an Array enum with a Float32 array.
    pub fn from_float32(arr: FloatArray<f32>) -> Self {
        Array::NumericArray(NumericArray::Float32(Arc::new(arr)))
    }

    /// Creates an Array enum with a Float64 array.
    pub fn from_float64(arr: FloatArray<f64>) -> Self {
        Array::NumericArray(NumericArray::Float64(Arc::new(arr)))
    }

    /// Creates an Array enum with a String32 array.
    pub fn from_string32(arr: StringArray<u32>) -> Self {
        Array::TextArray(TextArray::String32(Arc::new(arr)))
    }

    /// Creates an Array enum with a String64 array.
    pub fn from_string64(arr: StringArray<u64>) -> Self {
        Array::TextArray(TextArray::String64(Arc::new(arr)))
    }

    /// Creates an Array enum with a Boolean array.
    pub fn from_bool(arr: BooleanArray) -> Self {
        Array::BooleanArray(Arc::new(arr))
    }

    /// Creates an Array enum with a List array.
    pub fn from_list(arr: ListArray) -> Self {
        Array::ListArray(Arc::new(arr))
    }

    /// Zero-length array of the given logical type.
    pub fn new_empty(dtype: &ArrowType) -> Self {
        match dtype {
            ArrowType::Null => Array::Null,
            ArrowType::Boolean => Array::from_bool(BooleanArray::default()),
            ArrowType::Int32 => Array::from_int32(IntegerArray::default()),
            ArrowType::Int64 => Array::from_int64(IntegerArray::default()),
            ArrowType::UInt32 => Array::from_uint32(IntegerArray::default()),
            ArrowType::UInt64 => Array::from_uint64(IntegerArray::default()),
            ArrowType::Float32 => Array::from_float32(FloatArray::default()),
            ArrowType::Float64 => Array::from_float64(FloatArray::default()),
            ArrowType::String => Array::from_string32(StringArray::default()),
            ArrowType::LargeString => Array::from_string64(StringArray::default()),
            ArrowType::List(child) => Array::from_list(ListArray::new_empty(child)),
        }
    }

    /// Logical type of the array, including the child type for lists.
    pub fn arrow_type(&self) -> ArrowType {
        match self {
            Array::NumericArray(a) => a.arrow_type(),
            Array::TextArray(a) => a.arrow_type(),
            Array::BooleanArray(_) => ArrowType::Boolean,
            Array::ListArray(a) => ArrowType::List(Box::new(a.child_type())),
            Array::Null => ArrowType::Null,
        }
    }

    /// Returns the length of the array.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Array::NumericArray(a) => a.len(),
            Array::TextArray(a) => a.len(),
            Array::BooleanArray(a) => a.len(),
            Array::ListArray(a) => a.len(),
            Array::Null => 0,
        }
    }

    /// Returns true if the array is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the underlying null mask, if any.
    #[inline]
    pub fn null_mask(&self) -> Option<&Bitmask> {
        match self {
            Array::NumericArray(a) => a.null_mask(),
            Array::TextArray(a) => a.null_mask(),
            Array::BooleanArray(a) => a.null_mask.as_ref(),
            Array::ListArray(a) => a.null_mask.as_ref(),
            Array::Null => None,
        }
    }

    /// Number of null entries.
    #[inline]
    pub fn null_count(&self) -> usize {
        self.null_mask().map_or(0, |m| m.count_zeros())
    }

    /// Returns true if entry `idx` is null.
    #[inline]
    pub fn is_null(&self, idx: usize) -> bool {
        self.null_mask().is_some_and(|m| !m.get(idx))
    }

    /// Zero-copy window over `[offset, offset + len)`.
    #[inline]
    pub fn view(&self, offset: usize, len: usize) -> ArrayV {
        ArrayV::new(self.clone(), offset, len)
    }

    /// Copies `[offset, offset + len)` into a new array of the same type.
    pub fn slice_clone(&self, offset: usize, len: usize) -> Self {
        match self {
            Array::NumericArray(a) => Array::NumericArray(a.slice_clone(offset, len)),
            Array::TextArray(a) => Array::TextArray(a.slice_clone(offset, len)),
            Array::BooleanArray(a) => Array::from_bool(a.slice_clone(offset, len)),
            Array::ListArray(a) => Array::from_list(a.slice_clone(offset, len)),
            Array::Null => Array::Null,
        }
    }

    /// Entry `idx` as a typed scalar; nulls keep the array's type.
    pub fn get_scalar(&self, idx: usize) -> Scalar {
        match self {
            Array::NumericArray(NumericArray::Int32(a)) => Scalar::Int32(a.get(idx)),
            Array::NumericArray(NumericArray::Int64(a)) => Scalar::Int64(a.get(idx)),
            Array::NumericArray(NumericArray::UInt32(a)) => Scalar::UInt32(a.get(idx)),
            Array::NumericArray(NumericArray::UInt64(a)) => Scalar::UInt64(a.get(idx)),
            Array::NumericArray(NumericArray::Float32(a)) => Scalar::Float32(a.get(idx)),
            Array::NumericArray(NumericArray::Float64(a)) => Scalar::Float64(a.get(idx)),
            Array::TextArray(TextArray::String32(a)) => {
                Scalar::String32(a.get_str(idx).map(str::to_owned))
            }
            Array::TextArray(TextArray::String64(a)) => {
                Scalar::String64(a.get_str(idx).map(str::to_owned))
            }
            Array::BooleanArray(a) => Scalar::Boolean(a.get(idx)),
            Array::ListArray(a) => Scalar::List {
                child: a.child_type(),
                value: a.get(idx).map(|v| v.to_array()),
            },
            Array::NumericArray(NumericArray::Null) | Array::TextArray(TextArray::Null) | Array::Null => {
                Scalar::Null
            }
        }
    }

    /// Returns a reference to the inner `NumericArray`, panicking otherwise.
    pub fn num(&self) -> &NumericArray {
        match self {
            Array::NumericArray(a) => a,
            other => panic!("expected a numeric array, found {}", other.arrow_type()),
        }
    }

    /// Returns a reference to the inner `TextArray`, panicking otherwise.
    pub fn str(&self) -> &TextArray {
        match self {
            Array::TextArray(a) => a,
            other => panic!("expected a text array, found {}", other.arrow_type()),
        }
    }

    /// Returns a reference to the inner `BooleanArray`, panicking otherwise.
    pub fn bool(&self) -> &BooleanArray {
        match self {
            Array::BooleanArray(a) => a,
            other => panic!("expected a boolean array, found {}", other.arrow_type()),
        }
    }

    /// Returns a reference to the inner `ListArray`, panicking otherwise.
    pub fn list(&self) -> &ListArray {
        match self {
            Array::ListArray(a) => a,
            other => panic!("expected a list array, found {}", other.arrow_type()),
        }
    }
}

impl Display for Array {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Array::NumericArray(a) => write!(f, "{}", a),
            Array::TextArray(a) => write!(f, "{}", a),
            Array::BooleanArray(a) => write!(f, "{}", a),
            Array::ListArray(a) => write!(f, "{}", a),
            Array::Null => write!(f, "NullArray [0 values]"),
        }
    }
}

impl From<BooleanArray> for Array {
    fn from(arr: BooleanArray) -> Self {
        Array::from_bool(arr)
    }
}

impl From<ListArray> for Array {
    fn from(arr: ListArray) -> Self {
        Array::from_list(arr)
    }
}

// ----------------- Constructor macros --------------------------------

#[macro_export]
macro_rules! arr_i32 {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_int32($crate::IntegerArray::<i32>::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_i64 {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_int64($crate::IntegerArray::<i64>::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_u32 {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_uint32($crate::IntegerArray::<u32>::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_u64 {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_uint64($crate::IntegerArray::<u64>::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_f32 {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_float32($crate::FloatArray::<f32>::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_f64 {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_float64($crate::FloatArray::<f64>::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_bool {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_bool($crate::BooleanArray::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_str32 {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_string32($crate::StringArray::<u32>::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_str64 {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_string64($crate::StringArray::<u64>::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_i32_opt {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_int32($crate::IntegerArray::<i32>::from_options(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_i64_opt {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_int64($crate::IntegerArray::<i64>::from_options(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_u32_opt {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_uint32($crate::IntegerArray::<u32>::from_options(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_f64_opt {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_float64($crate::FloatArray::<f64>::from_options(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_bool_opt {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_bool($crate::BooleanArray::from_options(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_str32_opt {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_string32($crate::StringArray::<u32>::from_options(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_str64_opt {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_string64($crate::StringArray::<u64>::from_options(&[$($x),*]))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_type_and_len() {
        assert_eq!(arr_i32![1, 2].arrow_type(), ArrowType::Int32);
        assert_eq!(arr_u64![1].arrow_type(), ArrowType::UInt64);
        assert_eq!(arr_f32![1.0].arrow_type(), ArrowType::Float32);
        assert_eq!(arr_str64!["a"].arrow_type(), ArrowType::LargeString);
        assert_eq!(arr_bool![true, false, true].len(), 3);
        assert_eq!(Array::Null.len(), 0);
        let list = Array::from_list(ListArray::from_lists(arr_str32!["x"], &[Some(1)]));
        assert_eq!(list.arrow_type(), ArrowType::List(Box::new(ArrowType::String)));
    }

    #[test]
    fn test_null_count_and_is_null() {
        let arr = arr_str32_opt![Some("a"), None, None];
        assert_eq!(arr.null_count(), 2);
        assert!(arr.is_null(1));
        assert!(!arr.is_null(0));
        assert_eq!(arr_i64![1, 2].null_count(), 0);
    }

    #[test]
    fn test_new_empty_matches_type() {
        for dt in [
            ArrowType::Boolean,
            ArrowType::Int64,
            ArrowType::Float64,
            ArrowType::LargeString,
            ArrowType::List(Box::new(ArrowType::Int32)),
        ] {
            let arr = Array::new_empty(&dt);
            assert_eq!(arr.arrow_type(), dt);
            assert!(arr.is_empty());
        }
    }

    #[test]
    fn test_get_scalar() {
        let arr = arr_i64_opt![Some(4), None];
        assert_eq!(arr.get_scalar(0), Scalar::Int64(Some(4)));
        assert_eq!(arr.get_scalar(1), Scalar::Int64(None));
        let s = arr_str32_opt![Some("q")];
        assert_eq!(s.get_scalar(0), Scalar::String32(Some("q".to_string())));
    }

    #[test]
    fn test_slice_clone() {
        let arr = arr_bool_opt![Some(true), None, Some(false)];
        let s = arr.slice_clone(1, 2);
        assert_eq!(s, arr_bool_opt![None, Some(false)]);
    }

    #[test]
    fn test_null_free_window_equals_dense_array() {
        let ints = arr_i64_opt![None, Some(2), Some(3), Some(4)];
        assert_eq!(ints.slice_clone(1, 3), arr_i64![2, 3, 4]);
        assert_eq!(ArrayV::new(ints, 1, 3), ArrayV::from(arr_i64![2, 3, 4]));

        let strs = arr_str32_opt![Some("a"), Some("bc"), None];
        assert_eq!(strs.slice_clone(0, 2), arr_str32!["a", "bc"]);
        let bools = arr_bool_opt![None, Some(true)];
        assert_eq!(bools.slice_clone(1, 1), arr_bool![true]);
    }
}
