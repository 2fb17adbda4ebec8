//! # **TextArray Module** - *Text arm of the `Array` enum*
//!
//! TextArray unifies the 32-bit and 64-bit offset string arrays into
//! a single enum for the variable-length storage category.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::enums::arrow_type::ArrowType;
use crate::{Bitmask, MaskedArray, StringArray};

/// # TextArray
///
/// Unified Text array container.
///
/// ## Usage:
/// - It is accessible from `Array` using `.str()`,
/// and provides typed variant access via `.str32()` / `.str64()`.
#[repr(C, align(64))]
#[derive(PartialEq, Clone, Debug, Default)]
pub enum TextArray {
    String32(Arc<StringArray<u32>>),
    String64(Arc<StringArray<u64>>),
    #[default]
    Null, // Default Marker for mem::take
}

impl TextArray {
    /// Returns the logical length of the text array.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            TextArray::String32(arr) => arr.len(),
            TextArray::String64(arr) => arr.len(),
            TextArray::Null => 0,
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
            TextArray::String32(arr) => arr.null_mask.as_ref(),
            TextArray::String64(arr) => arr.null_mask.as_ref(),
            TextArray::Null => None,
        }
    }

    /// Logical type tag of the variant.
    pub fn arrow_type(&self) -> ArrowType {
        match self {
            TextArray::String32(_) => ArrowType::String,
            TextArray::String64(_) => ArrowType::LargeString,
            TextArray::Null => ArrowType::Null,
        }
    }

    /// String at `idx`, or `None` when null.
    pub fn get_str(&self, idx: usize) -> Option<&str> {
        match self {
            TextArray::String32(arr) => arr.get_str(idx),
            TextArray::String64(arr) => arr.get_str(idx),
            TextArray::Null => None,
        }
    }

    /// Copies `[offset, offset + len)` into a new variant of the same type.
    pub fn slice_clone(&self, offset: usize, len: usize) -> Self {
        match self {
            TextArray::String32(a) => TextArray::String32(Arc::new(a.slice_clone(offset, len))),
            TextArray::String64(a) => TextArray::String64(Arc::new(a.slice_clone(offset, len))),
            TextArray::Null => TextArray::Null,
        }
    }

    /// Returns the inner `StringArray<u32>`, panicking on any other variant.
    pub fn str32(&self) -> &StringArray<u32> {
        match self {
            TextArray::String32(a) => a,
            other => panic!("expected String, found {}", other.arrow_type()),
        }
    }

    /// Returns the inner `StringArray<u64>`, panicking on any other variant.
    pub fn str64(&self) -> &StringArray<u64> {
        match self {
            TextArray::String64(a) => a,
            other => panic!("expected LargeString, found {}", other.arrow_type()),
        }
    }
}

impl Display for TextArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TextArray::String32(arr) => write!(f, "{}", arr),
            TextArray::String64(arr) => write!(f, "{}", arr),
            TextArray::Null => write!(f, "NullTextArray [0 values]"),
        }
    }
}
