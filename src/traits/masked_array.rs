//! Core `MaskedArray` trait, providing a common interface for all inner array types,
//! including support for null masks.

use crate::{Bitmask, BitmaskVT};

/// MaskedArray is implemented by all inner, nullable arrays.
///
/// ### Purpose
/// - MaskedArray ensures interface consistency across `BooleanArray`,
/// `FloatArray`, `IntegerArray`, `StringArray` and `ListArray`.
/// - Only the length, element access and mask access differ per storage category;
/// null handling sits on the trait.
pub trait MaskedArray {
    /// What `get` hands back, e.g. `i64`, `bool`, `&str`.
    type Item<'a>
    where
        Self: 'a;

    /// Returns the number of elements in the array.
    fn len(&self) -> usize;

    /// Returns true if the array is empty.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieves the value at the given index, or None if null.
    ///
    /// Panics when `idx >= len()`.
    fn get(&self, idx: usize) -> Option<Self::Item<'_>>;

    /// Returns a reference to the optional null mask.
    fn null_mask(&self) -> Option<&Bitmask>;

    /// Returns true if the value at the given index is null.
    #[inline]
    fn is_null(&self, idx: usize) -> bool {
        match self.null_mask() {
            Some(mask) => !mask.get(idx),
            None => false,
        }
    }

    /// Returns true if the value at the given index is present.
    #[inline]
    fn is_valid(&self, idx: usize) -> bool {
        !self.is_null(idx)
    }

    /// Checks if the array has a null bitmask.
    #[inline]
    fn is_nullable(&self) -> bool {
        self.null_mask().is_some()
    }

    /// Returns the total number of nulls.
    fn null_count(&self) -> usize {
        match self.null_mask() {
            Some(mask) => mask.count_zeros(),
            None => 0,
        }
    }

    /// Borrowed validity window over `[offset, offset + len)`, `None` when all valid.
    #[inline]
    fn null_window(&self, offset: usize, len: usize) -> Option<BitmaskVT<'_>> {
        self.null_mask().map(|m| (m, offset, len))
    }

    /// Returns an iterator over the values, as `Option<Item>`.
    fn iter_opt(&self) -> impl Iterator<Item = Option<Self::Item<'_>>> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}
