//! # **Utilities** - *Shared validation helpers*

use crate::Bitmask;
use crate::kernels::bitmask::count_set_bits;

/// Asserts that an optional null mask covers exactly `data_len` elements.
#[inline(always)]
pub fn validate_null_mask_len(data_len: usize, null_mask: &Option<Bitmask>) {
    if let Some(mask) = null_mask {
        assert_eq!(
            mask.len(),
            data_len,
            "Validation Error: Null mask length ({}) does not match data length ({})",
            mask.len(),
            data_len
        );
    }
}

/// Copies the `[offset, offset + len)` window of a null mask.
///
/// A window with no nulls yields `None`, matching what the kernels emit for
/// null-free outputs.
#[inline]
pub fn slice_null_mask(null_mask: Option<&Bitmask>, offset: usize, len: usize) -> Option<Bitmask> {
    let mask = null_mask?;
    if count_set_bits((mask, offset, len)) == len {
        return None;
    }
    Some(mask.slice_clone(offset, len))
}
