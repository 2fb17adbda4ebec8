//! # **IntegerArray Module**- *Inner Typed Integer Array*
//!
//! Arrow-compatible, 64-byte aligned integer array.
//!
//! ## Overview
//! - Logical type: fixed-width signed/unsigned integers (`T: Integer`).
//! - Physical storage: `Vec64<T>` plus an optional bit-packed validity mask (`Bitmask`).
//! - Usable standalone or as the numeric arm of `NumericArray` / `Array`.
//!
//! Slots under a null keep whatever value was written there. Kernels copy them
//! through unchanged, so two arrays with equal logical content may still
//! differ in those slots unless they were built the same way.

use std::fmt::{Display, Formatter};

use vec64::Vec64;

use crate::config::MAX_PREVIEW;
use crate::traits::type_unions::Integer;
use crate::utils::{slice_null_mask, validate_null_mask_len};
use crate::{Bitmask, MaskedArray, impl_fixed_width_array};

/// # IntegerArray
///
/// Integer array with optional null mask.
///
/// ### Fields
/// - `data`: backing buffer of integer values.
/// - `null_mask`: optional bit-packed validity bitmap (1 = valid, 0 = null).
///
/// ## Example
/// ```rust
/// use mux_kernels::{IntegerArray, MaskedArray};
///
/// let arr = IntegerArray::<i64>::from_options(&[Some(1), None, Some(3)]);
/// assert_eq!(arr.len(), 3);
/// assert_eq!(arr.get(1), None);
/// assert_eq!(arr.null_count(), 1);
/// ```
#[derive(PartialEq, Clone, Debug, Default)]
pub struct IntegerArray<T> {
    /// Backing buffer for values.
    pub data: Vec64<T>,
    /// Optional null mask (bit-packed; 1=valid, 0=null).
    pub null_mask: Option<Bitmask>,
}

impl_fixed_width_array!(IntegerArray, Integer, "int");
