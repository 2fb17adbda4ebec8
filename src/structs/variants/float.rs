//! # **FloatArray Module**- *Inner Typed Float Array*
//!
//! Arrow-compatible float array with 64-byte SIMD alignment.

use std::fmt::{Display, Formatter};

use vec64::Vec64;

use crate::config::MAX_PREVIEW;
use crate::traits::type_unions::Float;
use crate::utils::{slice_null_mask, validate_null_mask_len};
use crate::{Bitmask, MaskedArray, impl_fixed_width_array};

/// Arrow-compatible Float array.
///
/// ### Fields
/// - `data`: Backing buffer containing float values.
/// - `null_mask`: Optional bit-packed validity bitmap (1 = valid, 0 = null).
///
/// ### Null Mask Handling
/// `NaN` is an ordinary value here. Only the mask marks missing entries, so a
/// valid `NaN` is never coalesced away.
#[derive(PartialEq, Clone, Debug, Default)]
pub struct FloatArray<T> {
    /// Backing buffer for values.
    pub data: Vec64<T>,
    /// Optional null mask (bit-packed; 1=valid, 0=null).
    pub null_mask: Option<Bitmask>,
}

impl_fixed_width_array!(FloatArray, Float, "float");
