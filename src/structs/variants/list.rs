//! # **ListArray Module**- *Inner Variable-Length List Array*
//!
//! Each entry is a contiguous range of a child `Array`, addressed by 32-bit offsets.

use std::fmt::{Display, Formatter};

use vec64::Vec64;

use crate::config::MAX_PREVIEW;
use crate::enums::arrow_type::ArrowType;
use crate::structs::bitmask::Bitmask;
use crate::traits::masked_array::MaskedArray;
use crate::utils::{slice_null_mask, validate_null_mask_len};
use crate::{Array, ArrayV};

/// Arrow-compatible list array.
///
/// ### Fields
/// - `offsets`: `len + 1` offsets into `values`.
/// - `values`: the child array holding every element of every list.
/// - `null_mask`: optional bit-packed validity bitmap (1 = valid, 0 = null).
///
/// The child may contain more elements than the offsets reach, e.g. after a
/// producer sliced the parent without compacting.
#[derive(PartialEq, Clone, Debug)]
pub struct ListArray {
    pub offsets: Vec64<u32>,
    pub values: Array,
    pub null_mask: Option<Bitmask>,
}

impl ListArray {
    /// Empty list array over a child of type `child`.
    pub fn new_empty(child: &ArrowType) -> Self {
        let mut offsets = Vec64::with_capacity(1);
        offsets.push(0);
        Self {
            offsets,
            values: Array::new_empty(child),
            null_mask: None,
        }
    }

    /// Take ownership of offsets, child values and an optional null bitmap.
    pub fn from_parts(offsets: Vec64<u32>, values: Array, null_mask: Option<Bitmask>) -> Self {
        assert!(!offsets.is_empty(), "ListArray requires at least one offset");
        assert!(
            offsets[offsets.len() - 1] as usize <= values.len(),
            "ListArray offsets exceed child length"
        );
        validate_null_mask_len(offsets.len() - 1, &null_mask);
        Self { offsets, values, null_mask }
    }

    /// Builds a list array from per-row child ranges over `values`.
    /// `None` rows are null and cover zero child elements.
    pub fn from_lists(values: Array, lens: &[Option<usize>]) -> Self {
        let mut offsets = Vec64::with_capacity(lens.len() + 1);
        let mut mask = Bitmask::with_capacity(lens.len());
        let mut running = 0usize;
        offsets.push(0u32);
        for l in lens {
            running += l.unwrap_or(0);
            offsets.push(running as u32);
            mask.push(l.is_some());
        }
        let null_mask = if mask.all_set() { None } else { Some(mask) };
        Self::from_parts(offsets, values, null_mask)
    }

    /// Logical element type of the child.
    #[inline]
    pub fn child_type(&self) -> ArrowType {
        self.values.arrow_type()
    }

    /// Child range of entry `idx`, ignoring validity.
    #[inline]
    pub fn value_range(&self, idx: usize) -> (usize, usize) {
        (self.offsets[idx] as usize, self.offsets[idx + 1] as usize)
    }

    /// Copies `[offset, offset + len)` into a new, zero-offset list array with
    /// a compacted child.
    pub fn slice_clone(&self, offset: usize, len: usize) -> Self {
        assert!(offset + len <= self.len(), "ListArray::slice_clone out of bounds");
        let base = self.offsets[offset];
        let end = self.offsets[offset + len];
        let mut offsets = Vec64::with_capacity(len + 1);
        for i in offset..=offset + len {
            offsets.push(self.offsets[i] - base);
        }
        Self {
            offsets,
            values: self.values.slice_clone(base as usize, (end - base) as usize),
            null_mask: slice_null_mask(self.null_mask.as_ref(), offset, len),
        }
    }
}

impl MaskedArray for ListArray {
    type Item<'a> = ArrayV;

    #[inline]
    fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Window over the child elements of entry `idx`.
    fn get(&self, idx: usize) -> Option<ArrayV> {
        if self.is_null(idx) {
            return None;
        }
        let (start, end) = self.value_range(idx);
        Some(ArrayV::new(self.values.clone(), start, end - start))
    }

    #[inline]
    fn null_mask(&self) -> Option<&Bitmask> {
        self.null_mask.as_ref()
    }
}

impl Display for ListArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let len = self.len();
        writeln!(
            f,
            "ListArray [{} values] (dtype: {}, nulls: {})",
            len,
            ArrowType::List(Box::new(self.child_type())),
            self.null_count()
        )?;
        write!(f, "[")?;
        for i in 0..usize::min(len, MAX_PREVIEW) {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.get(i) {
                Some(v) => write!(f, "{}", v)?,
                None => write!(f, "null")?,
            }
        }
        if len > MAX_PREVIEW {
            write!(f, ", … ({} total)", len)?;
        }
        write!(f, "]")
    }
}
