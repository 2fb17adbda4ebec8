use std::fmt::{Display, Formatter};

use crate::config::MAX_PREVIEW;
use crate::structs::bitmask::Bitmask;
use crate::traits::masked_array::MaskedArray;
use crate::utils::{slice_null_mask, validate_null_mask_len};
use crate::{BitmaskVT, Length, Offset};

/// Arrow-compatible bit-packed Boolean array with 64-byte alignment (LSB = first value).
///
/// - Values are bit-packed for memory efficiency.
/// The first value is stored in the least significant bit.
/// - The `len` attribute is the number of logical boolean elements,
/// rather than the length of the backing (*u8*) `Bitmask`.
///
/// Conditions for `if_else` and `case_when` are boolean arrays, and their
/// value bits feed straight into run detection.
///
/// ### Fields:
/// - `data`: bit-packed Boolean values.
/// - `null_mask`: optional bit-packed validity bitmap (1=valid, 0=null).
/// - `len`: number of elements.
#[repr(C, align(64))]
#[derive(PartialEq, Clone, Debug, Default)]
pub struct BooleanArray {
    /// Bit-packed Boolean values
    pub data: Bitmask,
    /// Optional null mask (bit-packed; 1=valid, 0=null).
    pub null_mask: Option<Bitmask>,
    /// Number of elements.
    pub len: usize,
}

impl BooleanArray {
    /// Constructs a new BooleanArray.
    #[inline]
    pub fn new(data: Bitmask, null_mask: Option<Bitmask>) -> Self {
        let len = data.len();
        validate_null_mask_len(len, &null_mask);
        Self { data, null_mask, len }
    }

    /// Constructs a BooleanArray with reserved capacity and optional null mask.
    #[inline]
    pub fn with_capacity(cap: usize, null_mask: bool) -> Self {
        Self {
            data: Bitmask::with_capacity(cap),
            null_mask: if null_mask { Some(Bitmask::with_capacity(cap)) } else { None },
            len: 0,
        }
    }

    /// Constructs a dense BooleanArray from a slice of `bool` values (no nulls).
    #[inline]
    pub fn from_slice(slice: &[bool]) -> Self {
        Self {
            data: Bitmask::from_bools(slice),
            null_mask: None,
            len: slice.len(),
        }
    }

    /// Constructs from optional values; `None` is null with a cleared value bit.
    pub fn from_options(values: &[Option<bool>]) -> Self {
        let mut data = Bitmask::with_capacity(values.len());
        let mut mask = Bitmask::with_capacity(values.len());
        for v in values {
            data.push(v.unwrap_or(false));
            mask.push(v.is_some());
        }
        let null_mask = if mask.all_set() { None } else { Some(mask) };
        Self { data, null_mask, len: values.len() }
    }

    /// Appends a valid value.
    #[inline]
    pub fn push(&mut self, value: bool) {
        self.data.push(value);
        if let Some(mask) = self.null_mask.as_mut() {
            mask.push(true);
        }
        self.len += 1;
    }

    /// Appends a null, creating the mask on first use.
    #[inline]
    pub fn push_null(&mut self) {
        let idx = self.len;
        self.data.push(false);
        self.null_mask
            .get_or_insert_with(|| Bitmask::new_set_all(idx, true))
            .push(false);
        self.len += 1;
    }

    /// Raw value bit at `idx`, ignoring validity.
    #[inline]
    pub fn value(&self, idx: usize) -> bool {
        self.data.get(idx)
    }

    /// Value bits over `[offset, offset + len)`.
    #[inline]
    pub fn values_window(&self, offset: Offset, len: Length) -> BitmaskVT<'_> {
        (&self.data, offset, len)
    }

    /// Copies `[offset, offset + len)` into a new, zero-offset array.
    pub fn slice_clone(&self, offset: usize, len: usize) -> Self {
        assert!(offset + len <= self.len, "BooleanArray::slice_clone out of bounds");
        Self {
            data: self.data.slice_clone(offset, len),
            null_mask: slice_null_mask(self.null_mask.as_ref(), offset, len),
            len,
        }
    }
}

impl MaskedArray for BooleanArray {
    type Item<'a> = bool;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn get(&self, idx: usize) -> Option<bool> {
        assert!(idx < self.len, "BooleanArray::get index out of bounds");
        if self.is_null(idx) { None } else { Some(self.data.get(idx)) }
    }

    #[inline]
    fn null_mask(&self) -> Option<&Bitmask> {
        self.null_mask.as_ref()
    }
}

impl Display for BooleanArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "BooleanArray [{} values] (dtype: bool, nulls: {})",
            self.len,
            self.null_count()
        )?;
        write!(f, "[")?;
        for i in 0..usize::min(self.len, MAX_PREVIEW) {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.get(i) {
                Some(true) => write!(f, "true")?,
                Some(false) => write!(f, "false")?,
                None => write!(f, "null")?,
            }
        }
        if self.len > MAX_PREVIEW {
            write!(f, ", … ({} total)", self.len)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_options_and_get() {
        let arr = BooleanArray::from_options(&[Some(true), None, Some(false)]);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.get(0), Some(true));
        assert_eq!(arr.get(1), None);
        assert_eq!(arr.get(2), Some(false));
        assert!(!arr.value(1));
        assert_eq!(arr.null_count(), 1);
    }

    #[test]
    fn test_push_null_backfills_mask() {
        let mut arr = BooleanArray::with_capacity(4, false);
        arr.push(true);
        arr.push(true);
        arr.push_null();
        let mask = arr.null_mask.as_ref().unwrap();
        assert_eq!(mask.len(), 3);
        assert!(mask.get(0) && mask.get(1) && !mask.get(2));
    }

    #[test]
    fn test_slice_clone() {
        let arr = BooleanArray::from_options(&[Some(true), Some(false), None, Some(true)]);
        let s = arr.slice_clone(1, 3);
        assert_eq!(s.iter_opt().collect::<Vec<_>>(), vec![Some(false), None, Some(true)]);
    }

    #[test]
    fn test_display() {
        let arr = BooleanArray::from_slice(&[true, false]);
        assert!(format!("{}", arr).contains("[true, false]"));
    }
}
