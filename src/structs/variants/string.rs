//! # **StringArray Module**- *Inner UTF-8 String Array*
//!
//! Variable-length UTF-8 strings stored as an offsets buffer plus one
//! concatenated byte buffer, with an optional validity mask.
//!
//! `StringArray<u32>` is the 32-bit offset flavour (`String`) and
//! `StringArray<u64>` the 64-bit one (`LargeString`).

use std::fmt::{Display, Formatter};

use vec64::Vec64;

use crate::config::MAX_PREVIEW;
use crate::enums::error::KernelError;
use crate::structs::bitmask::Bitmask;
use crate::traits::masked_array::MaskedArray;
use crate::traits::type_unions::Integer;
use crate::utils::{slice_null_mask, validate_null_mask_len};

/// Arrow-compatible UTF-8 string array.
///
/// ### Fields
/// - `offsets`: `len + 1` monotonically non-decreasing offsets; string `i`
///   is `data[offsets[i]..offsets[i + 1]]`.
/// - `data`: concatenated UTF-8 bytes.
/// - `null_mask`: optional bit-packed validity bitmap (1 = valid, 0 = null).
///
/// Null entries normally span zero bytes, but any span is tolerated.
///
/// ## Example
/// ```rust
/// use mux_kernels::{StringArray, MaskedArray};
///
/// let arr = StringArray::<u32>::from_options(&[Some("a"), None, Some("ccc")]);
/// assert_eq!(arr.len(), 3);
/// assert_eq!(arr.get(2), Some("ccc"));
/// assert_eq!(arr.get(1), None);
/// ```
#[derive(PartialEq, Clone, Debug)]
pub struct StringArray<T> {
    /// Offsets into the values buffer. The i-th string is at data[offsets[i]..offsets[i+1]].
    pub offsets: Vec64<T>,

    /// Concatenated UTF-8 byte values for all strings.
    pub data: Vec64<u8>,

    /// Optional null mask (bit-packed; 1=valid, 0=null).
    pub null_mask: Option<Bitmask>,
}

impl<T: Integer> Default for StringArray<T> {
    fn default() -> Self {
        Self::with_capacity(0, 0, false)
    }
}

impl<T: Integer> StringArray<T> {
    /// Constructs a StringArray with reserved capacity.
    #[inline]
    pub fn with_capacity(n_strings: usize, values_cap: usize, null_mask: bool) -> Self {
        let mut offsets = Vec64::with_capacity(n_strings + 1);
        offsets.push(T::zero());
        Self {
            offsets,
            data: Vec64::with_capacity(values_cap),
            null_mask: if null_mask { Some(Bitmask::with_capacity(n_strings)) } else { None },
        }
    }

    /// Constructs a dense StringArray from a slice of `&str`.
    ///
    /// Panics if the total byte length overflows `T`.
    pub fn from_slice(slice: &[&str]) -> Self {
        let total = slice.iter().map(|s| s.len()).sum();
        let mut arr = Self::with_capacity(slice.len(), total, false);
        for s in slice {
            arr.push_str(s);
        }
        arr
    }

    /// Constructs from optional strings; `None` entries are zero-length nulls.
    ///
    /// Panics if the total byte length overflows `T`.
    pub fn from_options(values: &[Option<&str>]) -> Self {
        let total = values.iter().map(|s| s.map_or(0, str::len)).sum();
        let mut arr = Self::with_capacity(values.len(), total, false);
        for v in values {
            match v {
                Some(s) => arr.push_str(s),
                None => arr.push_null(),
            }
        }
        arr
    }

    /// Take ownership of **offsets**, **values**, and an optional null bitmap.
    /// The usual Arrow invariants must hold (`offsets.len() == len + 1`, last
    /// offset == `data.len()`, monotonically non-decreasing).
    #[inline]
    pub fn from_parts(offsets: Vec64<T>, data: Vec64<u8>, null_mask: Option<Bitmask>) -> Self {
        debug_assert!(!offsets.is_empty());
        debug_assert_eq!(offsets[offsets.len() - 1].to_usize(), data.len());
        validate_null_mask_len(offsets.len() - 1, &null_mask);
        Self { offsets, data, null_mask }
    }

    /// Appends a valid string.
    ///
    /// Panics if the byte length overflows `T`. See [`Self::try_push_str`].
    #[inline]
    pub fn push_str(&mut self, value: &str) {
        if let Err(e) = self.try_push_str(value) {
            panic!("{}", e);
        }
    }

    /// Appends a valid string, reporting offset overflow as an error.
    pub fn try_push_str(&mut self, value: &str) -> Result<(), KernelError> {
        let end = self.data.len() + value.len();
        let off = T::from_usize(end).ok_or_else(|| KernelError::AllocationFailure {
            message: format!("string offset {} overflows the offset type", end),
        })?;
        self.data.extend_from_slice(value.as_bytes());
        self.offsets.push(off);
        if let Some(mask) = self.null_mask.as_mut() {
            mask.push(true);
        }
        Ok(())
    }

    /// Appends a zero-length null.
    #[inline]
    pub fn push_null(&mut self) {
        let idx = self.len();
        let last = self.offsets[idx];
        self.offsets.push(last);
        self.null_mask
            .get_or_insert_with(|| Bitmask::new_set_all(idx, true))
            .push(false);
    }

    /// Raw byte range of entry `idx`, ignoring validity.
    #[inline]
    pub fn value_range(&self, idx: usize) -> (usize, usize) {
        (self.offsets[idx].to_usize(), self.offsets[idx + 1].to_usize())
    }

    /// Raw bytes of entry `idx`, ignoring validity.
    #[inline]
    pub fn value_bytes(&self, idx: usize) -> &[u8] {
        let (start, end) = self.value_range(idx);
        &self.data[start..end]
    }

    /// Returns the string value at the given index.
    ///
    /// # Panics
    /// Panics if the index is out-of-bounds or the bytes are not UTF-8.
    #[inline]
    pub fn get_str(&self, idx: usize) -> Option<&str> {
        if self.is_null(idx) {
            return None;
        }
        match std::str::from_utf8(self.value_bytes(idx)) {
            Ok(s) => Some(s),
            Err(e) => panic!("StringArray holds invalid UTF-8 at {}: {}", idx, e),
        }
    }

    /// Copies `[offset, offset + len)` into a new, zero-offset array, rebasing offsets.
    pub fn slice_clone(&self, offset: usize, len: usize) -> Self {
        assert!(offset + len <= self.len(), "StringArray::slice_clone out of bounds");
        let base = self.offsets[offset].to_usize();
        let end = self.offsets[offset + len].to_usize();
        let mut offsets = Vec64::with_capacity(len + 1);
        for i in offset..=offset + len {
            offsets.push(self.offsets[i] - self.offsets[offset]);
        }
        let mut data = Vec64::with_capacity(end - base);
        data.extend_from_slice(&self.data[base..end]);
        Self {
            offsets,
            data,
            null_mask: slice_null_mask(self.null_mask.as_ref(), offset, len),
        }
    }
}

impl<T: Integer> MaskedArray for StringArray<T> {
    type Item<'a> = &'a str where Self: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    #[inline]
    fn get(&self, idx: usize) -> Option<&str> {
        self.get_str(idx)
    }

    #[inline]
    fn null_mask(&self) -> Option<&Bitmask> {
        self.null_mask.as_ref()
    }
}

impl<T: Integer> Display for StringArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let len = self.len();
        writeln!(
            f,
            "StringArray [{} values] (dtype: string, nulls: {})",
            len,
            self.null_count()
        )?;
        write!(f, "[")?;
        for i in 0..usize::min(len, MAX_PREVIEW) {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.get_str(i) {
                Some(s) => write!(f, "\"{}\"", s)?,
                None => write!(f, "null")?,
            }
        }
        if len > MAX_PREVIEW {
            write!(f, ", … ({} total)", len)?;
        }
        write!(f, "]")
    }
}
