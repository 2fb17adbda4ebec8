//! # **Bitmask Module** - *Fast Bitpacked Byte Bitmask*
//!
//! Arrow-compatible, packed validity/boolean bitmask with 64-byte alignment.
//!
//! ## Purpose
//! - Validity (null) masks for all array types (1 = valid, 0 = null).
//! - Backing storage for `BooleanArray`.
//!
//! ## Behaviour
//! - LSB corresponds to the first logical element.
//! - Windows are borrowed as `BitmaskVT` tuples `(&Bitmask, offset, len)` and may start
//!   at any bit, so callers never reason about byte boundaries.
//! - Trailing padding bits are always masked off to match the Arrow format.
//!
//! Word-level bit arithmetic lives in [`crate::kernels::bitmask`]; this type only
//! owns the storage and per-bit accessors.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use vec64::Vec64;

use crate::enums::error::KernelError;
use crate::kernels::bitmask::{count_set_bits, load_bits, store_bits};
use crate::{BitmaskVT, Length, Offset};

/// # Bitmask
///
/// 64-byte–aligned packed bitmask.
///
/// ### Description
/// - Used for `BooleanArray` data and as the validity/null mask for all datatypes.
/// - Arrow-compatible: LSB = first element, 1 = set/valid, 0 = cleared/null.
///
/// # Example
/// ```rust
/// use mux_kernels::Bitmask;
///
/// let mut m = Bitmask::new_set_all(10, false);
/// m.set(3, true);
/// m.set(7, true);
/// assert!(m.get(3) && m.get(7));
/// assert_eq!(m.count_ones(), 2);
/// ```
#[derive(Clone, PartialEq, Default)]
pub struct Bitmask {
    pub bits: Vec64<u8>,
    pub len: usize,
}

impl Bitmask {
    /// Wraps an existing packed buffer holding at least `len` bits.
    #[inline]
    pub fn new(bits: Vec64<u8>, len: usize) -> Self {
        assert!(
            bits.len() * 8 >= len,
            "Bitmask::new: buffer of {} bytes cannot hold {} bits",
            bits.len(),
            len
        );
        let mut mask = Self { bits, len };
        mask.mask_trailing_bits();
        mask
    }

    /// Ensures all unused bits above self.len are zeroed, as Arrow requires.
    #[inline]
    pub fn mask_trailing_bits(&mut self) {
        if self.len == 0 || (self.len & 7) == 0 {
            return;
        }
        let last = (self.len - 1) >> 3;
        let mask = (1u8 << (self.len & 7)) - 1;
        self.bits[last] &= mask;
    }

    /// Create new mask, length = `len`, all bits set if `set` else cleared.
    #[inline]
    pub fn new_set_all(len: usize, set: bool) -> Self {
        let n_bytes = (len + 7) / 8;
        let mut data = Vec64::with_capacity(n_bytes);
        let fill = if set { 0xFF } else { 0 };
        data.resize(n_bytes, fill);
        let mut mask = Self { bits: data, len };
        mask.mask_trailing_bits();
        mask
    }

    /// Empty mask with room for `bits` bits.
    #[inline]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec64::with_capacity((bits + 7) / 8),
            len: 0,
        }
    }

    /// Fallible variant of [`with_capacity`](Self::with_capacity) used by the output builders.
    pub fn try_with_capacity(bits: usize) -> Result<Self, KernelError> {
        let mut out = Self::with_capacity(0);
        out.try_reserve(bits)?;
        Ok(out)
    }

    /// Reserves room for `additional` more bits without reallocating later.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), KernelError> {
        let needed = (self.len + additional + 7) / 8;
        let extra = needed.saturating_sub(self.bits.len());
        self.bits
            .try_reserve(extra)
            .map_err(|e| KernelError::AllocationFailure {
                message: format!("bitmask of {} bits: {e}", self.len + additional),
            })
    }

    /// Construct from a slice of bools (true = set).
    #[inline]
    pub fn from_bools(bits: &[bool]) -> Self {
        let len = bits.len();
        let n_bytes = (len + 7) / 8;
        let mut data = Vec64::with_capacity(n_bytes);
        data.resize(n_bytes, 0);
        for (i, &b) in bits.iter().enumerate() {
            if b {
                data[i >> 3] |= 1u8 << (i & 7);
            }
        }
        Self { bits: data, len }
    }

    /// Returns a ref slice to the raw u8 bytes
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits[..]
    }

    /// Returns the logical length of the bitmask
    ///
    /// *Excludes padding*
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns bit *idx*.
    ///
    /// Panics when `idx >= self.len`.
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        assert!(
            idx < self.len,
            "Bitmask::get out of bounds (idx={idx}, len={})",
            self.len
        );
        unsafe { self.get_unchecked(idx) }
    }

    /// # Safety
    /// `idx` must be inside the physical buffer.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, idx: usize) -> bool {
        let byte = unsafe { *self.bits.get_unchecked(idx >> 3) };
        (byte >> (idx & 7)) & 1 != 0
    }

    /// Set or clear bit at index `i`, growing the mask when `i >= len`.
    #[inline]
    pub fn set(&mut self, i: usize, value: bool) {
        if i >= self.len {
            self.resize(i + 1, false);
        }
        unsafe { self.set_unchecked(i, value) };
    }

    /// Set or clear the bit at index `i` without any bounds or trailing‐bit checks.
    ///
    /// # Safety
    /// - The caller must ensure that `i` is within the existing capacity (i.e. `i < self.bits.len() * 8`).
    /// - The caller is responsible for maintaining any invariants around trailing bits.
    #[inline(always)]
    pub unsafe fn set_unchecked(&mut self, i: usize, value: bool) {
        let byte = unsafe { self.bits.get_unchecked_mut(i >> 3) };
        let bit = 1u8 << (i & 7);
        if value {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }

    /// Resizes mask to new_len. New bits set or cleared per `set`.
    pub fn resize(&mut self, new_len: usize, set: bool) {
        if new_len <= self.len {
            self.bits.truncate((new_len + 7) / 8);
            self.len = new_len;
            self.mask_trailing_bits();
            return;
        }
        let old_len = self.len;
        self.bits.resize((new_len + 7) / 8, 0);
        self.len = new_len;
        if set {
            let mut pos = old_len;
            while pos < new_len {
                let n = (new_len - pos).min(64 - (pos & 63));
                store_bits(&mut self.bits, pos, u64::MAX, n);
                pos += n;
            }
        }
    }

    /// Bulk-append `n` bits, all set or cleared.
    #[inline]
    pub fn push_bits(&mut self, value: bool, n: usize) {
        self.resize(self.len + n, value);
    }

    /// Appends a single bit.
    #[inline]
    pub fn push(&mut self, value: bool) {
        self.push_bits(value, 1);
    }

    /// Appends the `len` bits of a window that may start at any bit offset.
    ///
    /// Copies 64 bits per step.
    pub fn extend_from_window(&mut self, window: BitmaskVT<'_>) {
        let (src, src_off, len) = window;
        debug_assert!(src_off + len <= src.len, "Bitmask::extend_from_window out of bounds");
        let start = self.len;
        self.resize(start + len, false);
        let src_bytes = src.as_bytes();
        let mut done = 0;
        while done < len {
            let n = (len - done).min(64);
            let word = load_bits(src_bytes, src_off + done, n);
            store_bits(&mut self.bits, start + done, word, n);
            done += n;
        }
    }

    /// Copies `[offset, offset + len)` into a fresh, zero-offset mask.
    #[inline]
    pub fn slice_clone(&self, offset: usize, len: usize) -> Self {
        assert!(offset + len <= self.len, "Bitmask::slice_clone out of bounds");
        let mut out = Bitmask::with_capacity(len);
        out.extend_from_window((self, offset, len));
        out
    }

    /// Borrowed window over `[offset, offset + len)`.
    #[inline(always)]
    pub fn window(&self, offset: Offset, len: Length) -> BitmaskVT<'_> {
        assert!(offset + len <= self.len, "Bitmask::window out of bounds");
        (self, offset, len)
    }

    /// Count number of set (1) bits.
    #[inline]
    pub fn count_ones(&self) -> usize {
        count_set_bits((self, 0, self.len))
    }

    /// Count number of cleared (0) bits.
    #[inline]
    pub fn count_zeros(&self) -> usize {
        self.len - self.count_ones()
    }

    /// Returns the number of bits set to false.
    #[inline]
    pub fn null_count(&self) -> usize {
        self.count_zeros()
    }

    /// Returns true if all bits set (i.e. valid for null-mask).
    #[inline]
    pub fn all_set(&self) -> bool {
        self.count_ones() == self.len
    }

    /// Returns true if all bits cleared.
    #[inline]
    pub fn all_unset(&self) -> bool {
        self.count_ones() == 0
    }

    /// Iterates all logical bits.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| unsafe { self.get_unchecked(i) })
    }
}

impl Debug for Bitmask {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Bitmask(len={}, bits=", self.len)?;
        for b in self.iter() {
            f.write_str(if b { "1" } else { "0" })?;
        }
        f.write_str(")")
    }
}

impl Display for Bitmask {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Bitmask [{} bits] (ones: {}, zeros: {})",
            self.len,
            self.count_ones(),
            self.count_zeros()
        )?;

        const MAX_PREVIEW: usize = 64;
        write!(f, "[")?;
        for i in 0..usize::min(self.len, MAX_PREVIEW) {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", if self.get(i) { '1' } else { '0' })?;
        }
        if self.len > MAX_PREVIEW {
            write!(f, " … ({} total)", self.len)?;
        }
        write!(f, "]")
    }
}
