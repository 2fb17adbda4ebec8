//! # **ArrayView Module** - *Windowed View over an Array*
//!
//! `ArrayV` is a **logical, read-only, zero-copy view** into a contiguous window
//! `[offset .. offset + len)` of any [`Array`] variant.
//!
//! ## Behaviour
//! - All indices are **relative** to the view's start.
//! - Internally retains an `Arc` reference to the parent array's buffers.
//! - Windowing and slicing are O(1) operations (pointer + metadata updates only).
//! - Cached null counts are stored in an `OnceLock` for thread-safe lazy initialization.
//!
//! ## Invariants
//! - `offset + len <= array.len()`
//! - `len` reflects the **logical** number of elements in the view.

use std::fmt::{self, Debug, Display, Formatter};
use std::sync::OnceLock;

use crate::config::MAX_PREVIEW;
use crate::enums::arrow_type::ArrowType;
use crate::enums::scalar::Scalar;
use crate::kernels::bitmask::count_set_bits;
use crate::{Array, BitmaskVT};

/// # ArrayView
///
/// Logical, windowed view over an `Array`.
///
/// ## Behaviour
/// - Indices are always relative to the window.
/// - Windowing uses an arc clone.
/// - Null count is computed once (on demand or at creation) and cached for subsequent use.
///
/// ## Notes
/// - Use [`slice`](Self::slice) to derive smaller views without data copy.
/// - Use [`to_array`](Self::to_array) to materialise as an owned array.
#[derive(Clone)]
pub struct ArrayV {
    pub array: Array, // contains Arc<inner>
    pub offset: usize,
    len: usize,
    null_count: OnceLock<usize>,
}

impl ArrayV {
    /// Construct a windowed view of `array[offset..offset+len)`.
    #[inline]
    pub fn new(array: Array, offset: usize, len: usize) -> Self {
        assert!(
            offset + len <= array.len(),
            "ArrayView: window out of bounds (offset + len = {}, array.len = {})",
            offset + len,
            array.len()
        );
        Self {
            array,
            offset,
            len,
            null_count: OnceLock::new(),
        }
    }

    /// Return the logical length of the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the view is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the exclusive end index of the window (relative to parent array).
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Logical type of the parent array.
    #[inline]
    pub fn arrow_type(&self) -> ArrowType {
        self.array.arrow_type()
    }

    /// Returns a new window view into a sub-range of this view.
    #[inline]
    pub fn slice(&self, offset: usize, len: usize) -> Self {
        assert!(offset + len <= self.len, "ArrayView::slice: out of bounds");
        Self {
            array: self.array.clone(), // arc clone
            offset: self.offset + offset,
            len,
            null_count: OnceLock::new(),
        }
    }

    /// Materialise a deep copy as an owned `Array` for the window.
    #[inline]
    pub fn to_array(&self) -> Array {
        self.array.slice_clone(self.offset, self.len)
    }

    /// Returns true if entry `i` of the window is null.
    #[inline]
    pub fn is_null(&self, i: usize) -> bool {
        assert!(i < self.len, "ArrayView::is_null: out of bounds");
        self.array.is_null(self.offset + i)
    }

    /// Entry `i` of the window as a scalar.
    #[inline]
    pub fn get_scalar(&self, i: usize) -> Scalar {
        assert!(i < self.len, "ArrayView::get_scalar: out of bounds");
        self.array.get_scalar(self.offset + i)
    }

    /// Returns the null count in the window, caching the result after first calculation.
    #[inline]
    pub fn null_count(&self) -> usize {
        *self.null_count.get_or_init(|| match self.null_mask_view() {
            Some(window) => self.len - count_set_bits(window),
            None => 0,
        })
    }

    /// Returns a windowed view over the underlying null mask, if any.
    #[inline]
    pub fn null_mask_view(&self) -> Option<BitmaskVT<'_>> {
        self.array.null_mask().map(|mask| (mask, self.offset, self.len))
    }
}

/// Array -> ArrayView
///
/// Uses Offset 0 and length self.len()
impl From<Array> for ArrayV {
    fn from(array: Array) -> Self {
        let len = array.len();
        ArrayV::new(array, 0, len)
    }
}

/// Views compare their materialised windows, ignoring the parent buffer and
/// cache state. A null-free window equals an array with no null mask.
impl PartialEq for ArrayV {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.to_array() == other.to_array()
    }
}

impl Debug for ArrayV {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayView")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .field("array", &self.array)
            .field("cached_null_count", &self.null_count.get())
            .finish()
    }
}

impl Display for ArrayV {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let head_len = self.len.min(MAX_PREVIEW);
        writeln!(
            f,
            "ArrayView [{} values] (offset: {}, nulls: {})",
            self.len,
            self.offset,
            self.null_count()
        )?;
        let sliced_array = self.array.slice_clone(self.offset, head_len);
        for line in format!("{}", sliced_array).lines() {
            writeln!(f, "  {line}")?;
        }
        if self.len > MAX_PREVIEW {
            writeln!(f, "  ... ({} more rows)", self.len - MAX_PREVIEW)?;
        }
        Ok(())
    }
}
