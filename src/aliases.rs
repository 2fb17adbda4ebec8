use crate::Bitmask;

// ----------------- Windows --------------------------------
//
// Borrowed, zero-copy windows that hold onto the parameters
// needed to address a slice of a parent buffer.
//
// -----------------------------------------------------------------

/// The window offset lower bound.
/// Set to `0` for the whole set.
pub type Offset = usize;

/// The logical length of the window.
/// Set to `arr.len()` for the whole set.
pub type Length = usize;

/// Borrowed bitmask window: `(mask, bit offset, length in bits)`.
///
/// The offset may be any bit; see [`crate::kernels::bitmask`] for the
/// word-level helpers that consume it.
pub type BitmaskVT<'a> = (&'a Bitmask, Offset, Length);
