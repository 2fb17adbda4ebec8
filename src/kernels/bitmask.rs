// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Apache License 2.0.

//! # **Validity Bitmap Kernels** - *Word-Level Bitmask Operations*
//!
//! All bit-offset arithmetic in the crate lives here, so kernels reason only in
//! logical row indices.
//!
//! ## Overview
//! - `load_bits` / `store_bits`: read or write up to 64 bits at any bit position.
//! - `combine_validity`: AND across several possibly misaligned validity windows.
//! - `invert`: bitwise NOT of a window into a fresh mask.
//! - `find_runs`: maximal runs of identical condition state (true / false / null).
//!
//! ## Arrow Compatibility
//! - **LSB bit ordering**: Bit 0 is least significant in each byte
//! - **Window support**: every input is a `BitmaskVT` `(mask, offset, len)` tuple and
//!   the offset may be any bit, e.g. after slicing at element 99
//! - **Trailing bit masking**: outputs never carry set bits past their length

use crate::{Bitmask, BitmaskVT};

/// All-ones word for the low `n` bits.
#[inline(always)]
pub fn low_mask(n: usize) -> u64 {
    if n >= 64 { u64::MAX } else { (1u64 << n) - 1 }
}

/// Reads `n <= 64` bits starting at `bit_pos`, returned in the low bits of a word.
///
/// Bytes past the end of `bytes` read as zero.
#[inline]
pub fn load_bits(bytes: &[u8], bit_pos: usize, n: usize) -> u64 {
    debug_assert!(n <= 64);
    if n == 0 {
        return 0;
    }
    let byte = bit_pos >> 3;
    let shift = bit_pos & 7;
    if shift == 0 && byte + 8 <= bytes.len() {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes[byte..byte + 8]);
        return u64::from_le_bytes(raw) & low_mask(n);
    }
    let need = (shift + n + 7) / 8;
    let mut acc: u128 = 0;
    for i in 0..need {
        if let Some(&b) = bytes.get(byte + i) {
            acc |= (b as u128) << (8 * i);
        }
    }
    ((acc >> shift) as u64) & low_mask(n)
}

/// ORs the low `n <= 64` bits of `word` into `bytes` starting at `bit_pos`.
///
/// The destination bits must be zero beforehand, as they are for freshly grown masks.
#[inline]
pub fn store_bits(bytes: &mut [u8], bit_pos: usize, word: u64, n: usize) {
    debug_assert!(n <= 64);
    let mut bits = word & low_mask(n);
    let mut pos = bit_pos;
    let mut remaining = n;
    if pos & 7 == 0 && remaining == 64 {
        let byte = pos >> 3;
        for (i, b) in bits.to_le_bytes().iter().enumerate() {
            bytes[byte + i] |= *b;
        }
        return;
    }
    while remaining > 0 {
        let shift = pos & 7;
        let take = (8 - shift).min(remaining);
        let chunk = (bits & low_mask(take)) as u8;
        bytes[pos >> 3] |= chunk << shift;
        bits >>= take;
        pos += take;
        remaining -= take;
    }
}

/// Number of set bits in a window.
pub fn count_set_bits(window: BitmaskVT<'_>) -> usize {
    let (mask, offset, len) = window;
    let bytes = mask.as_bytes();
    let mut count = 0usize;
    let mut pos = 0;
    while pos < len {
        let n = (len - pos).min(64);
        count += load_bits(bytes, offset + pos, n).count_ones() as usize;
        pos += n;
    }
    count
}

/// Bitwise AND across validity windows of length `len`.
///
/// `None` entries mean "all valid" and do not participate. When every entry is
/// `None` the result is `None` and nothing is allocated.
pub fn combine_validity(masks: &[Option<BitmaskVT<'_>>], len: usize) -> Option<Bitmask> {
    let present: Vec<BitmaskVT<'_>> = masks.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    for (_, off, l) in &present {
        debug_assert!(*l >= len, "combine_validity: window at {off} shorter than {len}");
    }
    let mut out = Bitmask::new_set_all(len, false);
    let mut pos = 0;
    while pos < len {
        let n = (len - pos).min(64);
        let mut word = low_mask(n);
        for (mask, off, _) in &present {
            word &= load_bits(mask.as_bytes(), off + pos, n);
            if word == 0 {
                break;
            }
        }
        store_bits(&mut out.bits, pos, word, n);
        pos += n;
    }
    Some(out)
}

/// Bits that are set and valid: `values AND validity`.
///
/// This is the "condition is true" mask used by the multiplexing kernels,
/// where a null condition counts as not matching.
pub fn truthy_bits(values: BitmaskVT<'_>, validity: Option<BitmaskVT<'_>>) -> Bitmask {
    let len = values.2;
    match combine_validity(&[Some(values), validity], len) {
        Some(mask) => mask,
        None => Bitmask::new_set_all(len, false),
    }
}

/// Bitwise NOT of a window into a fresh zero-offset mask.
pub fn invert(window: BitmaskVT<'_>) -> Bitmask {
    let (mask, offset, len) = window;
    let mut out = Bitmask::new_set_all(len, false);
    let mut pos = 0;
    while pos < len {
        let n = (len - pos).min(64);
        let word = !load_bits(mask.as_bytes(), offset + pos, n);
        store_bits(&mut out.bits, pos, word, n);
        pos += n;
    }
    out
}

/// Outcome shared by every row of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunValue {
    True,
    False,
    Null,
}

/// Maximal span `[start, start + len)` of rows with one condition outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub len: usize,
    pub value: RunValue,
}

impl Run {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[inline(always)]
fn push_state(runs: &mut Vec<Run>, current: &mut Option<(usize, RunValue)>, at: usize, state: RunValue) {
    match *current {
        Some((_, value)) if value == state => {}
        Some((start, value)) => {
            runs.push(Run { start, len: at - start, value });
            *current = Some((at, state));
        }
        None => *current = Some((at, state)),
    }
}

/// Splits a boolean column into maximal runs of `True`, `False` and `Null`.
///
/// `values` and `validity` are windows of equal length and may sit at any bit
/// offset. Homogeneous 64-row chunks are consumed in one step, so a column made
/// of a few long blocks costs a handful of word loads.
///
/// The runs are ordered, non-overlapping, and their lengths sum to the window length.
pub fn find_runs(values: BitmaskVT<'_>, validity: Option<BitmaskVT<'_>>) -> Vec<Run> {
    let (vmask, voff, len) = values;
    let vbytes = vmask.as_bytes();
    let valid = validity.map(|(m, off, l)| {
        debug_assert!(l >= len, "find_runs: validity shorter than values");
        (m.as_bytes(), off)
    });

    let mut runs = Vec::new();
    let mut current: Option<(usize, RunValue)> = None;
    let mut pos = 0;
    while pos < len {
        let n = (len - pos).min(64);
        let full = low_mask(n);
        let v = load_bits(vbytes, voff + pos, n);
        let ok = match valid {
            Some((bytes, off)) => load_bits(bytes, off + pos, n),
            None => full,
        };

        let uniform = if ok == 0 {
            Some(RunValue::Null)
        } else if ok == full && v == full {
            Some(RunValue::True)
        } else if ok == full && v == 0 {
            Some(RunValue::False)
        } else {
            None
        };

        match uniform {
            Some(state) => push_state(&mut runs, &mut current, pos, state),
            None => {
                for i in 0..n {
                    let state = if (ok >> i) & 1 == 0 {
                        RunValue::Null
                    } else if (v >> i) & 1 == 1 {
                        RunValue::True
                    } else {
                        RunValue::False
                    };
                    push_state(&mut runs, &mut current, pos + i, state);
                }
            }
        }
        pos += n;
    }
    if let Some((start, value)) = current {
        runs.push(Run { start, len: len - start, value });
    }
    runs
}

/// Runs of a two-valued mask: set bits become `True`, cleared bits `False`.
#[inline]
pub fn find_bit_runs(bits: BitmaskVT<'_>) -> Vec<Run> {
    find_runs(bits, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bm(bools: &[bool]) -> Bitmask {
        Bitmask::from_bools(bools)
    }

    #[test]
    fn test_load_store_roundtrip_misaligned() {
        let src: Vec<bool> = (0..200).map(|i| (i * 7) % 5 < 2).collect();
        let mask = bm(&src);
        for off in [0usize, 1, 7, 8, 63, 99] {
            let word = load_bits(mask.as_bytes(), off, 64);
            for i in 0..64 {
                assert_eq!((word >> i) & 1 == 1, src[off + i], "off {off} bit {i}");
            }
        }
        let mut out = vec![0u8; 16];
        store_bits(&mut out, 5, 0b1011, 4);
        assert_eq!(out[0], 0b0110_0000);
        assert_eq!(out[1], 0b0000_0001);
    }

    #[test]
    fn test_combine_validity_all_valid_is_none() {
        assert!(combine_validity(&[None, None], 10).is_none());
    }

    #[test]
    fn test_combine_validity_misaligned() {
        let a: Vec<bool> = (0..130).map(|i| i % 2 == 0).collect();
        let b: Vec<bool> = (0..140).map(|i| i % 3 != 0).collect();
        let ma = bm(&a);
        let mb = bm(&b);
        let out = combine_validity(&[Some((&ma, 3, 100)), None, Some((&mb, 11, 100))], 100).unwrap();
        assert_eq!(out.len(), 100);
        for i in 0..100 {
            assert_eq!(out.get(i), a[3 + i] && b[11 + i], "row {i}");
        }
    }

    #[test]
    fn test_invert_window() {
        let m = bm(&[true, false, false, true, true]);
        let inv = invert((&m, 1, 3));
        assert_eq!(inv.iter().collect::<Vec<_>>(), vec![true, true, false]);
        assert_eq!(inv.bits[0], 0b0000_0011);
    }

    #[test]
    fn test_find_runs_contiguous_blocks() {
        let mut bools = vec![true; 500];
        bools.extend(vec![false; 524]);
        let m = bm(&bools);
        let runs = find_runs((&m, 99, 925), None);
        assert_eq!(
            runs,
            vec![
                Run { start: 0, len: 401, value: RunValue::True },
                Run { start: 401, len: 524, value: RunValue::False },
            ]
        );
    }

    #[test]
    fn test_find_runs_with_nulls_cover_range() {
        let values = bm(&[true, true, false, false, true, false, true, true, true]);
        let validity = bm(&[true, true, true, false, false, true, true, true, true]);
        let runs = find_runs((&values, 0, 9), Some((&validity, 0, 9)));
        assert_eq!(
            runs,
            vec![
                Run { start: 0, len: 2, value: RunValue::True },
                Run { start: 2, len: 1, value: RunValue::False },
                Run { start: 3, len: 2, value: RunValue::Null },
                Run { start: 5, len: 1, value: RunValue::False },
                Run { start: 6, len: 3, value: RunValue::True },
            ]
        );
        assert_eq!(runs.iter().map(|r| r.len).sum::<usize>(), 9);
    }

    #[test]
    fn test_find_runs_empty() {
        let m = bm(&[]);
        assert!(find_runs((&m, 0, 0), None).is_empty());
    }

    #[test]
    fn test_truthy_bits_treats_null_as_false() {
        let values = bm(&[true, true, false]);
        let validity = bm(&[true, false, true]);
        let t = truthy_bits((&values, 0, 3), Some((&validity, 0, 3)));
        assert_eq!(t.iter().collect::<Vec<_>>(), vec![true, false, false]);
    }

    #[test]
    fn test_count_set_bits_window() {
        let m = bm(&(0..300).map(|i| i % 4 == 0).collect::<Vec<_>>());
        assert_eq!(count_set_bits((&m, 0, 300)), 75);
        assert_eq!(count_set_bits((&m, 1, 3)), 0);
        assert_eq!(count_set_bits((&m, 99, 101)), 25);
    }
}
