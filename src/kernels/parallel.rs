// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Apache License 2.0.

//! # **Parallel Chunking** - *Row-partitioned kernel execution*
//!
//! Splits a row range into disjoint windows, runs one kernel call per window
//! on the rayon pool and stitches the partial outputs back together.
//!
//! The kernels hold no shared mutable state and only read their inputs, so
//! any number of chunk calls may run concurrently over the same arguments.

use log::debug;
use rayon::prelude::*;

use crate::enums::error::KernelError;
use crate::kernels::builder::ArrayBuilder;
use crate::kernels::conditional::selection::payload_len;
use crate::{Array, Value};

/// Runs `f(offset, len)` over `[0, len)` in windows of `chunk_len` rows and
/// concatenates the results in row order.
///
/// `f` must return exactly `len` rows for its window, typically by slicing
/// every array argument with [`Value::slice`] and calling a kernel. The first
/// error from any chunk is returned and no output is produced.
///
/// ## Example
/// ```rust
/// use mux_kernels::{if_else, par_chunks, Value, Scalar, arr_bool, arr_i64};
///
/// let cond = Value::from(arr_bool![true, false, true, false, true]);
/// let left = Value::from(arr_i64![1, 2, 3, 4, 5]);
/// let right = Value::from(Scalar::from(0i64));
/// let out = par_chunks(5, 2, |off, len| {
///     if_else(&cond.slice(off, len), &left.slice(off, len), &right)
/// })
/// .unwrap();
/// assert_eq!(out, arr_i64![1, 0, 3, 0, 5]);
/// ```
pub fn par_chunks<F>(len: usize, chunk_len: usize, f: F) -> Result<Array, KernelError>
where
    F: Fn(usize, usize) -> Result<Array, KernelError> + Sync,
{
    if chunk_len == 0 {
        return Err(KernelError::InvalidArguments(
            "par_chunks requires a non-zero chunk length".to_string(),
        ));
    }
    if len <= chunk_len {
        return f(0, len);
    }
    let n_chunks = len.div_ceil(chunk_len);
    debug!("par_chunks: {len} rows in {n_chunks} chunks of {chunk_len}");

    let parts: Vec<Array> = (0..n_chunks)
        .into_par_iter()
        .map(|c| {
            let offset = c * chunk_len;
            f(offset, chunk_len.min(len - offset))
        })
        .collect::<Result<_, _>>()?;

    concat(&parts, len)
}

/// Concatenates same-typed arrays through one pre-sized builder.
fn concat(parts: &[Array], len: usize) -> Result<Array, KernelError> {
    let Some(first) = parts.first() else {
        return Ok(Array::Null);
    };
    let hint = parts
        .iter()
        .map(|p| payload_len(&Value::from(p.clone()), 0, p.len()))
        .fold(0usize, usize::saturating_add);
    let mut builder = ArrayBuilder::try_new(&first.arrow_type(), len, hint)?;
    for part in parts {
        builder.extend_from_array(part, 0, part.len())?;
    }
    if builder.len() != len {
        return Err(KernelError::LengthMismatch {
            kernel: "par_chunks",
            expected: len,
            found: builder.len(),
        });
    }
    Ok(builder.finish())
}
