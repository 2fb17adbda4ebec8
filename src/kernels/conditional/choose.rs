// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Apache License 2.0.

//! # **Choose Kernel** - *Index-driven selection*
//!
//! Row `i` of the output is `choices[indices[i]][i]`, null where the index is
//! null. Indices may be any integer type. A single out-of-range index fails
//! the whole call, and that check completes before any output is reserved.
//!
//! Consecutive equal indices are batched into spans so that sorted or
//! clustered index columns still take the bulk-copy path.

use log::debug;
use num_traits::ToPrimitive;

use crate::enums::error::{KernelError, type_mismatch};
use crate::kernels::conditional::args::{check_int_selector, index_at, resolve_len, unify_type};
use crate::kernels::conditional::selection::{
    SelectionPath, Span, build_rows, build_spans, push_span,
};
use crate::traits::type_unions::Integer;
use crate::{Array, Bitmask, NumericArray, Value};

const KERNEL: &str = "choose";

#[inline]
fn checked_index(row: usize, index: i64, n_choices: usize) -> Result<usize, KernelError> {
    match usize::try_from(index) {
        Ok(k) if k < n_choices => Ok(k),
        _ => Err(KernelError::IndexOutOfBounds { row, index, n_choices }),
    }
}

/// Validates one window of an integer index column and groups equal
/// consecutive indices.
fn index_spans<T: Integer>(
    data: &[T],
    mask: Option<&Bitmask>,
    offset: usize,
    len: usize,
    n_choices: usize,
) -> Result<Vec<Span>, KernelError> {
    let mut spans = Vec::new();
    for i in 0..len {
        let row = offset + i;
        let source = match mask {
            Some(m) if !m.get(row) => None,
            _ => {
                let index = ToPrimitive::to_i64(&data[row]).unwrap_or(i64::MAX);
                Some(checked_index(i, index, n_choices)?)
            }
        };
        push_span(&mut spans, i, 1, source);
    }
    Ok(spans)
}

/// Span plan for `indices` over `len` rows, failing on the first bad index.
fn plan(indices: &Value, len: usize, n_choices: usize) -> Result<Vec<Span>, KernelError> {
    let view = match indices {
        // A scalar index is validated at any length, including zero rows.
        Value::Scalar(s) => {
            let source = s.as_index().map(|ix| checked_index(0, ix, n_choices)).transpose()?;
            return Ok(if len == 0 { Vec::new() } else { vec![Span { start: 0, len, source }] });
        }
        Value::Array(view) => view,
    };
    if len == 0 {
        return Ok(Vec::new());
    }
    let off = view.offset;
    match &view.array {
        Array::NumericArray(NumericArray::Int32(a)) => {
            index_spans(&a.data, a.null_mask.as_ref(), off, len, n_choices)
        }
        Array::NumericArray(NumericArray::Int64(a)) => {
            index_spans(&a.data, a.null_mask.as_ref(), off, len, n_choices)
        }
        Array::NumericArray(NumericArray::UInt32(a)) => {
            index_spans(&a.data, a.null_mask.as_ref(), off, len, n_choices)
        }
        Array::NumericArray(NumericArray::UInt64(a)) => {
            index_spans(&a.data, a.null_mask.as_ref(), off, len, n_choices)
        }
        other => Err(type_mismatch(KERNEL, "an integer type", other.arrow_type())),
    }
}

/// Selects `choices[indices[i]][i]` per row.
///
/// `indices` is an integer array or scalar, `choices` a non-empty list of
/// same-typed values. Scalars broadcast.
///
/// # Errors
/// - `IndexOutOfBounds` for the first non-null index outside `[0, choices.len())`.
/// - `InvalidArguments` when `choices` is empty.
/// - `TypeMismatch` and `LengthMismatch` as for the other kernels.
///
/// ## Example
/// ```rust
/// use mux_kernels::{choose, Value, arr_i32, arr_i64, arr_i64_opt};
///
/// let a = Value::from(arr_i64_opt![Some(10), None, None]);
/// let b = Value::from(arr_i64_opt![None, Some(20), None]);
/// let c = Value::from(arr_i64_opt![None, None, Some(30)]);
/// let out = choose(&Value::from(arr_i32![0, 1, 2]), &[a, b, c]).unwrap();
/// assert_eq!(out, arr_i64![10, 20, 30]);
/// ```
pub fn choose(indices: &Value, choices: &[Value]) -> Result<Array, KernelError> {
    choose_with(indices, choices, SelectionPath::Auto)
}

/// [`choose`] with an explicit materialisation strategy.
pub fn choose_with(
    indices: &Value,
    choices: &[Value],
    path: SelectionPath,
) -> Result<Array, KernelError> {
    if choices.is_empty() {
        return Err(KernelError::InvalidArguments(
            "choose requires at least one choice".to_string(),
        ));
    }
    check_int_selector(KERNEL, indices)?;
    let dtype = unify_type(KERNEL, choices)?;
    let len = resolve_len(KERNEL, std::iter::once(indices).chain(choices.iter()))?;

    let spans = plan(indices, len, choices.len())?;
    let all_scalar = choices.iter().all(Value::is_scalar);
    let runs_path = path.use_runs(spans.len(), len, all_scalar);
    debug!(
        "{KERNEL}: {} index groups over {len} rows from {} choices, path={path:?}, runs={runs_path}",
        spans.len(),
        choices.len()
    );
    if runs_path {
        build_spans(&dtype, len, &spans, choices)
    } else {
        // indices are validated by `plan`
        build_rows(&dtype, len, choices, |i| {
            index_at(indices, i).map(|ix| ix as usize)
        })
    }
}
