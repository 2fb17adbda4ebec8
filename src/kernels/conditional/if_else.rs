// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Apache License 2.0.

//! # **IfElse Kernel** - *Binary conditional selection*
//!
//! Row `i` of the output is `left[i]` when `cond[i]` is true, `right[i]` when
//! it is false, and null when the condition itself is null. The selected
//! source's own nulls carry through.
//!
//! The condition is split into maximal true/false/null runs; each run becomes
//! one span copy from `left`, one from `right`, or one null fill. A condition
//! made of two blocks costs two bulk copies regardless of length.

use log::debug;

use crate::enums::error::KernelError;
use crate::kernels::bitmask::RunValue;
use crate::kernels::conditional::args::{
    bool_at, check_bool_selector, resolve_len, unify_type,
};
use crate::kernels::conditional::selection::{
    SelectionPath, Span, build_rows, build_spans, condition_runs, push_span,
};
use crate::{Array, Value};

const KERNEL: &str = "if_else";

#[inline]
fn branch(value: Option<bool>) -> Option<usize> {
    match value {
        Some(true) => Some(0),
        Some(false) => Some(1),
        None => None,
    }
}

/// Selects `left[i]` or `right[i]` per row according to `cond[i]`.
///
/// Any argument may be a scalar, broadcast to the common length. Returns
/// `TypeMismatch` if `left` and `right` do not share a type or `cond` is not
/// boolean, and `LengthMismatch` if array arguments disagree in length.
///
/// ## Example
/// ```rust
/// use mux_kernels::{if_else, Value, Scalar, arr_bool_opt, arr_i64, arr_i64_opt};
///
/// let cond = Value::from(arr_bool_opt![Some(true), Some(false), None]);
/// let out = if_else(&cond, &Value::from(arr_i64![1, 2, 3]), &Value::from(Scalar::from(0i64))).unwrap();
/// assert_eq!(out, arr_i64_opt![Some(1), Some(0), None]);
/// ```
pub fn if_else(cond: &Value, left: &Value, right: &Value) -> Result<Array, KernelError> {
    if_else_with(cond, left, right, SelectionPath::Auto)
}

/// [`if_else`] with an explicit materialisation strategy.
pub fn if_else_with(
    cond: &Value,
    left: &Value,
    right: &Value,
    path: SelectionPath,
) -> Result<Array, KernelError> {
    check_bool_selector(KERNEL, cond)?;
    let values = [left.clone(), right.clone()];
    let dtype = unify_type(KERNEL, &values)?;
    let len = resolve_len(KERNEL, [cond, left, right])?;

    let spans: Vec<Span> = match cond {
        Value::Scalar(s) => {
            debug!("{KERNEL}: scalar condition {s}, single fill of {len} rows");
            let mut spans = Vec::with_capacity(1);
            push_span(&mut spans, 0, len, branch(s.as_bool()));
            return build_spans(&dtype, len, &spans, &values);
        }
        Value::Array(_) => {
            let runs = condition_runs(cond, len);
            let mut spans = Vec::with_capacity(runs.len());
            for run in &runs {
                let source = match run.value {
                    RunValue::True => Some(0),
                    RunValue::False => Some(1),
                    RunValue::Null => None,
                };
                push_span(&mut spans, run.start, run.len, source);
            }
            spans
        }
    };

    let all_scalar = left.is_scalar() && right.is_scalar();
    let runs_path = path.use_runs(spans.len(), len, all_scalar);
    debug!(
        "{KERNEL}: {} spans over {len} rows, path={path:?}, runs={runs_path}",
        spans.len()
    );
    if runs_path {
        build_spans(&dtype, len, &spans, &values)
    } else {
        build_rows(&dtype, len, &values, |i| branch(bool_at(cond, i)))
    }
}
