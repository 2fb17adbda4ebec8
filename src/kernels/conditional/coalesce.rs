// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Apache License 2.0.

//! # **Coalesce Kernel** - *First non-null selection*
//!
//! Row `i` of the output is the first `args[k][i]` that is not null, or null
//! when every argument is null at that row.
//!
//! Internally this is a case-when over argument validity. Before any run
//! detection the argument list is pruned: null scalars and all-null arrays
//! can never be selected and are dropped, and a valid scalar or a null-free
//! array satisfies every row, so nothing after it is inspected.

use log::debug;

use crate::enums::error::KernelError;
use crate::kernels::conditional::args::{resolve_len, unify_type};
use crate::kernels::conditional::selection::{
    SelectionPath, build_rows, build_spans, merge_first_true, validity_runs,
};
use crate::{Array, Value};

const KERNEL: &str = "coalesce";

/// Arguments that can still contribute a value, in order.
fn prune(args: &[Value]) -> Vec<&Value> {
    let mut kept = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Value::Scalar(s) if s.is_null() => continue,
            Value::Scalar(_) => {
                kept.push(arg);
                break;
            }
            Value::Array(view) => {
                let nulls = view.null_count();
                if nulls == 0 {
                    kept.push(arg);
                    break;
                }
                if nulls < view.len() {
                    kept.push(arg);
                }
            }
        }
    }
    kept
}

/// Returns, per row, the first non-null value among `args`.
///
/// Arguments may mix arrays and scalars of one type. Returns
/// `InvalidArguments` for an empty argument list, `TypeMismatch` and
/// `LengthMismatch` as the other kernels do.
///
/// ## Example
/// ```rust
/// use mux_kernels::{coalesce, Value, Scalar, arr_i64, arr_i64_opt};
///
/// let a = Value::from(arr_i64_opt![None, Some(2), None]);
/// let b = Value::from(arr_i64_opt![Some(1), Some(9), None]);
/// let c = Value::from(Scalar::from(3i64));
/// assert_eq!(coalesce(&[a, b, c]).unwrap(), arr_i64![1, 2, 3]);
/// ```
pub fn coalesce(args: &[Value]) -> Result<Array, KernelError> {
    coalesce_with(args, SelectionPath::Auto)
}

/// [`coalesce`] with an explicit materialisation strategy.
pub fn coalesce_with(args: &[Value], path: SelectionPath) -> Result<Array, KernelError> {
    if args.is_empty() {
        return Err(KernelError::InvalidArguments(
            "coalesce requires at least one argument".to_string(),
        ));
    }
    let dtype = unify_type(KERNEL, args)?;
    let len = resolve_len(KERNEL, args)?;

    let kept: Vec<Value> = prune(args).into_iter().cloned().collect();
    debug!("{KERNEL}: kept {} of {} arguments over {len} rows", kept.len(), args.len());

    let first_valid = |i: usize| kept.iter().position(|v| !v.is_null_at(i));
    if path == SelectionPath::RowWise {
        return build_rows(&dtype, len, &kept, first_valid);
    }

    let runs: Vec<_> = kept.iter().map(|v| validity_runs(v, len)).collect();
    let spans = merge_first_true(&runs, len, None);
    let all_scalar = kept.iter().all(Value::is_scalar);
    let runs_path = path.use_runs(spans.len(), len, all_scalar);
    debug!(
        "{KERNEL}: {} segments over {len} rows, path={path:?}, runs={runs_path}",
        spans.len()
    );
    if runs_path {
        build_spans(&dtype, len, &spans, &kept)
    } else {
        build_rows(&dtype, len, &kept, first_valid)
    }
}
