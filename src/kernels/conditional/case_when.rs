// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Apache License 2.0.

//! # **CaseWhen Kernel** - *Ordered N-way conditional selection*
//!
//! For each row the conditions are scanned in order and the first one that is
//! true selects the value at the same position. A null condition counts as not
//! matching and the scan moves on. When nothing matches, the optional trailing
//! default is used, otherwise the row is null.
//!
//! The run path splits every condition into true/false/null runs and merges
//! them into segments with a single winning source, so long blocks of
//! uniform conditions cost one span copy each.

use log::debug;

use crate::enums::error::KernelError;
use crate::kernels::conditional::args::{bool_at, check_bool_selector, resolve_len, unify_type};
use crate::kernels::conditional::selection::{
    SelectionPath, build_rows, build_spans, condition_runs, merge_first_true,
};
use crate::{Array, Value};

const KERNEL: &str = "case_when";

/// Selects `values[k][i]` for the first `k` where `conditions[k][i]` is true.
///
/// `values` holds one entry per condition plus an optional trailing default.
/// Any argument may be a scalar, broadcast to the common length.
///
/// # Errors
/// - `InvalidArguments` with no conditions, or when `values` does not have
///   `conditions.len()` or `conditions.len() + 1` entries.
/// - `TypeMismatch` for a non-boolean condition or values of differing types.
/// - `LengthMismatch` when array arguments disagree in length.
///
/// ## Example
/// ```rust
/// use mux_kernels::{case_when, Value, Scalar, arr_bool_opt, arr_i64, arr_i64_opt};
///
/// let c0 = Value::from(arr_bool_opt![Some(true), None, Some(false)]);
/// let c1 = Value::from(arr_bool_opt![Some(true), Some(true), Some(false)]);
/// let out = case_when(
///     &[c0, c1],
///     &[Value::from(arr_i64![1, 2, 3]), Value::from(arr_i64![10, 20, 30])],
/// )
/// .unwrap();
/// assert_eq!(out, arr_i64_opt![Some(1), Some(20), None]);
/// ```
pub fn case_when(conditions: &[Value], values: &[Value]) -> Result<Array, KernelError> {
    case_when_with(conditions, values, SelectionPath::Auto)
}

/// [`case_when`] with an explicit materialisation strategy.
pub fn case_when_with(
    conditions: &[Value],
    values: &[Value],
    path: SelectionPath,
) -> Result<Array, KernelError> {
    let n = conditions.len();
    if n == 0 {
        return Err(KernelError::InvalidArguments(
            "case_when requires at least one condition".to_string(),
        ));
    }
    if values.len() != n && values.len() != n + 1 {
        return Err(KernelError::InvalidArguments(format!(
            "case_when expects {} or {} values for {} conditions, got {}",
            n,
            n + 1,
            n,
            values.len()
        )));
    }
    for cond in conditions {
        check_bool_selector(KERNEL, cond)?;
    }
    let dtype = unify_type(KERNEL, values)?;
    let len = resolve_len(KERNEL, conditions.iter().chain(values.iter()))?;
    let fallback = (values.len() > n).then_some(n);

    let first_true = |i: usize| {
        conditions
            .iter()
            .position(|c| bool_at(c, i) == Some(true))
            .or(fallback)
    };

    if path == SelectionPath::RowWise {
        debug!("{KERNEL}: row-wise over {len} rows, {n} conditions");
        return build_rows(&dtype, len, values, first_true);
    }

    let runs: Vec<_> = conditions.iter().map(|c| condition_runs(c, len)).collect();
    let spans = merge_first_true(&runs, len, fallback);
    let all_scalar = values.iter().all(Value::is_scalar);
    let runs_path = path.use_runs(spans.len(), len, all_scalar);
    debug!(
        "{KERNEL}: {} segments from {} condition runs over {len} rows, path={path:?}, runs={runs_path}",
        spans.len(),
        runs.iter().map(Vec::len).sum::<usize>()
    );
    if runs_path {
        build_spans(&dtype, len, &spans, values)
    } else {
        build_rows(&dtype, len, values, first_true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::arrow_type::ArrowType;
    use crate::{
        BooleanArray, IntegerArray, ListArray, MaskedArray, Scalar, arr_bool, arr_bool_opt, arr_i32,
        arr_i64, arr_i64_opt, arr_str32, arr_str32_opt,
    };

    fn all_paths(conditions: &[Value], values: &[Value]) -> Array {
        let auto = case_when(conditions, values).unwrap();
        let runs = case_when_with(conditions, values, SelectionPath::Runs).unwrap();
        let rows = case_when_with(conditions, values, SelectionPath::RowWise).unwrap();
        assert_eq!(auto, runs);
        assert_eq!(runs, rows);
        auto
    }

    #[test]
    fn test_case_when_first_true_wins() {
        let c0 = Value::from(arr_bool![true, false, false, true]);
        let c1 = Value::from(arr_bool![true, true, false, false]);
        let v0 = Value::from(arr_i64![1, 2, 3, 4]);
        let v1 = Value::from(arr_i64![10, 20, 30, 40]);
        let out = all_paths(&[c0, c1], &[v0, v1]);
        assert_eq!(out, arr_i64_opt![Some(1), Some(20), None, Some(4)]);
    }

    #[test]
    fn test_case_when_null_condition_continues_scan() {
        let c0 = Value::from(arr_bool_opt![None, None, Some(true)]);
        let c1 = Value::from(arr_bool_opt![Some(true), None, Some(true)]);
        let values = [
            Value::from(arr_str32!["a0", "a1", "a2"]),
            Value::from(arr_str32!["b0", "b1", "b2"]),
            Value::from(Scalar::from("dflt")),
        ];
        let out = all_paths(&[c0, c1], &values);
        assert_eq!(out, arr_str32_opt![Some("b0"), Some("dflt"), Some("a2")]);
    }

    #[test]
    fn test_case_when_default_null_propagates() {
        let c0 = Value::from(arr_bool![false, false, true]);
        let values = [
            Value::from(arr_i64![1, 2, 3]),
            Value::from(arr_i64_opt![Some(7), None, Some(9)]),
        ];
        let out = all_paths(&[c0], &values);
        assert_eq!(out, arr_i64_opt![Some(7), None, Some(3)]);
        assert_eq!(out.null_count(), 1);
    }

    #[test]
    fn test_case_when_short_circuit_equals_nested_if_else() {
        // case_when([c0, c1], [v0, v1, d]) == if_else(c0, v0, if_else(c1, v1, d)) with
        // null conditions treated as false.
        let n = 257;
        let b0: Vec<Option<bool>> = (0..n).map(|i| if i % 7 == 0 { None } else { Some(i % 5 < 2) }).collect();
        let b1: Vec<Option<bool>> = (0..n).map(|i| if i % 13 == 0 { None } else { Some(i % 3 == 0) }).collect();
        let v0: Vec<i32> = (0..n as i32).collect();
        let v1: Vec<i32> = (0..n as i32).map(|x| x * 100).collect();
        let conds = [
            Value::from(Array::from_bool(BooleanArray::from_options(&b0))),
            Value::from(Array::from_bool(BooleanArray::from_options(&b1))),
        ];
        let values = [
            Value::from(Array::from_int32(IntegerArray::from_slice(&v0))),
            Value::from(Array::from_int32(IntegerArray::from_slice(&v1))),
            Value::from(Scalar::from(-1i32)),
        ];
        let out = all_paths(&conds, &values);
        for i in 0..n {
            let expected = if b0[i] == Some(true) {
                v0[i]
            } else if b1[i] == Some(true) {
                v1[i]
            } else {
                -1
            };
            assert_eq!(out.num().i32().get(i), Some(expected), "row {i}");
        }
    }

    #[test]
    fn test_case_when_contiguous_blocks_sliced() {
        let n = 1200;
        let b0: Vec<bool> = (0..n).map(|i| i < 400).collect();
        let b1: Vec<bool> = (0..n).map(|i| i < 900).collect();
        let c0 = Array::from_bool(BooleanArray::from_slice(&b0));
        let c1 = Array::from_bool(BooleanArray::from_slice(&b1));
        let v: Vec<i64> = (0..n as i64).collect();
        let v0 = Array::from_int64(IntegerArray::from_slice(&v));
        let (off, len) = (99, 1000);
        let out = all_paths(
            &[Value::from(c0.view(off, len)), Value::from(c1.view(off, len))],
            &[Value::from(v0.view(off, len)), Value::from(Scalar::from(0i64))],
        );
        let ints = out.num().i64();
        assert_eq!(ints.get(0), Some(99));
        assert_eq!(ints.get(300), Some(399));
        assert_eq!(ints.get(301), Some(0));
        assert_eq!(ints.get(801), None);
        assert_eq!(out.null_count(), len - 801);
    }

    #[test]
    fn test_case_when_lists_deep_copy() {
        let values = ListArray::from_lists(arr_i64![1, 2, 3, 4, 5, 6], &[Some(1), Some(2), Some(3)]);
        let sliced = Array::from_list(values).view(1, 2);
        let c0 = Value::from(arr_bool![false, true]);
        let default = Value::from(Scalar::List {
            child: ArrowType::Int64,
            value: Some(arr_i64![0, 0]),
        });
        let out = all_paths(&[c0], &[Value::from(sliced), default]);
        let l = out.list();
        assert_eq!(l.offsets.as_slice(), &[0, 2, 5]);
        assert_eq!(l.values, arr_i64![0, 0, 4, 5, 6]);
    }

    #[test]
    fn test_case_when_scalar_conditions() {
        let values = [Value::from(arr_i32![1, 2]), Value::from(arr_i32![3, 4])];
        let out = all_paths(
            &[Value::from(Scalar::Null), Value::from(Scalar::from(true))],
            &values,
        );
        assert_eq!(out, arr_i32![3, 4]);
    }

    #[test]
    fn test_case_when_argument_errors() {
        let c = Value::from(arr_bool![true]);
        let v = Value::from(arr_i64![1]);
        assert!(matches!(case_when(&[], &[v.clone()]), Err(KernelError::InvalidArguments(_))));
        assert!(matches!(
            case_when(&[c.clone()], &[v.clone(), v.clone(), v.clone()]),
            Err(KernelError::InvalidArguments(_))
        ));
        assert!(matches!(
            case_when(&[v.clone()], &[v.clone()]),
            Err(KernelError::TypeMismatch { kernel: "case_when", .. })
        ));
        assert_eq!(
            case_when(&[c], &[Value::from(arr_i64![1, 2])]).unwrap_err(),
            KernelError::LengthMismatch { kernel: "case_when", expected: 1, found: 2 }
        );
    }
}
