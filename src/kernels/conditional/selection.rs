// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Apache License 2.0.

//! # **Selection Plans** - *Span and row materialisation shared by every kernel*
//!
//! A kernel reduces its selector(s) to a plan that says, for each output row,
//! which value argument supplies it (or that the row is null). The plan takes
//! one of two forms:
//!
//! - **Spans**: ordered `[start, start + len)` segments with one source each,
//!   realised with bulk span copies through the output builder.
//! - **Rows**: a per-row pick function, realised one row at a time. This is
//!   the reference path and never consults run detection.
//!
//! Both forms produce byte-identical arrays for the same inputs.

use crate::config::MIN_AVG_RUN_LEN;
use crate::enums::arrow_type::ArrowType;
use crate::enums::error::KernelError;
use crate::kernels::bitmask::{Run, RunValue, find_bit_runs, find_runs};
use crate::kernels::builder::ArrayBuilder;
use crate::{Array, MaskedArray, Scalar, TextArray, Value};

/// Which materialisation strategy a kernel call uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPath {
    /// Spans when runs are long on average, rows otherwise.
    #[default]
    Auto,
    /// Always bulk-copy spans.
    Runs,
    /// Always evaluate row by row.
    RowWise,
}

impl SelectionPath {
    /// Resolves the strategy for a plan of `n_spans` segments over `len` rows.
    ///
    /// `prefer_runs` makes `Auto` pick spans regardless of the run statistics,
    /// e.g. when every value argument is a scalar.
    #[inline]
    pub fn use_runs(self, n_spans: usize, len: usize, prefer_runs: bool) -> bool {
        match self {
            SelectionPath::Runs => true,
            SelectionPath::RowWise => false,
            SelectionPath::Auto => prefer_runs || n_spans.saturating_mul(MIN_AVG_RUN_LEN) <= len,
        }
    }
}

/// Rows `[start, start + len)` taken from value argument `source`, or null when `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
    pub source: Option<usize>,
}

/// Appends a span, merging it into the previous one when the source matches.
#[inline]
pub(crate) fn push_span(spans: &mut Vec<Span>, start: usize, len: usize, source: Option<usize>) {
    if len == 0 {
        return;
    }
    if let Some(last) = spans.last_mut() {
        if last.source == source && last.start + last.len == start {
            last.len += len;
            return;
        }
    }
    spans.push(Span { start, len, source });
}

/// Single run covering `len` rows, used for scalar selectors.
#[inline]
pub(crate) fn constant_runs(len: usize, value: RunValue) -> Vec<Run> {
    if len == 0 {
        Vec::new()
    } else {
        vec![Run { start: 0, len, value }]
    }
}

/// True/false/null runs of a boolean selector over `len` broadcast rows.
pub(crate) fn condition_runs(cond: &Value, len: usize) -> Vec<Run> {
    match cond {
        Value::Scalar(s) => {
            let value = match s.as_bool() {
                Some(true) => RunValue::True,
                Some(false) => RunValue::False,
                None => RunValue::Null,
            };
            constant_runs(len, value)
        }
        Value::Array(view) => {
            let arr = view.array.bool();
            find_runs(arr.values_window(view.offset, len), arr.null_window(view.offset, len))
        }
    }
}

/// Validity runs of a value argument: `True` where the row is non-null.
pub(crate) fn validity_runs(value: &Value, len: usize) -> Vec<Run> {
    match value {
        Value::Scalar(s) if s.is_null() => constant_runs(len, RunValue::False),
        Value::Scalar(_) => constant_runs(len, RunValue::True),
        Value::Array(view) => match view.null_mask_view() {
            Some(window) => find_bit_runs(window),
            None => constant_runs(len, RunValue::True),
        },
    }
}

/// First-true merge across ordered condition runs.
///
/// `runs[k]` covers `[0, len)` for condition `k`. At each row the first
/// condition whose run is `True` wins; `False` and `Null` both let the scan
/// continue. Rows no condition claims go to `fallback`.
///
/// Works run by run: a segment ends at the nearest run boundary among the
/// conditions that decided it, so the cost is bounded by the total run count
/// times the number of conditions, independent of `len`.
pub(crate) fn merge_first_true(runs: &[Vec<Run>], len: usize, fallback: Option<usize>) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = vec![0usize; runs.len()];
    let mut pos = 0;
    while pos < len {
        let mut end = len;
        let mut source = fallback;
        for (k, list) in runs.iter().enumerate() {
            while list[cursor[k]].end() <= pos {
                cursor[k] += 1;
            }
            let run = list[cursor[k]];
            end = end.min(run.end());
            if run.value == RunValue::True {
                source = Some(k);
                break;
            }
        }
        push_span(&mut spans, pos, end - pos, source);
        pos = end;
    }
    spans
}

/// Payload units (string bytes, list child elements) of `len` rows of `value`
/// starting at `start`. Zero for fixed-width types.
pub(crate) fn payload_len(value: &Value, start: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    match value {
        Value::Array(view) => {
            let (a, b) = (view.offset + start, view.offset + start + len);
            match &view.array {
                Array::TextArray(TextArray::String32(s)) => s.value_range(b - 1).1 - s.value_range(a).0,
                Array::TextArray(TextArray::String64(s)) => s.value_range(b - 1).1 - s.value_range(a).0,
                Array::ListArray(l) => l.value_range(b - 1).1 - l.value_range(a).0,
                _ => 0,
            }
        }
        Value::Scalar(Scalar::List { value: Some(arr), .. }) => arr.len().saturating_mul(len),
        Value::Scalar(s) => s.byte_len().saturating_mul(len),
    }
}

/// Materialises a span plan. Reserves the exact payload once.
pub(crate) fn build_spans(
    dtype: &ArrowType,
    len: usize,
    spans: &[Span],
    values: &[Value],
) -> Result<Array, KernelError> {
    let hint = spans
        .iter()
        .filter_map(|s| s.source.map(|k| payload_len(&values[k], s.start, s.len)))
        .fold(0usize, usize::saturating_add);
    let mut builder = ArrayBuilder::try_new(dtype, len, hint)?;
    for span in spans {
        match span.source {
            Some(k) => builder.extend_from_value(&values[k], span.start, span.len)?,
            None => builder.extend_nulls(span.len),
        }
    }
    debug_assert_eq!(builder.len(), len);
    Ok(builder.finish())
}

/// Materialises a row plan. `pick(i)` names the source of row `i`, `None` for null.
///
/// Reserves an upper bound of payload: everything every argument could supply.
pub(crate) fn build_rows(
    dtype: &ArrowType,
    len: usize,
    values: &[Value],
    mut pick: impl FnMut(usize) -> Option<usize>,
) -> Result<Array, KernelError> {
    let hint = values
        .iter()
        .map(|v| payload_len(v, 0, len))
        .fold(0usize, usize::saturating_add);
    let mut builder = ArrayBuilder::try_new(dtype, len, hint)?;
    for i in 0..len {
        match pick(i) {
            Some(k) => builder.push_from_value(&values[k], i)?,
            None => builder.extend_nulls(1),
        }
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arr_i64_opt, arr_str32_opt};

    fn run(start: usize, len: usize, value: RunValue) -> Run {
        Run { start, len, value }
    }

    #[test]
    fn test_push_span_merges() {
        let mut spans = Vec::new();
        push_span(&mut spans, 0, 3, Some(1));
        push_span(&mut spans, 3, 2, Some(1));
        push_span(&mut spans, 5, 0, None);
        push_span(&mut spans, 5, 1, None);
        assert_eq!(
            spans,
            vec![Span { start: 0, len: 5, source: Some(1) }, Span { start: 5, len: 1, source: None }]
        );
    }

    #[test]
    fn test_use_runs() {
        assert!(SelectionPath::Runs.use_runs(1000, 10, false));
        assert!(!SelectionPath::RowWise.use_runs(1, 1000, true));
        assert!(SelectionPath::Auto.use_runs(2, 1000, false));
        assert!(!SelectionPath::Auto.use_runs(500, 1000, false));
        assert!(SelectionPath::Auto.use_runs(500, 1000, true));
    }

    #[test]
    fn test_merge_first_true() {
        // c0: T T F F N N ; c1: F T T F T F
        let c0 = vec![
            run(0, 2, RunValue::True),
            run(2, 2, RunValue::False),
            run(4, 2, RunValue::Null),
        ];
        let c1 = vec![
            run(0, 1, RunValue::False),
            run(1, 2, RunValue::True),
            run(3, 1, RunValue::False),
            run(4, 1, RunValue::True),
            run(5, 1, RunValue::False),
        ];
        let spans = merge_first_true(&[c0, c1], 6, Some(2));
        let picks: Vec<Option<usize>> = spans
            .iter()
            .flat_map(|s| std::iter::repeat(s.source).take(s.len))
            .collect();
        assert_eq!(picks, vec![Some(0), Some(0), Some(1), Some(2), Some(1), Some(2)]);
        assert_eq!(spans.iter().map(|s| s.len).sum::<usize>(), 6);
    }

    #[test]
    fn test_merge_without_fallback() {
        let c0 = constant_runs(4, RunValue::Null);
        assert_eq!(merge_first_true(&[c0], 4, None), vec![Span { start: 0, len: 4, source: None }]);
        assert!(merge_first_true(&[Vec::new()], 0, None).is_empty());
    }

    #[test]
    fn test_condition_and_validity_runs() {
        let c = Value::from(crate::arr_bool_opt![Some(true), Some(true), None, Some(false)]).slice(1, 3);
        assert_eq!(
            condition_runs(&c, 3),
            vec![run(0, 1, RunValue::True), run(1, 1, RunValue::Null), run(2, 1, RunValue::False)]
        );
        assert_eq!(condition_runs(&Value::from(Scalar::Null), 5), vec![run(0, 5, RunValue::Null)]);

        let v = Value::from(arr_i64_opt![None, Some(2), Some(3)]);
        assert_eq!(validity_runs(&v, 3), vec![run(0, 1, RunValue::False), run(1, 2, RunValue::True)]);
        assert_eq!(validity_runs(&Value::from(Scalar::Int64(None)), 2), vec![run(0, 2, RunValue::False)]);
    }

    #[test]
    fn test_payload_len() {
        let v = Value::from(arr_str32_opt![Some("ab"), None, Some("cde")]);
        assert_eq!(payload_len(&v, 0, 3), 5);
        assert_eq!(payload_len(&v, 1, 2), 3);
        assert_eq!(payload_len(&Value::from(Scalar::from("xy")), 0, 4), 8);
        assert_eq!(payload_len(&Value::from(arr_i64_opt![Some(1)]), 0, 1), 0);
    }

    #[test]
    fn test_build_paths_agree() {
        let values = [
            Value::from(arr_i64_opt![Some(1), None, Some(3), Some(4)]),
            Value::from(Scalar::from(9i64)),
        ];
        let spans = vec![
            Span { start: 0, len: 2, source: Some(0) },
            Span { start: 2, len: 1, source: None },
            Span { start: 3, len: 1, source: Some(1) },
        ];
        let a = build_spans(&ArrowType::Int64, 4, &spans, &values).unwrap();
        let picks = [Some(0), Some(0), None, Some(1)];
        let b = build_rows(&ArrowType::Int64, 4, &values, |i| picks[i]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, arr_i64_opt![Some(1), None, None, Some(9)]);
    }
}
