//! Property tests for the selection kernels.
//!
//! Each kernel is checked against a direct per-row model, and the span path
//! is checked to produce exactly the same array as the row path. A scalar
//! argument must give the same array as that scalar repeated as a column.

use mux_kernels::kernels::bitmask::{RunValue, find_runs};
use mux_kernels::{
    Array, ArrayV, Bitmask, BooleanArray, IntegerArray, MaskedArray, Scalar, SelectionPath, StringArray,
    Value, case_when_with, choose_with, coalesce_with, if_else_with,
};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

const MAX_LEN: usize = 300;
const PATHS: [SelectionPath; 3] = [SelectionPath::Auto, SelectionPath::Runs, SelectionPath::RowWise];

fn bools(v: &[Option<bool>]) -> Array {
    Array::from_bool(BooleanArray::from_options(v))
}

fn ints(v: &[Option<i64>]) -> Array {
    Array::from_int64(IntegerArray::from_options(v))
}

fn strs(v: &[Option<String>]) -> Array {
    let refs: Vec<Option<&str>> = v.iter().map(|s| s.as_deref()).collect();
    Array::from_string32(StringArray::from_options(&refs))
}

fn rows_i64(a: &Array) -> Vec<Option<i64>> {
    let arr = a.num().i64();
    (0..arr.len()).map(|i| arr.get(i)).collect()
}

fn rows_str(a: &Array) -> Vec<Option<String>> {
    let arr = a.str().str32();
    (0..arr.len()).map(|i| arr.get(i).map(str::to_string)).collect()
}

/// Random conditions, or a few long uniform blocks.
fn conditions() -> impl Strategy<Value = Vec<Option<bool>>> {
    prop_oneof![
        vec(option::of(any::<bool>()), 0..MAX_LEN),
        vec((option::of(any::<bool>()), 1usize..80), 0..6).prop_map(|blocks| {
            blocks
                .into_iter()
                .flat_map(|(v, n)| std::iter::repeat_n(v, n))
                .collect()
        }),
    ]
}

fn ints_of(n: usize) -> impl Strategy<Value = Vec<Option<i64>>> {
    vec(option::weighted(0.8, -1000i64..1000), n)
}

fn strs_of(n: usize) -> impl Strategy<Value = Vec<Option<String>>> {
    vec(option::weighted(0.8, "[a-z]{0,6}"), n)
}

/// Condition with two same-length integer columns.
fn if_else_case() -> impl Strategy<Value = (Vec<Option<bool>>, Vec<Option<i64>>, Vec<Option<i64>>)> {
    conditions().prop_flat_map(|c| {
        let n = c.len();
        (Just(c), ints_of(n), ints_of(n))
    })
}

/// A window `(offset, len)` inside `n` rows.
fn window(n: usize) -> impl Strategy<Value = (usize, usize)> {
    (0..=n).prop_flat_map(move |k| (Just(k), 0..=n - k))
}

fn model_if_else<T: Clone>(c: &[Option<bool>], l: &[Option<T>], r: &[Option<T>]) -> Vec<Option<T>> {
    (0..c.len())
        .map(|i| match c[i] {
            Some(true) => l[i].clone(),
            Some(false) => r[i].clone(),
            None => None,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn if_else_matches_per_row_model((c, l, r) in if_else_case()) {
        let expected = model_if_else(&c, &l, &r);
        let (cv, lv, rv) = (Value::from(bools(&c)), Value::from(ints(&l)), Value::from(ints(&r)));
        let runs = if_else_with(&cv, &lv, &rv, SelectionPath::Runs).unwrap();
        let rows = if_else_with(&cv, &lv, &rv, SelectionPath::RowWise).unwrap();
        prop_assert_eq!(&runs, &rows);
        prop_assert_eq!(rows_i64(&runs), expected.clone());
        prop_assert_eq!(runs.null_count(), expected.iter().filter(|v| v.is_none()).count());
    }

    #[test]
    fn if_else_strings_paths_identical_on_windows(
        (c, l, r, (k, m)) in conditions().prop_flat_map(|c| {
            let n = c.len();
            (Just(c), strs_of(n), strs_of(n), window(n))
        })
    ) {
        let cv = Value::from(bools(&c).view(k, m));
        let lv = Value::from(strs(&l).view(k, m));
        let rv = Value::from(strs(&r).view(k, m));
        let auto = if_else_with(&cv, &lv, &rv, SelectionPath::Auto).unwrap();
        let runs = if_else_with(&cv, &lv, &rv, SelectionPath::Runs).unwrap();
        let rows = if_else_with(&cv, &lv, &rv, SelectionPath::RowWise).unwrap();
        prop_assert_eq!(&auto, &rows);
        prop_assert_eq!(&runs, &rows);
        let expected = model_if_else(&c[k..k + m], &l[k..k + m], &r[k..k + m]);
        prop_assert_eq!(rows_str(&runs), expected);
    }

    #[test]
    fn if_else_is_idempotent_under_slicing(
        ((c, l, r), (k, m)) in if_else_case().prop_flat_map(|case| {
            let n = case.0.len();
            (Just(case), window(n))
        })
    ) {
        let (ca, la, ra) = (bools(&c), ints(&l), ints(&r));
        let whole = if_else_with(
            &Value::from(ca.clone()),
            &Value::from(la.clone()),
            &Value::from(ra.clone()),
            SelectionPath::Auto,
        )
        .unwrap();
        let sliced = if_else_with(
            &Value::from(ca.view(k, m)),
            &Value::from(la.view(k, m)),
            &Value::from(ra.view(k, m)),
            SelectionPath::Auto,
        )
        .unwrap();
        prop_assert_eq!(rows_i64(&whole)[k..k + m].to_vec(), rows_i64(&sliced));
        prop_assert_eq!(whole.view(k, m), ArrayV::from(sliced));
    }

    #[test]
    fn if_else_broadcast_equals_repeated_array(
        (c, l, _) in if_else_case(),
        s in option::of(-50i64..50),
    ) {
        let n = c.len();
        let (cv, lv) = (Value::from(bools(&c)), Value::from(ints(&l)));
        let scalar = if_else_with(&cv, &lv, &Value::from(Scalar::Int64(s)), SelectionPath::Auto).unwrap();
        let repeated = if_else_with(&cv, &lv, &Value::from(ints(&vec![s; n])), SelectionPath::Auto).unwrap();
        prop_assert_eq!(rows_i64(&scalar), rows_i64(&repeated));
    }

    #[test]
    fn if_else_scalar_condition_equals_repeated_condition(
        (l, r, s) in (0..MAX_LEN).prop_flat_map(|n| (ints_of(n), ints_of(n), option::of(any::<bool>())))
    ) {
        let n = l.len();
        let (lv, rv) = (Value::from(ints(&l)), Value::from(ints(&r)));
        for path in PATHS {
            let scalar = if_else_with(&Value::from(Scalar::Boolean(s)), &lv, &rv, path).unwrap();
            let repeated = if_else_with(&Value::from(bools(&vec![s; n])), &lv, &rv, path).unwrap();
            prop_assert_eq!(scalar, repeated);
        }
    }

    #[test]
    fn case_when_broadcast_equals_repeated_array(
        (c0, s1, v0, d, with_default) in conditions().prop_flat_map(|c0| {
            let n = c0.len();
            (Just(c0), option::of(any::<bool>()), ints_of(n), option::of(-5i64..5), any::<bool>())
        })
    ) {
        let n = c0.len();
        let c0 = Value::from(bools(&c0));
        let broadcast_conds = [c0.clone(), Value::from(Scalar::Boolean(s1))];
        let repeated_conds = [c0, Value::from(bools(&vec![s1; n]))];
        let mut broadcast_vals = vec![Value::from(ints(&v0)), Value::from(Scalar::Int64(d))];
        let mut repeated_vals = vec![Value::from(ints(&v0)), Value::from(ints(&vec![d; n]))];
        if with_default {
            broadcast_vals.push(Value::from(Scalar::Int64(d.map(|x| x + 100))));
            repeated_vals.push(Value::from(ints(&vec![d.map(|x| x + 100); n])));
        }
        for path in PATHS {
            let scalar = case_when_with(&broadcast_conds, &broadcast_vals, path).unwrap();
            let repeated = case_when_with(&repeated_conds, &repeated_vals, path).unwrap();
            prop_assert_eq!(scalar, repeated);
        }
    }

    #[test]
    fn coalesce_broadcast_equals_repeated_array(
        (a, b, s) in (0..MAX_LEN).prop_flat_map(|n| (ints_of(n), ints_of(n), option::of(-5i64..5)))
    ) {
        let n = a.len();
        let broadcast = [Value::from(ints(&a)), Value::from(Scalar::Int64(s)), Value::from(ints(&b))];
        let repeated = [Value::from(ints(&a)), Value::from(ints(&vec![s; n])), Value::from(ints(&b))];
        for path in PATHS {
            prop_assert_eq!(
                coalesce_with(&broadcast, path).unwrap(),
                coalesce_with(&repeated, path).unwrap()
            );
        }
    }

    #[test]
    fn choose_broadcast_equals_repeated_array(
        (idx, a, s, ix) in (0..MAX_LEN).prop_flat_map(|n| {
            (vec(option::weighted(0.9, 0i32..2), n), strs_of(n), option::of("[a-z]{0,4}"), option::of(0i32..2))
        })
    ) {
        let n = idx.len();
        let idx_array = Value::from(Array::from_int32(IntegerArray::from_options(&idx)));
        let scalar_choice = Value::from(Scalar::String32(s.clone()));
        let repeated_choice = Value::from(strs(&vec![s; n]));
        let a = Value::from(strs(&a));
        let idx_scalar = Value::from(Scalar::Int32(ix));
        let idx_repeated = Value::from(Array::from_int32(IntegerArray::from_options(&vec![ix; n])));
        for path in PATHS {
            prop_assert_eq!(
                choose_with(&idx_array, &[a.clone(), scalar_choice.clone()], path).unwrap(),
                choose_with(&idx_array, &[a.clone(), repeated_choice.clone()], path).unwrap()
            );
            prop_assert_eq!(
                choose_with(&idx_scalar, &[a.clone(), repeated_choice.clone()], path).unwrap(),
                choose_with(&idx_repeated, &[a.clone(), repeated_choice.clone()], path).unwrap()
            );
        }
    }

    #[test]
    fn case_when_matches_first_true_model(
        (c0, c1, v0, v1, d, with_default) in conditions().prop_flat_map(|c0| {
            let n = c0.len();
            (Just(c0), vec(option::of(any::<bool>()), n), ints_of(n), ints_of(n), ints_of(n), any::<bool>())
        })
    ) {
        let conds = [Value::from(bools(&c0)), Value::from(bools(&c1))];
        let mut values = vec![Value::from(ints(&v0)), Value::from(ints(&v1))];
        if with_default {
            values.push(Value::from(ints(&d)));
        }
        let expected: Vec<Option<i64>> = (0..c0.len())
            .map(|i| {
                if c0[i] == Some(true) {
                    v0[i]
                } else if c1[i] == Some(true) {
                    v1[i]
                } else if with_default {
                    d[i]
                } else {
                    None
                }
            })
            .collect();
        let runs = case_when_with(&conds, &values, SelectionPath::Runs).unwrap();
        let rows = case_when_with(&conds, &values, SelectionPath::RowWise).unwrap();
        prop_assert_eq!(&runs, &rows);
        prop_assert_eq!(rows_i64(&runs), expected.clone());
        prop_assert_eq!(runs.null_count(), expected.iter().filter(|v| v.is_none()).count());
    }

    #[test]
    fn case_when_leading_true_short_circuits(
        (c1, v0, v1) in conditions().prop_flat_map(|c1| {
            let n = c1.len();
            (Just(c1), ints_of(n), ints_of(n))
        })
    ) {
        let n = c1.len();
        let conds = [Value::from(bools(&vec![Some(true); n])), Value::from(bools(&c1))];
        let values = [Value::from(ints(&v0)), Value::from(ints(&v1)), Value::from(Scalar::Int64(Some(0)))];
        for path in [SelectionPath::Runs, SelectionPath::RowWise] {
            let out = case_when_with(&conds, &values, path).unwrap();
            prop_assert_eq!(rows_i64(&out), v0.clone());
        }
    }

    #[test]
    fn coalesce_matches_first_valid_model(
        (a, b, s, (k, m)) in (0..MAX_LEN).prop_flat_map(|n| {
            (ints_of(n), ints_of(n), option::of(-5i64..5), window(n))
        })
    ) {
        let args = [
            Value::from(ints(&a).view(k, m)),
            Value::from(ints(&b).view(k, m)),
            Value::from(Scalar::Int64(s)),
        ];
        let expected: Vec<Option<i64>> = (k..k + m).map(|i| a[i].or(b[i]).or(s)).collect();
        let runs = coalesce_with(&args, SelectionPath::Runs).unwrap();
        let rows = coalesce_with(&args, SelectionPath::RowWise).unwrap();
        let auto = coalesce_with(&args, SelectionPath::Auto).unwrap();
        prop_assert_eq!(&runs, &rows);
        prop_assert_eq!(&auto, &rows);
        prop_assert_eq!(rows_i64(&runs), expected);
    }

    #[test]
    fn choose_matches_index_model(
        (idx, a, b, c) in (0..MAX_LEN).prop_flat_map(|n| {
            (vec(option::weighted(0.9, 0i32..3), n), strs_of(n), strs_of(n), strs_of(n))
        })
    ) {
        let indices = Value::from(Array::from_int32(IntegerArray::from_options(&idx)));
        let choices = [Value::from(strs(&a)), Value::from(strs(&b)), Value::from(strs(&c))];
        let cols = [&a, &b, &c];
        let expected: Vec<Option<String>> = idx
            .iter()
            .enumerate()
            .map(|(i, ix)| ix.and_then(|k| cols[k as usize][i].clone()))
            .collect();
        let runs = choose_with(&indices, &choices, SelectionPath::Runs).unwrap();
        let rows = choose_with(&indices, &choices, SelectionPath::RowWise).unwrap();
        prop_assert_eq!(&runs, &rows);
        prop_assert_eq!(rows_str(&runs), expected);
    }

    #[test]
    fn runs_cover_window_exactly(c in conditions(), off in 0usize..70) {
        let padded: Vec<Option<bool>> = std::iter::repeat_n(Some(false), off).chain(c.iter().copied()).collect();
        let values = Bitmask::from_bools(&padded.iter().map(|v| v.unwrap_or(false)).collect::<Vec<_>>());
        let validity = Bitmask::from_bools(&padded.iter().map(Option::is_some).collect::<Vec<_>>());
        let runs = find_runs((&values, off, c.len()), Some((&validity, off, c.len())));
        prop_assert_eq!(runs.iter().map(|r| r.len).sum::<usize>(), c.len());
        let mut pos = 0;
        for (j, run) in runs.iter().enumerate() {
            prop_assert_eq!(run.start, pos);
            prop_assert!(run.len > 0);
            if j > 0 {
                prop_assert_ne!(runs[j - 1].value, run.value);
            }
            for i in run.start..run.end() {
                let state = match c[i] {
                    Some(true) => RunValue::True,
                    Some(false) => RunValue::False,
                    None => RunValue::Null,
                };
                prop_assert_eq!(state, run.value);
            }
            pos = run.end();
        }
    }
}
