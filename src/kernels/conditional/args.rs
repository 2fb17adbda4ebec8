// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Apache License 2.0.

//! Argument validation shared by the selection kernels.
//!
//! Every check runs before any output buffer is reserved, so a rejected call
//! never allocates.

use crate::enums::arrow_type::ArrowType;
use crate::enums::error::{KernelError, type_mismatch};
use crate::{MaskedArray, Scalar, Value};

/// Common row count of the array arguments.
///
/// Scalars broadcast to whatever the arrays agree on; a call made only of
/// scalars resolves to one row.
pub(crate) fn resolve_len<'a>(
    kernel: &'static str,
    args: impl IntoIterator<Item = &'a Value>,
) -> Result<usize, KernelError> {
    let mut expected: Option<usize> = None;
    for arg in args {
        if let Some(n) = arg.len() {
            match expected {
                None => expected = Some(n),
                Some(e) if e != n => {
                    return Err(KernelError::LengthMismatch {
                        kernel,
                        expected: e,
                        found: n,
                    });
                }
                Some(_) => {}
            }
        }
    }
    Ok(expected.unwrap_or(1))
}

/// The single logical type shared by all value arguments.
///
/// The untyped null literal fits any type. There is no implicit promotion:
/// `Int32` and `Int64` do not unify.
pub(crate) fn unify_type(kernel: &'static str, values: &[Value]) -> Result<ArrowType, KernelError> {
    let mut unified: Option<ArrowType> = None;
    for v in values.iter().filter(|v| v.is_typed()) {
        let t = v.arrow_type();
        match &unified {
            None => unified = Some(t),
            Some(u) if *u != t => return Err(type_mismatch(kernel, u, t)),
            Some(_) => {}
        }
    }
    unified.ok_or_else(|| type_mismatch(kernel, "at least one typed value argument", "null"))
}

/// Conditions must be boolean arrays or boolean/null scalars.
pub(crate) fn check_bool_selector(kernel: &'static str, v: &Value) -> Result<(), KernelError> {
    match v {
        Value::Scalar(Scalar::Null) => Ok(()),
        _ if v.arrow_type() == ArrowType::Boolean => Ok(()),
        _ => Err(type_mismatch(kernel, ArrowType::Boolean, v.arrow_type())),
    }
}

/// Indices must be integer arrays or integer/null scalars.
pub(crate) fn check_int_selector(kernel: &'static str, v: &Value) -> Result<(), KernelError> {
    match v {
        Value::Scalar(Scalar::Null) => Ok(()),
        _ if v.arrow_type().is_integer() => Ok(()),
        _ => Err(type_mismatch(kernel, "an integer type", v.arrow_type())),
    }
}

/// Truthiness of a boolean selector at row `i`: `None` when null.
#[inline]
pub(crate) fn bool_at(v: &Value, i: usize) -> Option<bool> {
    match v {
        Value::Array(view) => view.array.bool().get(view.offset + i),
        Value::Scalar(s) => s.as_bool(),
    }
}

/// Index selector value at row `i`, widened to `i64`: `None` when null.
#[inline]
pub(crate) fn index_at(v: &Value, i: usize) -> Option<i64> {
    match v {
        Value::Array(view) => view.get_scalar(i).as_index(),
        Value::Scalar(s) => s.as_index(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arr_bool, arr_i32, arr_i64, arr_str32};

    #[test]
    fn test_resolve_len() {
        let a = Value::from(arr_i64![1, 2, 3]);
        let s = Value::from(Scalar::from(1i64));
        assert_eq!(resolve_len("k", [&a, &s]).unwrap(), 3);
        assert_eq!(resolve_len("k", [&s, &s]).unwrap(), 1);
        let b = Value::from(arr_i64![1, 2]);
        assert_eq!(
            resolve_len("k", [&a, &b]).unwrap_err(),
            KernelError::LengthMismatch { kernel: "k", expected: 3, found: 2 }
        );
    }

    #[test]
    fn test_unify_type() {
        let vals = [Value::from(Scalar::Null), Value::from(arr_i64![1])];
        assert_eq!(unify_type("k", &vals).unwrap(), ArrowType::Int64);
        let bad = [Value::from(arr_i32![1]), Value::from(arr_i64![1])];
        assert!(matches!(unify_type("k", &bad), Err(KernelError::TypeMismatch { .. })));
        let untyped = [Value::from(Scalar::Null), Value::from(Scalar::Null)];
        assert!(matches!(unify_type("k", &untyped), Err(KernelError::TypeMismatch { .. })));
    }

    #[test]
    fn test_selectors() {
        assert!(check_bool_selector("k", &Value::from(arr_bool![true])).is_ok());
        assert!(check_bool_selector("k", &Value::from(Scalar::Null)).is_ok());
        assert!(check_bool_selector("k", &Value::from(arr_str32!["x"])).is_err());
        assert!(check_int_selector("k", &Value::from(arr_i32![0])).is_ok());
        assert!(check_int_selector("k", &Value::from(Scalar::from(1.0f64))).is_err());
    }

    #[test]
    fn test_row_access() {
        let c = Value::from(arr_bool![true, false]).slice(1, 1);
        assert_eq!(bool_at(&c, 0), Some(false));
        assert_eq!(bool_at(&Value::from(Scalar::Null), 7), None);
        let idx = Value::from(arr_i32![4, -2]);
        assert_eq!(index_at(&idx, 1), Some(-2));
    }
}
