//! # **Scalar Module** - *Typed single value with validity*
//!
//! A `Scalar` stands in for a constant-valued column of any length.
//! The payload is an `Option` so a typed null still carries its type, while
//! [`Scalar::Null`] is the untyped null literal that unifies with any type.

use std::fmt::{Display, Formatter};

use crate::enums::arrow_type::ArrowType;
use crate::enums::error::KernelError;
use crate::kernels::builder::ArrayBuilder;
use crate::Array;

/// # Scalar
///
/// Single typed value, `None` payloads are nulls of that type.
///
/// ## Example
/// ```rust
/// use mux_kernels::{Scalar, ArrowType};
///
/// let s = Scalar::from(7i64);
/// assert!(s.is_valid());
/// assert_eq!(s.arrow_type(), ArrowType::Int64);
/// assert!(!Scalar::Int64(None).is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    /// Untyped null literal.
    #[default]
    Null,
    Boolean(Option<bool>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    String32(Option<String>),
    String64(Option<String>),
    /// One list value: the elements as an array of type `child`.
    List { child: ArrowType, value: Option<Array> },
}

impl Scalar {
    /// Logical type, `ArrowType::Null` for the untyped literal.
    pub fn arrow_type(&self) -> ArrowType {
        match self {
            Scalar::Null => ArrowType::Null,
            Scalar::Boolean(_) => ArrowType::Boolean,
            Scalar::Int32(_) => ArrowType::Int32,
            Scalar::Int64(_) => ArrowType::Int64,
            Scalar::UInt32(_) => ArrowType::UInt32,
            Scalar::UInt64(_) => ArrowType::UInt64,
            Scalar::Float32(_) => ArrowType::Float32,
            Scalar::Float64(_) => ArrowType::Float64,
            Scalar::String32(_) => ArrowType::String,
            Scalar::String64(_) => ArrowType::LargeString,
            Scalar::List { child, .. } => ArrowType::List(Box::new(child.clone())),
        }
    }

    /// True when the scalar carries a value.
    pub fn is_valid(&self) -> bool {
        match self {
            Scalar::Null => false,
            Scalar::Boolean(v) => v.is_some(),
            Scalar::Int32(v) => v.is_some(),
            Scalar::Int64(v) => v.is_some(),
            Scalar::UInt32(v) => v.is_some(),
            Scalar::UInt64(v) => v.is_some(),
            Scalar::Float32(v) => v.is_some(),
            Scalar::Float64(v) => v.is_some(),
            Scalar::String32(v) | Scalar::String64(v) => v.is_some(),
            Scalar::List { value, .. } => value.is_some(),
        }
    }

    /// True when the scalar is null, typed or not.
    #[inline]
    pub fn is_null(&self) -> bool {
        !self.is_valid()
    }

    /// Truthiness of a boolean scalar: `Some(bit)` when valid, `None` when null.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(v) => *v,
            _ => None,
        }
    }

    /// Integer payload widened to `i64`, `None` when null or non-integer.
    ///
    /// `u64` values above `i64::MAX` saturate, which keeps them out of any
    /// valid choice range.
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Scalar::Int32(v) => v.map(i64::from),
            Scalar::Int64(v) => *v,
            Scalar::UInt32(v) => v.map(i64::from),
            Scalar::UInt64(v) => v.map(|x| i64::try_from(x).unwrap_or(i64::MAX)),
            _ => None,
        }
    }

    /// Materialises the scalar as an array of `len` identical entries.
    ///
    /// The untyped null literal has no array form and is rejected.
    pub fn to_array(&self, len: usize) -> Result<Array, KernelError> {
        if matches!(self, Scalar::Null) {
            return Err(KernelError::InvalidArguments(
                "untyped null scalar cannot be materialised".to_string(),
            ));
        }
        let hint = self.byte_len().saturating_mul(len);
        let mut builder = ArrayBuilder::try_new(&self.arrow_type(), len, hint)?;
        builder.extend_scalar(self, len)?;
        Ok(builder.finish())
    }

    /// Payload bytes for variable-length scalars, `0` otherwise.
    pub(crate) fn byte_len(&self) -> usize {
        match self {
            Scalar::String32(Some(s)) | Scalar::String64(Some(s)) => s.len(),
            _ => 0,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn opt<T: Display>(f: &mut Formatter<'_>, v: &Option<T>) -> std::fmt::Result {
            match v {
                Some(x) => write!(f, "{}", x),
                None => write!(f, "null"),
            }
        }
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Boolean(v) => opt(f, v),
            Scalar::Int32(v) => opt(f, v),
            Scalar::Int64(v) => opt(f, v),
            Scalar::UInt32(v) => opt(f, v),
            Scalar::UInt64(v) => opt(f, v),
            Scalar::Float32(v) => opt(f, v),
            Scalar::Float64(v) => opt(f, v),
            Scalar::String32(v) | Scalar::String64(v) => match v {
                Some(s) => write!(f, "\"{}\"", s),
                None => write!(f, "null"),
            },
            Scalar::List { value: Some(arr), .. } => write!(f, "{}", arr),
            Scalar::List { value: None, .. } => write!(f, "null"),
        }
    }
}

macro_rules! impl_scalar_from {
    ($($t:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$t> for Scalar {
                #[inline]
                fn from(v: $t) -> Self {
                    Scalar::$variant(Some(v.into()))
                }
            }
        )+
    };
}

impl_scalar_from!(
    bool => Boolean,
    i32 => Int32,
    i64 => Int64,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    &str => String32,
    String => String32,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MaskedArray, arr_i64};

    #[test]
    fn test_types_and_validity() {
        assert_eq!(Scalar::from("x").arrow_type(), ArrowType::String);
        assert_eq!(Scalar::String64(None).arrow_type(), ArrowType::LargeString);
        assert!(Scalar::from(1.5f64).is_valid());
        assert!(Scalar::Float64(None).is_null());
        assert!(Scalar::Null.is_null());
        let l = Scalar::List { child: ArrowType::Int64, value: Some(arr_i64![1, 2]) };
        assert_eq!(l.arrow_type(), ArrowType::List(Box::new(ArrowType::Int64)));
        assert!(l.is_valid());
    }

    #[test]
    fn test_as_index() {
        assert_eq!(Scalar::from(3u32).as_index(), Some(3));
        assert_eq!(Scalar::Int32(Some(-1)).as_index(), Some(-1));
        assert_eq!(Scalar::UInt64(Some(u64::MAX)).as_index(), Some(i64::MAX));
        assert_eq!(Scalar::Int64(None).as_index(), None);
    }

    #[test]
    fn test_to_array_broadcasts() {
        let arr = Scalar::from("ab").to_array(3).unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.str().get_str(2), Some("ab"));
        let nulls = Scalar::Int32(None).to_array(2).unwrap();
        assert_eq!(nulls.num().i32().null_count(), 2);
        assert!(Scalar::Null.to_array(1).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Scalar::from(4i64).to_string(), "4");
        assert_eq!(Scalar::Boolean(None).to_string(), "null");
        assert_eq!(Scalar::from("hi").to_string(), "\"hi\"");
    }
}
