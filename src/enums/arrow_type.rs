//! # ArrowType Module - *Arrow type tagging for kernel argument checks*
//!
//! Minarrow-style representation of the logical types the selection kernels understand.
//!
//! ## Overview
//! - Covers the four storage categories: fixed-width numerics, bit-packed booleans,
//!   variable-length UTF-8 strings (32 and 64-bit offsets), and nested lists.
//! - Every `Array` and `Scalar` reports its `ArrowType`, and kernels compare them
//!   for equality before any output is allocated.
//!
//! ## Display
//! - Human-readable names are produced for all variants, `List<Int64>` for nested types.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// # ArrowType
///
/// Logical data type of an array, scalar, or kernel output.
///
/// - `Null` is the type of an untyped null literal and unifies with any other type.
/// - `List` carries its child element type.
#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub enum ArrowType {
    Null,
    Boolean,
    Int32,
    Int64,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    LargeString,
    List(Box<ArrowType>),
}

impl ArrowType {
    /// True for the integer types accepted as `choose` indices.
    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ArrowType::Int32 | ArrowType::Int64 | ArrowType::UInt32 | ArrowType::UInt64
        )
    }

    /// True for fixed-width numeric types.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, ArrowType::Float32 | ArrowType::Float64)
    }

    /// True for variable-length (offset + data) types.
    #[inline]
    pub fn is_variable_length(&self) -> bool {
        matches!(self, ArrowType::String | ArrowType::LargeString)
    }
}

impl Display for ArrowType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ArrowType::Null => f.write_str("Null"),
            ArrowType::Boolean => f.write_str("Boolean"),
            ArrowType::Int32 => f.write_str("Int32"),
            ArrowType::Int64 => f.write_str("Int64"),
            ArrowType::UInt32 => f.write_str("UInt32"),
            ArrowType::UInt64 => f.write_str("UInt64"),
            ArrowType::Float32 => f.write_str("Float32"),
            ArrowType::Float64 => f.write_str("Float64"),
            ArrowType::String => f.write_str("String"),
            ArrowType::LargeString => f.write_str("LargeString"),
            ArrowType::List(child) => write!(f, "List<{child}>"),
        }
    }
}
