// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Apache License 2.0.

//! # **Output Builders** - *Growable buffers for kernel results*
//!
//! Every selection kernel materialises its result through an [`ArrayBuilder`].
//! There is one builder per storage category:
//!
//! - fixed width: [`PrimitiveBuilder`]
//! - bit packed: [`BooleanBuilder`]
//! - variable length: [`StringBuilder`]
//! - nested: [`ListBuilder`]
//!
//! Each exposes a span copy (`extend_span`), a single-row copy (`push_from`),
//! a broadcast fill (`extend_value`) and a null fill (`extend_nulls`).
//!
//! ## Copy semantics
//! Span and row copies take the raw source slot even when it is null, together
//! with its validity bit. Rows the kernel itself decides are null get the
//! type's default value. Both kernel paths follow the same rule, so their
//! outputs are byte-identical.
//!
//! ## Allocation
//! Capacity is reserved once up front with `try_reserve`; failure surfaces as
//! [`KernelError::AllocationFailure`]. Variable-length outputs reserve an
//! upper bound of bytes rather than growing repeatedly.

use log::trace;
use vec64::Vec64;

use crate::enums::arrow_type::ArrowType;
use crate::enums::error::{KernelError, type_mismatch};
use crate::kernels::bitmask::count_set_bits;
use crate::traits::type_unions::{Integer, Primitive};
use crate::{
    Array, BitmaskVT, Bitmask, BooleanArray, FloatArray, IntegerArray, ListArray, MaskedArray,
    NumericArray, Scalar, StringArray, TextArray, Value,
};

const BUILDER: &str = "builder";

#[inline]
fn alloc_err(what: &str, n: usize, e: impl std::fmt::Display) -> KernelError {
    KernelError::AllocationFailure {
        message: format!("{what} for {n} elements: {e}"),
    }
}

#[inline]
fn try_vec<T>(n: usize, what: &str) -> Result<Vec64<T>, KernelError> {
    let mut v = Vec64::new();
    v.try_reserve(n).map_err(|e| alloc_err(what, n, e))?;
    Ok(v)
}

#[inline]
fn window(mask: Option<&Bitmask>, offset: usize, len: usize) -> Option<BitmaskVT<'_>> {
    mask.map(|m| (m, offset, len))
}

// ----------------- Validity --------------------------------

/// Output validity with lazy materialisation.
///
/// No bitmap exists until the first null is appended; `finish` returns
/// `None` when the output ended up with zero nulls.
#[derive(Debug, Clone, Default)]
pub struct ValidityBuilder {
    mask: Option<Bitmask>,
    len: usize,
    null_count: usize,
    capacity: usize,
}

impl ValidityBuilder {
    /// New builder expecting about `capacity` rows.
    pub fn new(capacity: usize) -> Self {
        Self {
            mask: None,
            len: 0,
            null_count: 0,
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Nulls appended so far.
    #[inline]
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    #[inline]
    fn materialise(&mut self) -> &mut Bitmask {
        let (len, cap) = (self.len, self.capacity);
        self.mask.get_or_insert_with(|| {
            let mut m = Bitmask::with_capacity(cap.max(len));
            m.push_bits(true, len);
            m
        })
    }

    /// Appends `n` valid rows.
    #[inline]
    pub fn append_valid(&mut self, n: usize) {
        if let Some(m) = self.mask.as_mut() {
            m.push_bits(true, n);
        }
        self.len += n;
    }

    /// Appends `n` null rows.
    #[inline]
    pub fn append_null(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        self.materialise().push_bits(false, n);
        self.len += n;
        self.null_count += n;
    }

    /// Appends one row.
    #[inline]
    pub fn push(&mut self, valid: bool) {
        if valid { self.append_valid(1) } else { self.append_null(1) }
    }

    /// Appends `len` rows whose validity is `window`, or all valid when `None`.
    pub fn append_from(&mut self, window: Option<BitmaskVT<'_>>, len: usize) {
        let Some(window) = window else {
            self.append_valid(len);
            return;
        };
        debug_assert_eq!(window.2, len);
        let nulls = len - count_set_bits(window);
        if nulls == 0 {
            self.append_valid(len);
            return;
        }
        self.materialise().extend_from_window(window);
        self.len += len;
        self.null_count += nulls;
    }

    /// Final mask, `None` when every row is valid.
    pub fn finish(self) -> Option<Bitmask> {
        if self.null_count == 0 { None } else { self.mask }
    }
}

// ----------------- Fixed width --------------------------------

/// Builder for `IntegerArray<T>` / `FloatArray<T>` outputs.
#[derive(Debug, Clone)]
pub struct PrimitiveBuilder<T> {
    data: Vec64<T>,
    validity: ValidityBuilder,
}

impl<T: Primitive> PrimitiveBuilder<T> {
    pub fn try_with_capacity(len: usize) -> Result<Self, KernelError> {
        Ok(Self {
            data: try_vec(len, "primitive output")?,
            validity: ValidityBuilder::new(len),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copies a span of raw values and their validity.
    #[inline]
    pub fn extend_span(&mut self, values: &[T], validity: Option<BitmaskVT<'_>>) {
        self.data.extend_from_slice(values);
        self.validity.append_from(validity, values.len());
    }

    /// Copies one raw value and its validity bit.
    #[inline]
    pub fn push_from(&mut self, value: T, valid: bool) {
        self.data.push(value);
        self.validity.push(valid);
    }

    /// Appends `n` copies of `value`; `None` appends nulls.
    pub fn extend_value(&mut self, value: Option<T>, n: usize) {
        match value {
            Some(v) => {
                let new_len = self.data.len() + n;
                self.data.resize(new_len, v);
                self.validity.append_valid(n);
            }
            None => self.extend_nulls(n),
        }
    }

    #[inline]
    pub fn extend_nulls(&mut self, n: usize) {
        let new_len = self.data.len() + n;
        self.data.resize(new_len, T::default());
        self.validity.append_null(n);
    }

    pub fn finish(self) -> (Vec64<T>, Option<Bitmask>) {
        (self.data, self.validity.finish())
    }
}

// ----------------- Bit packed --------------------------------

/// Builder for `BooleanArray` outputs.
#[derive(Debug, Clone)]
pub struct BooleanBuilder {
    data: Bitmask,
    validity: ValidityBuilder,
}

impl BooleanBuilder {
    pub fn try_with_capacity(len: usize) -> Result<Self, KernelError> {
        Ok(Self {
            data: Bitmask::try_with_capacity(len)?,
            validity: ValidityBuilder::new(len),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copies a span of value bits and their validity, both at any bit offset.
    #[inline]
    pub fn extend_span(&mut self, values: BitmaskVT<'_>, validity: Option<BitmaskVT<'_>>) {
        self.data.extend_from_window(values);
        self.validity.append_from(validity, values.2);
    }

    #[inline]
    pub fn push_from(&mut self, value: bool, valid: bool) {
        self.data.push(value);
        self.validity.push(valid);
    }

    pub fn extend_value(&mut self, value: Option<bool>, n: usize) {
        match value {
            Some(v) => {
                self.data.push_bits(v, n);
                self.validity.append_valid(n);
            }
            None => self.extend_nulls(n),
        }
    }

    #[inline]
    pub fn extend_nulls(&mut self, n: usize) {
        self.data.push_bits(false, n);
        self.validity.append_null(n);
    }

    pub fn finish(self) -> BooleanArray {
        BooleanArray::new(self.data, self.validity.finish())
    }
}

// ----------------- Variable length --------------------------------

/// Builder for `StringArray<O>` outputs.
///
/// Copied spans are rebased onto the running destination offset.
#[derive(Debug, Clone)]
pub struct StringBuilder<O> {
    offsets: Vec64<O>,
    data: Vec64<u8>,
    validity: ValidityBuilder,
}

impl<O: Integer> StringBuilder<O> {
    /// Reserves `len` rows and an upper bound of `bytes` payload bytes.
    pub fn try_with_capacity(len: usize, bytes: usize) -> Result<Self, KernelError> {
        let mut offsets = try_vec(len + 1, "string offsets")?;
        offsets.push(O::zero());
        Ok(Self {
            offsets,
            data: try_vec(bytes, "string bytes")?,
            validity: ValidityBuilder::new(len),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn current_offset(&self) -> O {
        self.offsets[self.offsets.len() - 1]
    }

    /// Fails when the payload would grow past what `O` can address.
    #[inline]
    fn check_fits(&self, extra: usize) -> Result<(), KernelError> {
        let end = self.data.len().saturating_add(extra);
        match O::from_usize(end) {
            Some(_) => Ok(()),
            None => Err(KernelError::AllocationFailure {
                message: format!("string output of {end} bytes overflows its offset type"),
            }),
        }
    }

    /// Copies rows `[offset, offset + len)` of `src`.
    pub fn extend_span(
        &mut self,
        src: &StringArray<O>,
        offset: usize,
        len: usize,
    ) -> Result<(), KernelError> {
        if len == 0 {
            return Ok(());
        }
        let src_start = src.offsets[offset];
        let src_end = src.offsets[offset + len];
        let (a, b) = (src_start.to_usize(), src_end.to_usize());
        self.check_fits(b - a)?;
        let base = self.current_offset();
        self.data.extend_from_slice(&src.data[a..b]);
        for i in offset + 1..=offset + len {
            self.offsets.push(base + (src.offsets[i] - src_start));
        }
        self.validity.append_from(src.null_window(offset, len), len);
        Ok(())
    }

    /// Copies row `row` of `src`, raw bytes included when null.
    pub fn push_from(&mut self, src: &StringArray<O>, row: usize) -> Result<(), KernelError> {
        let bytes = src.value_bytes(row);
        self.push_bytes(bytes, !src.is_null(row))
    }

    fn push_bytes(&mut self, bytes: &[u8], valid: bool) -> Result<(), KernelError> {
        self.check_fits(bytes.len())?;
        self.data.extend_from_slice(bytes);
        let end = self.data.len();
        // check_fits guarantees the conversion
        self.offsets.push(O::from_usize(end).unwrap_or_else(O::zero));
        self.validity.push(valid);
        Ok(())
    }

    /// Appends `n` copies of `value`; `None` appends zero-length nulls.
    pub fn extend_value(&mut self, value: Option<&str>, n: usize) -> Result<(), KernelError> {
        match value {
            Some(s) => {
                self.check_fits(s.len().saturating_mul(n))?;
                for _ in 0..n {
                    self.push_bytes(s.as_bytes(), true)?;
                }
                Ok(())
            }
            None => {
                self.extend_nulls(n);
                Ok(())
            }
        }
    }

    pub fn extend_nulls(&mut self, n: usize) {
        let last = self.current_offset();
        let new_len = self.offsets.len() + n;
        self.offsets.resize(new_len, last);
        self.validity.append_null(n);
    }

    pub fn finish(self) -> StringArray<O> {
        StringArray::from_parts(self.offsets, self.data, self.validity.finish())
    }
}

// ----------------- Nested --------------------------------

/// Builder for `ListArray` outputs.
///
/// Child elements are deep-copied into a recursive child builder, so the
/// output never aliases an input's child buffers.
#[derive(Debug, Clone)]
pub struct ListBuilder {
    offsets: Vec64<u32>,
    child: Box<ArrayBuilder>,
    validity: ValidityBuilder,
}

impl ListBuilder {
    /// Reserves `len` rows and `child_hint` child elements.
    pub fn try_with_capacity(
        child: &ArrowType,
        len: usize,
        child_hint: usize,
    ) -> Result<Self, KernelError> {
        let mut offsets = try_vec(len + 1, "list offsets")?;
        offsets.push(0u32);
        Ok(Self {
            offsets,
            child: Box::new(ArrayBuilder::try_new(child, child_hint, 0)?),
            validity: ValidityBuilder::new(len),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn current_offset(&self) -> u32 {
        self.offsets[self.offsets.len() - 1]
    }

    #[inline]
    fn check_fits(&self, extra: usize) -> Result<(), KernelError> {
        let end = (self.current_offset() as usize).saturating_add(extra);
        if end > u32::MAX as usize {
            return Err(KernelError::AllocationFailure {
                message: format!("list output of {end} child elements overflows u32 offsets"),
            });
        }
        Ok(())
    }

    /// Copies rows `[offset, offset + len)` of `src`, child slice included.
    pub fn extend_span(&mut self, src: &ListArray, offset: usize, len: usize) -> Result<(), KernelError> {
        if len == 0 {
            return Ok(());
        }
        let start = src.offsets[offset];
        let end = src.offsets[offset + len];
        self.check_fits((end - start) as usize)?;
        self.child
            .extend_from_array(&src.values, start as usize, (end - start) as usize)?;
        let base = self.current_offset();
        for i in offset + 1..=offset + len {
            self.offsets.push(base + (src.offsets[i] - start));
        }
        self.validity.append_from(src.null_window(offset, len), len);
        Ok(())
    }

    pub fn push_from(&mut self, src: &ListArray, row: usize) -> Result<(), KernelError> {
        let (start, end) = src.value_range(row);
        self.push_child(&src.values, start, end - start, !src.is_null(row))
    }

    fn push_child(&mut self, values: &Array, start: usize, n: usize, valid: bool) -> Result<(), KernelError> {
        self.check_fits(n)?;
        self.child.extend_from_array(values, start, n)?;
        let next = self.current_offset() + n as u32;
        self.offsets.push(next);
        self.validity.push(valid);
        Ok(())
    }

    /// Appends `n` copies of the list `value`; `None` appends empty nulls.
    pub fn extend_value(&mut self, value: Option<&Array>, n: usize) -> Result<(), KernelError> {
        match value {
            Some(arr) => {
                self.check_fits(arr.len().saturating_mul(n))?;
                for _ in 0..n {
                    self.push_child(arr, 0, arr.len(), true)?;
                }
                Ok(())
            }
            None => {
                self.extend_nulls(n);
                Ok(())
            }
        }
    }

    pub fn extend_nulls(&mut self, n: usize) {
        let last = self.current_offset();
        let new_len = self.offsets.len() + n;
        self.offsets.resize(new_len, last);
        self.validity.append_null(n);
    }

    pub fn finish(self) -> ListArray {
        ListArray::from_parts(self.offsets, self.child.finish(), self.validity.finish())
    }
}

// ----------------- Dispatch --------------------------------

/// Output builder for any supported type, one arm per concrete type.
#[derive(Debug, Clone)]
pub enum ArrayBuilder {
    Int32(PrimitiveBuilder<i32>),
    Int64(PrimitiveBuilder<i64>),
    UInt32(PrimitiveBuilder<u32>),
    UInt64(PrimitiveBuilder<u64>),
    Float32(PrimitiveBuilder<f32>),
    Float64(PrimitiveBuilder<f64>),
    Boolean(BooleanBuilder),
    String32(StringBuilder<u32>),
    String64(StringBuilder<u64>),
    List(ListBuilder),
}

macro_rules! match_builder {
    ($self:expr, $b:ident => $body:expr) => {
        match $self {
            ArrayBuilder::Int32($b) => $body,
            ArrayBuilder::Int64($b) => $body,
            ArrayBuilder::UInt32($b) => $body,
            ArrayBuilder::UInt64($b) => $body,
            ArrayBuilder::Float32($b) => $body,
            ArrayBuilder::Float64($b) => $body,
            ArrayBuilder::Boolean($b) => $body,
            ArrayBuilder::String32($b) => $body,
            ArrayBuilder::String64($b) => $body,
            ArrayBuilder::List($b) => $body,
        }
    };
}

impl ArrayBuilder {
    /// Creates a builder for `len` rows of `dtype`.
    ///
    /// `size_hint` is the payload upper bound: bytes for strings, child
    /// elements for lists, ignored otherwise.
    pub fn try_new(dtype: &ArrowType, len: usize, size_hint: usize) -> Result<Self, KernelError> {
        trace!("reserving output builder: dtype={dtype}, rows={len}, size_hint={size_hint}");
        Ok(match dtype {
            ArrowType::Int32 => ArrayBuilder::Int32(PrimitiveBuilder::try_with_capacity(len)?),
            ArrowType::Int64 => ArrayBuilder::Int64(PrimitiveBuilder::try_with_capacity(len)?),
            ArrowType::UInt32 => ArrayBuilder::UInt32(PrimitiveBuilder::try_with_capacity(len)?),
            ArrowType::UInt64 => ArrayBuilder::UInt64(PrimitiveBuilder::try_with_capacity(len)?),
            ArrowType::Float32 => ArrayBuilder::Float32(PrimitiveBuilder::try_with_capacity(len)?),
            ArrowType::Float64 => ArrayBuilder::Float64(PrimitiveBuilder::try_with_capacity(len)?),
            ArrowType::Boolean => ArrayBuilder::Boolean(BooleanBuilder::try_with_capacity(len)?),
            ArrowType::String => {
                ArrayBuilder::String32(StringBuilder::try_with_capacity(len, size_hint)?)
            }
            ArrowType::LargeString => {
                ArrayBuilder::String64(StringBuilder::try_with_capacity(len, size_hint)?)
            }
            ArrowType::List(child) => {
                ArrayBuilder::List(ListBuilder::try_with_capacity(child, len, size_hint)?)
            }
            ArrowType::Null => return Err(type_mismatch(BUILDER, "a concrete type", dtype)),
        })
    }

    /// Rows appended so far.
    pub fn len(&self) -> usize {
        match_builder!(self, b => b.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Logical type of the output.
    pub fn arrow_type(&self) -> ArrowType {
        match self {
            ArrayBuilder::Int32(_) => ArrowType::Int32,
            ArrayBuilder::Int64(_) => ArrowType::Int64,
            ArrayBuilder::UInt32(_) => ArrowType::UInt32,
            ArrayBuilder::UInt64(_) => ArrowType::UInt64,
            ArrayBuilder::Float32(_) => ArrowType::Float32,
            ArrayBuilder::Float64(_) => ArrowType::Float64,
            ArrayBuilder::Boolean(_) => ArrowType::Boolean,
            ArrayBuilder::String32(_) => ArrowType::String,
            ArrayBuilder::String64(_) => ArrowType::LargeString,
            ArrayBuilder::List(b) => ArrowType::List(Box::new(b.child.arrow_type())),
        }
    }

    fn mismatch(&self, found: ArrowType) -> KernelError {
        type_mismatch(BUILDER, self.arrow_type(), found)
    }

    /// Span copy of rows `[offset, offset + len)` of `array`, values and validity.
    pub fn extend_from_array(
        &mut self,
        array: &Array,
        offset: usize,
        len: usize,
    ) -> Result<(), KernelError> {
        debug_assert!(offset + len <= array.len() || len == 0);
        match (&mut *self, array) {
            (_, Array::Null) if len == 0 => {}
            (ArrayBuilder::Int32(b), Array::NumericArray(NumericArray::Int32(a))) => {
                b.extend_span(&a.data[offset..offset + len], window(a.null_mask.as_ref(), offset, len))
            }
            (ArrayBuilder::Int64(b), Array::NumericArray(NumericArray::Int64(a))) => {
                b.extend_span(&a.data[offset..offset + len], window(a.null_mask.as_ref(), offset, len))
            }
            (ArrayBuilder::UInt32(b), Array::NumericArray(NumericArray::UInt32(a))) => {
                b.extend_span(&a.data[offset..offset + len], window(a.null_mask.as_ref(), offset, len))
            }
            (ArrayBuilder::UInt64(b), Array::NumericArray(NumericArray::UInt64(a))) => {
                b.extend_span(&a.data[offset..offset + len], window(a.null_mask.as_ref(), offset, len))
            }
            (ArrayBuilder::Float32(b), Array::NumericArray(NumericArray::Float32(a))) => {
                b.extend_span(&a.data[offset..offset + len], window(a.null_mask.as_ref(), offset, len))
            }
            (ArrayBuilder::Float64(b), Array::NumericArray(NumericArray::Float64(a))) => {
                b.extend_span(&a.data[offset..offset + len], window(a.null_mask.as_ref(), offset, len))
            }
            (ArrayBuilder::Boolean(b), Array::BooleanArray(a)) => {
                b.extend_span(a.values_window(offset, len), window(a.null_mask.as_ref(), offset, len))
            }
            (ArrayBuilder::String32(b), Array::TextArray(TextArray::String32(a))) => {
                b.extend_span(a, offset, len)?
            }
            (ArrayBuilder::String64(b), Array::TextArray(TextArray::String64(a))) => {
                b.extend_span(a, offset, len)?
            }
            (ArrayBuilder::List(b), Array::ListArray(a)) => b.extend_span(a, offset, len)?,
            _ => return Err(self.mismatch(array.arrow_type())),
        }
        Ok(())
    }

    /// Single-row copy of `array[row]`, independent of the span machinery.
    pub fn push_from_array(&mut self, array: &Array, row: usize) -> Result<(), KernelError> {
        match (&mut *self, array) {
            (ArrayBuilder::Int32(b), Array::NumericArray(NumericArray::Int32(a))) => {
                b.push_from(a.data[row], !a.is_null(row))
            }
            (ArrayBuilder::Int64(b), Array::NumericArray(NumericArray::Int64(a))) => {
                b.push_from(a.data[row], !a.is_null(row))
            }
            (ArrayBuilder::UInt32(b), Array::NumericArray(NumericArray::UInt32(a))) => {
                b.push_from(a.data[row], !a.is_null(row))
            }
            (ArrayBuilder::UInt64(b), Array::NumericArray(NumericArray::UInt64(a))) => {
                b.push_from(a.data[row], !a.is_null(row))
            }
            (ArrayBuilder::Float32(b), Array::NumericArray(NumericArray::Float32(a))) => {
                b.push_from(a.data[row], !a.is_null(row))
            }
            (ArrayBuilder::Float64(b), Array::NumericArray(NumericArray::Float64(a))) => {
                b.push_from(a.data[row], !a.is_null(row))
            }
            (ArrayBuilder::Boolean(b), Array::BooleanArray(a)) => {
                b.push_from(a.value(row), !a.is_null(row))
            }
            (ArrayBuilder::String32(b), Array::TextArray(TextArray::String32(a))) => {
                b.push_from(a, row)?
            }
            (ArrayBuilder::String64(b), Array::TextArray(TextArray::String64(a))) => {
                b.push_from(a, row)?
            }
            (ArrayBuilder::List(b), Array::ListArray(a)) => b.push_from(a, row)?,
            _ => return Err(self.mismatch(array.arrow_type())),
        }
        Ok(())
    }

    /// Broadcast fill of `n` rows with `scalar`. The untyped null fills nulls.
    pub fn extend_scalar(&mut self, scalar: &Scalar, n: usize) -> Result<(), KernelError> {
        match (&mut *self, scalar) {
            (b, Scalar::Null) => b.extend_nulls(n),
            (ArrayBuilder::Int32(b), Scalar::Int32(v)) => b.extend_value(*v, n),
            (ArrayBuilder::Int64(b), Scalar::Int64(v)) => b.extend_value(*v, n),
            (ArrayBuilder::UInt32(b), Scalar::UInt32(v)) => b.extend_value(*v, n),
            (ArrayBuilder::UInt64(b), Scalar::UInt64(v)) => b.extend_value(*v, n),
            (ArrayBuilder::Float32(b), Scalar::Float32(v)) => b.extend_value(*v, n),
            (ArrayBuilder::Float64(b), Scalar::Float64(v)) => b.extend_value(*v, n),
            (ArrayBuilder::Boolean(b), Scalar::Boolean(v)) => b.extend_value(*v, n),
            (ArrayBuilder::String32(b), Scalar::String32(v)) => b.extend_value(v.as_deref(), n)?,
            (ArrayBuilder::String64(b), Scalar::String64(v)) => b.extend_value(v.as_deref(), n)?,
            (ArrayBuilder::List(b), Scalar::List { value, .. }) => {
                b.extend_value(value.as_ref(), n)?
            }
            _ => return Err(self.mismatch(scalar.arrow_type())),
        }
        Ok(())
    }

    /// Appends `n` nulls backed by default values.
    pub fn extend_nulls(&mut self, n: usize) {
        match_builder!(self, b => b.extend_nulls(n))
    }

    /// Rows `[start, start + len)` of a kernel argument, scalars broadcast.
    #[inline]
    pub fn extend_from_value(
        &mut self,
        value: &Value,
        start: usize,
        len: usize,
    ) -> Result<(), KernelError> {
        match value {
            Value::Array(v) => self.extend_from_array(&v.array, v.offset + start, len),
            Value::Scalar(s) => self.extend_scalar(s, len),
        }
    }

    /// Row `row` of a kernel argument.
    #[inline]
    pub fn push_from_value(&mut self, value: &Value, row: usize) -> Result<(), KernelError> {
        match value {
            Value::Array(v) => self.push_from_array(&v.array, v.offset + row),
            Value::Scalar(s) => self.extend_scalar(s, 1),
        }
    }

    /// Consumes the builder into an `Array`.
    pub fn finish(self) -> Array {
        match self {
            ArrayBuilder::Int32(b) => {
                let (data, mask) = b.finish();
                Array::from_int32(IntegerArray::new(data, mask))
            }
            ArrayBuilder::Int64(b) => {
                let (data, mask) = b.finish();
                Array::from_int64(IntegerArray::new(data, mask))
            }
            ArrayBuilder::UInt32(b) => {
                let (data, mask) = b.finish();
                Array::from_uint32(IntegerArray::new(data, mask))
            }
            ArrayBuilder::UInt64(b) => {
                let (data, mask) = b.finish();
                Array::from_uint64(IntegerArray::new(data, mask))
            }
            ArrayBuilder::Float32(b) => {
                let (data, mask) = b.finish();
                Array::from_float32(FloatArray::new(data, mask))
            }
            ArrayBuilder::Float64(b) => {
                let (data, mask) = b.finish();
                Array::from_float64(FloatArray::new(data, mask))
            }
            ArrayBuilder::Boolean(b) => Array::from_bool(b.finish()),
            ArrayBuilder::String32(b) => Array::from_string32(b.finish()),
            ArrayBuilder::String64(b) => Array::from_string64(b.finish()),
            ArrayBuilder::List(b) => Array::from_list(b.finish()),
        }
    }
}
