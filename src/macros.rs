//! Internal macros shared by the fixed-width inner array types.

/// Generates constructors, `MaskedArray`, and `Display` for a fixed-width
/// array type `$name<T>` with fields `data: Vec64<T>` and `null_mask: Option<Bitmask>`.
#[macro_export]
#[doc(hidden)]
macro_rules! impl_fixed_width_array {
    ($name:ident, $bound:ident, $dtype:literal) => {
        impl<T: $bound> $name<T> {
            /// Constructs a new array from values and an optional null mask.
            ///
            /// Panics if the mask length differs from the data length.
            #[inline]
            pub fn new(data: impl Into<Vec64<T>>, null_mask: Option<Bitmask>) -> Self {
                let data: Vec64<T> = data.into();
                validate_null_mask_len(data.len(), &null_mask);
                Self { data, null_mask }
            }

            /// Constructs a dense array from a slice (no nulls).
            #[inline]
            pub fn from_slice(slice: &[T]) -> Self {
                let mut data = Vec64::with_capacity(slice.len());
                data.extend_from_slice(slice);
                Self { data, null_mask: None }
            }

            /// Constructs from optional values; `None` entries become nulls
            /// backed by `T::default()`.
            pub fn from_options(values: &[Option<T>]) -> Self {
                let mut data = Vec64::with_capacity(values.len());
                let mut mask = Bitmask::with_capacity(values.len());
                for v in values {
                    data.push(v.unwrap_or_default());
                    mask.push(v.is_some());
                }
                let null_mask = if mask.all_set() { None } else { Some(mask) };
                Self { data, null_mask }
            }

            /// Empty array with reserved capacity, optionally carrying a null mask.
            #[inline]
            pub fn with_capacity(cap: usize, null_mask: bool) -> Self {
                Self {
                    data: Vec64::with_capacity(cap),
                    null_mask: if null_mask { Some(Bitmask::with_capacity(cap)) } else { None },
                }
            }

            /// Appends a valid value.
            #[inline]
            pub fn push(&mut self, value: T) {
                self.data.push(value);
                if let Some(mask) = self.null_mask.as_mut() {
                    mask.push(true);
                }
            }

            /// Appends a null, creating the mask on first use.
            #[inline]
            pub fn push_null(&mut self) {
                let idx = self.data.len();
                self.data.push(T::default());
                let mask = self
                    .null_mask
                    .get_or_insert_with(|| Bitmask::new_set_all(idx, true));
                mask.push(false);
            }

            /// Returns the raw value slice, including slots under nulls.
            #[inline]
            pub fn values(&self) -> &[T] {
                &self.data[..]
            }

            /// Copies `[offset, offset + len)` into a new, zero-offset array.
            pub fn slice_clone(&self, offset: usize, len: usize) -> Self {
                assert!(
                    offset + len <= self.data.len(),
                    concat!(stringify!($name), "::slice_clone out of bounds")
                );
                let mut data = Vec64::with_capacity(len);
                data.extend_from_slice(&self.data[offset..offset + len]);
                Self {
                    data,
                    null_mask: slice_null_mask(self.null_mask.as_ref(), offset, len),
                }
            }
        }

        impl<T: $bound> MaskedArray for $name<T> {
            type Item<'a> = T where Self: 'a;

            #[inline]
            fn len(&self) -> usize {
                self.data.len()
            }

            #[inline]
            fn get(&self, idx: usize) -> Option<T> {
                if self.is_null(idx) { None } else { Some(self.data[idx]) }
            }

            #[inline]
            fn null_mask(&self) -> Option<&Bitmask> {
                self.null_mask.as_ref()
            }
        }

        impl<T> Display for $name<T>
        where
            T: $bound + Display,
        {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                let len = self.len();
                writeln!(
                    f,
                    concat!(stringify!($name), " [{} values] (dtype: ", $dtype, ", nulls: {})"),
                    len,
                    self.null_count()
                )?;
                write!(f, "[")?;
                for i in 0..usize::min(len, MAX_PREVIEW) {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match self.get(i) {
                        Some(val) => write!(f, "{}", val)?,
                        None => write!(f, "null")?,
                    }
                }
                if len > MAX_PREVIEW {
                    write!(f, ", … ({} total)", len)?;
                }
                write!(f, "]")
            }
        }
    };
}
