use std::fmt::Debug;

use num_traits::{Float as NumFloat, PrimInt, ToPrimitive};

/// Trait for types valid as float elements in columnar arrays.
///
/// Useful when specifying `my_fn::<T: Float>() {}`.
///
/// Extends and constrains the *num-traits* `Float` implementation to fit the crate's type universe.
pub trait Float: NumFloat + Primitive + ToPrimitive {}
impl Float for f32 {}
impl Float for f64 {}

/// Trait for types valid as integer elements in columnar arrays,
/// and as string offsets.
pub trait Integer: PrimInt + Primitive + TryFrom<usize> + ToPrimitive {
    /// Lossless cast to `usize`
    fn to_usize(self) -> usize;

    /// Cast from `usize`, `None` when the value does not fit.
    fn from_usize(v: usize) -> Option<Self>;
}

macro_rules! impl_integer {
    ($($t:ty),+) => {
        $(
            impl Integer for $t {
                #[inline(always)]
                fn to_usize(self) -> usize {
                    self as usize
                }

                #[inline(always)]
                fn from_usize(v: usize) -> Option<Self> {
                    <$t>::try_from(v).ok()
                }
            }
        )+
    };
}

impl_integer!(u32, u64, i32, i64);

/// Trait for types valid as fixed-width primitive array elements.
///
/// Useful when specifying `my_fn::<T: Primitive>() {}`.
pub trait Primitive: Copy + Default + PartialEq + Debug + Send + Sync + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}
impl Primitive for i32 {}
impl Primitive for i64 {}
impl Primitive for u32 {}
impl Primitive for u64 {}
