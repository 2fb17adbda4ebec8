//! Copyright © 2025 Peter Garfield Bower. All rights reserved.

#![feature(allocator_api)]

//! # **mux-kernels** - *Conditional selection over columnar arrays*
//!
//! Row-wise multiplexing kernels over Arrow-style arrays with validity bitmaps:
//!
//! - [`if_else`] picks between two values per row from a boolean condition.
//! - [`case_when`] picks the value of the first true condition, with an optional default.
//! - [`coalesce`] picks the first non-null value.
//! - [`choose`] picks by integer index.
//!
//! Every argument is a [`Value`]: an array window or a scalar broadcast to
//! the call's length. Outputs are freshly allocated [`Array`]s.
//!
//! Each kernel reduces its selector to runs and copies whole spans when the
//! runs are long, or evaluates row by row otherwise. The `*_with` variants
//! take a [`SelectionPath`] to force either strategy; both produce identical
//! arrays.

pub mod enums {
    pub mod array;
    pub mod arrow_type;
    pub mod error;
    pub mod scalar;
    pub mod value;
    pub mod collections {
        pub mod numeric_array;
        pub mod text_array;
    }
}

pub mod structs {
    pub mod variants {
        pub mod boolean;
        pub mod float;
        pub mod integer;
        pub mod list;
        pub mod string;
    }
    pub mod views {
        pub mod array_view;
    }
    pub mod bitmask;
}

pub mod traits {
    pub mod masked_array;
    pub mod type_unions;
}

pub mod kernels {
    pub mod bitmask;
    pub mod builder;
    pub mod conditional {
        pub mod args;
        pub mod case_when;
        pub mod choose;
        pub mod coalesce;
        pub mod if_else;
        pub mod selection;
    }
    #[cfg(feature = "parallel_proc")]
    pub mod parallel;
}

pub mod aliases;
pub mod config;
pub mod macros;
pub mod utils;

pub use aliases::{BitmaskVT, Length, Offset};

pub use enums::array::Array;
pub use enums::arrow_type::ArrowType;
pub use enums::collections::numeric_array::NumericArray;
pub use enums::collections::text_array::TextArray;
pub use enums::error::KernelError;
pub use enums::scalar::Scalar;
pub use enums::value::Value;

pub use structs::bitmask::Bitmask;
pub use structs::variants::boolean::BooleanArray;
pub use structs::variants::float::FloatArray;
pub use structs::variants::integer::IntegerArray;
pub use structs::variants::list::ListArray;
pub use structs::variants::string::StringArray;
pub use structs::views::array_view::ArrayV;

pub use traits::masked_array::MaskedArray;
pub use traits::type_unions::{Float, Integer, Primitive};

pub use kernels::builder::ArrayBuilder;
pub use kernels::conditional::case_when::{case_when, case_when_with};
pub use kernels::conditional::choose::{choose, choose_with};
pub use kernels::conditional::coalesce::{coalesce, coalesce_with};
pub use kernels::conditional::if_else::{if_else, if_else_with};
pub use kernels::conditional::selection::SelectionPath;
#[cfg(feature = "parallel_proc")]
pub use kernels::parallel::par_chunks;

pub use vec64::Vec64;
