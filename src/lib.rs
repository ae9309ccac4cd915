//! The `temporal_fields` crate implements calendar temporal fields as
//! immutable, range validated values.
//!
//! ```rust
//! use std::sync::Arc;
//! use temporal_fields::{
//!     CanonicalYear, Era, EraOptions, FieldKey, FieldOptions, FieldValue, TemporalField, Year,
//!     YearOfEra, YearOfEraOptions,
//! };
//!
//! // Two eras sharing the canonical year line.
//! let bc = Arc::new(
//!     Era::try_new(
//!         1,
//!         EraOptions::new("BC")
//!             .with_min_year(-999_999_999)
//!             .with_max_year(0)
//!             .with_descending(true),
//!     )
//!     .unwrap(),
//! );
//! let ad = Arc::new(Era::try_new(2, EraOptions::new("AD").with_min_year(1)).unwrap());
//!
//! let first_bc = YearOfEra::try_new(1, YearOfEraOptions::new(bc)).unwrap();
//! assert_eq!(first_bc.canonical_year(), 0);
//!
//! let year = CanonicalYear::try_new(1, FieldOptions::default()).unwrap();
//! let Year::OfEra(first_ad) = year.with(FieldKey::Era, FieldValue::Era(ad)).unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(first_ad.to_string(), "1AD");
//! assert_eq!(first_ad.range(FieldKey::Year).unwrap().max(), 999_999_999);
//! ```
//!
//! Every field kind implements [`TemporalField`], which exposes the scalar
//! value of the field and the [`FieldRange`] of its sub-fields. Eras map
//! between era relative years and canonical (proleptic) years in either
//! direction.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::missing_errors_doc,
    clippy::option_if_let_else,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod fields;
pub mod primitive;

mod builtins;

#[doc(hidden)]
pub(crate) mod utils;

#[doc(inline)]
pub use error::TemporalError;

/// The `temporal_fields` result type
pub type TemporalResult<T> = Result<T, TemporalError>;

pub use crate::builtins::{
    CanonicalYear, Day, Era, EraOptions, Year, YearOfEra, YearOfEraOptions, YearOptions,
};

#[doc(inline)]
pub use crate::fields::{
    AnyField, BaseField, FieldKey, FieldOptions, FieldRange, FieldValue, ResolvedFieldOptions,
    TemporalField,
};

#[doc(inline)]
pub use crate::primitive::{as_integer, as_integer_or, is_integer, IntegerLike};

#[doc(hidden)]
#[macro_export]
macro_rules! temporal_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::TemporalError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::TemporalError::assert());
        }
    };
}

// Relevant numeric constants
/// The smallest canonical year representable by ISO 8601 expanded years.
pub const MIN_CANONICAL_YEAR: i64 = -999_999_999;
/// The largest canonical year representable by ISO 8601 expanded years.
pub const MAX_CANONICAL_YEAR: i64 = 999_999_999;
/// The largest integer exactly representable by an IEEE 754 double: 2^53 - 1
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;
/// The smallest integer exactly representable by an IEEE 754 double: -(2^53 - 1)
pub const MIN_SAFE_INTEGER: i64 = -MAX_SAFE_INTEGER;
