//! The temporal field kinds provided by `temporal_fields`.
//!
//! Every field is an immutable value produced by a validating constructor.
//! Years of an era share their [`Era`] through an `Arc`.

mod day;
mod era;
mod year;

#[doc(inline)]
pub use day::Day;
#[doc(inline)]
pub use era::{Era, EraOptions};
#[doc(inline)]
pub use year::{CanonicalYear, Year, YearOfEra, YearOfEraOptions, YearOptions};
