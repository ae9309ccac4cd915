//! This module implements `Era` and the canonical year arithmetic of eras.

use alloc::{format, string::String};
use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tinystr::TinyAsciiStr;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    error::ErrorMessage,
    fields::{FieldKey, FieldRange, TemporalField},
    primitive::{as_integer_or, IntegerLike},
    temporal_assert,
    utils::{is_valid_canonical_year, CANONICAL_YEAR_COUNT},
    TemporalError, TemporalResult, MAX_CANONICAL_YEAR, MAX_SAFE_INTEGER, MIN_SAFE_INTEGER,
};

/// The options used to create an [`Era`].
///
/// `suffix` is required. The years of the era are determined from
/// `min_year`, `max_year` and `era_length`; at least `min_year`, or
/// `max_year` together with `era_length`, must be provided.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EraOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub era_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descending: Option<bool>,
}

impl EraOptions {
    /// Creates options with the provided suffix.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: Some(suffix.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_min_year(mut self, year: i64) -> Self {
        self.min_year = Some(year);
        self
    }

    pub fn with_max_year(mut self, year: i64) -> Self {
        self.max_year = Some(year);
        self
    }

    pub fn with_era_length(mut self, length: i64) -> Self {
        self.era_length = Some(length);
        self
    }

    pub fn with_descending(mut self, descending: bool) -> Self {
        self.descending = Some(descending);
        self
    }
}

/// The years of an era once resolved from `EraOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EraYears {
    min_year: i64,
    max_year: i64,
    era_length: i64,
    descending: bool,
}

impl EraYears {
    fn try_from_options(options: &EraOptions) -> TemporalResult<Self> {
        if let Some(length) = options.era_length {
            if !(1..=CANONICAL_YEAR_COUNT).contains(&length) {
                return Err(TemporalError::range()
                    .with_message(format!("eraLength {length} is not a valid era length.")));
            }
        }
        for (name, year) in [("minYear", options.min_year), ("maxYear", options.max_year)] {
            if let Some(year) = year {
                if !is_valid_canonical_year(year) {
                    return Err(TemporalError::range().with_message(format!(
                        "{name} {year} is outside of the canonical year range."
                    )));
                }
            }
        }

        let (first, last) = match (options.min_year, options.max_year, options.era_length) {
            (Some(min_year), Some(max_year), _) => (min_year, max_year),
            // A descending era counts down from its first year.
            (Some(min_year), None, Some(length)) if options.descending == Some(true) => {
                (min_year, min_year - length + 1)
            }
            (Some(min_year), None, Some(length)) => (min_year, min_year + length - 1),
            (Some(min_year), None, None) => (min_year, MAX_CANONICAL_YEAR),
            (None, Some(max_year), Some(length)) => (max_year - length + 1, max_year),
            (None, Some(_), None) => {
                return Err(TemporalError::range()
                    .with_message("eraLength is required when minYear is not provided."));
            }
            (None, None, _) => {
                return Err(TemporalError::r#type().with_enum(ErrorMessage::EraYearsMissing));
            }
        };

        if !is_valid_canonical_year(first) || !is_valid_canonical_year(last) {
            return Err(TemporalError::range().with_enum(ErrorMessage::CanonicalYearOutOfRange));
        }

        let swapped = last < first;
        let (min_year, max_year) = if swapped {
            #[cfg(feature = "log")]
            log::debug!("era years {first}..={last} are in descending order, swapping.");
            (last, first)
        } else {
            (first, last)
        };

        let descending = match (options.descending, swapped) {
            (Some(false), true) => {
                return Err(TemporalError::range().with_message(
                    "maxYear is before minYear, but the era was declared ascending.",
                ));
            }
            (Some(descending), false) => descending,
            (_, swapped) => swapped,
        };

        let era_length = max_year - min_year + 1;
        if let Some(length) = options.era_length {
            if length != era_length {
                return Err(TemporalError::range().with_message(format!(
                    "eraLength {length} does not match the era years {min_year}..={max_year}."
                )));
            }
        }

        Ok(Self {
            min_year,
            max_year,
            era_length,
            descending,
        })
    }
}

/// An era: a named, contiguous span of canonical years with a direction.
///
/// Years of an ascending era count up from `min_year`, while years of a
/// descending era count down from `max_year`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Era {
    value: i64,
    name: Option<String>,
    suffix: TinyAsciiStr<16>,
    min_year: i64,
    max_year: i64,
    era_length: i64,
    descending: bool,
}

impl Era {
    /// Creates a new `Era`.
    pub fn try_new<V: IntegerLike>(era_value: V, options: EraOptions) -> TemporalResult<Self> {
        let value = as_integer_or(
            &era_value,
            TemporalError::r#type().with_message("Cannot create an era from non-integer value"),
        )?;

        let suffix = options
            .suffix
            .as_deref()
            .ok_or(TemporalError::r#type().with_enum(ErrorMessage::EraSuffixMissing))?;
        if suffix.is_empty() {
            return Err(TemporalError::range().with_enum(ErrorMessage::EraSuffixInvalid));
        }
        let suffix = TinyAsciiStr::<16>::try_from_str(suffix)
            .map_err(|_| TemporalError::range().with_enum(ErrorMessage::EraSuffixInvalid))?;

        let years = EraYears::try_from_options(&options)?;

        Ok(Self {
            value,
            name: options.name,
            suffix,
            min_year: years.min_year,
            max_year: years.max_year,
            era_length: years.era_length,
            descending: years.descending,
        })
    }

    /// Returns the era value.
    #[inline]
    #[must_use]
    pub const fn era(&self) -> i64 {
        self.value
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn suffix(&self) -> &str {
        self.suffix.as_str()
    }

    /// Returns the first canonical year of the era.
    #[inline]
    #[must_use]
    pub const fn min_year(&self) -> i64 {
        self.min_year
    }

    /// Returns the last canonical year of the era.
    #[inline]
    #[must_use]
    pub const fn max_year(&self) -> i64 {
        self.max_year
    }

    /// Returns the number of years in the era.
    #[inline]
    #[must_use]
    pub const fn era_length(&self) -> i64 {
        self.era_length
    }

    #[inline]
    #[must_use]
    pub const fn is_descending(&self) -> bool {
        self.descending
    }

    /// Returns the fully resolved options of this era.
    #[must_use]
    pub fn options(&self) -> EraOptions {
        EraOptions {
            suffix: Some(String::from(self.suffix.as_str())),
            name: self.name.clone(),
            min_year: Some(self.min_year),
            max_year: Some(self.max_year),
            era_length: Some(self.era_length),
            descending: Some(self.descending),
        }
    }

    /// Returns whether the canonical year falls within the era.
    #[inline]
    #[must_use]
    pub fn contains_canonical_year(&self, canonical_year: i64) -> bool {
        (self.min_year..=self.max_year).contains(&canonical_year)
    }

    /// Returns whether `year` is a valid year of the era.
    #[inline]
    #[must_use]
    pub fn contains_year(&self, year: i64) -> bool {
        (1..=self.era_length).contains(&year)
    }

    /// Returns the canonical year of the provided year of the era.
    pub fn canonical_year_of(&self, year: i64) -> TemporalResult<i64> {
        if !self.contains_year(year) {
            return Err(TemporalError::range().with_message(format!(
                "Year {year} is not valid for the era {}.",
                self.suffix.as_str()
            )));
        }
        let canonical_year = self.canonical_year_unchecked(year);
        temporal_assert!(
            self.contains_canonical_year(canonical_year),
            "year {year} of era {} mapped outside of the era.",
            self.suffix.as_str()
        );
        Ok(canonical_year)
    }

    /// Returns the year of the era of the provided canonical year.
    pub fn year_of(&self, canonical_year: i64) -> TemporalResult<i64> {
        if !self.contains_canonical_year(canonical_year) {
            return Err(TemporalError::range().with_message(format!(
                "Canonical year {canonical_year} is not within the era {}.",
                self.suffix.as_str()
            )));
        }
        let year = if self.descending {
            self.max_year - canonical_year + 1
        } else {
            canonical_year - self.min_year + 1
        };
        temporal_assert!(
            self.contains_year(year),
            "canonical year {canonical_year} mapped outside of the era {}.",
            self.suffix.as_str()
        );
        Ok(year)
    }

    /// Maps a year of the era onto the canonical year line.
    ///
    /// `year` must be within `1..=era_length`.
    #[inline]
    pub(crate) fn canonical_year_unchecked(&self, year: i64) -> i64 {
        if self.descending {
            self.max_year - year + 1
        } else {
            self.min_year + year - 1
        }
    }

    /// Serializes this era as `[era, options]`.
    pub fn to_json(&self) -> TemporalResult<String> {
        Ok(serde_json::to_string(&(self.value, self.options()))?)
    }

    /// Creates an `Era` from its `[era, options]` JSON form.
    pub fn from_json(json: &str) -> TemporalResult<Self> {
        let (value, options): (Value, EraOptions) = serde_json::from_str(json)?;
        Self::try_new(value, options)
    }
}

impl TemporalField for Era {
    fn field_key(&self) -> FieldKey {
        FieldKey::Era
    }

    fn value(&self) -> i64 {
        self.value
    }

    fn range(&self, field: FieldKey) -> TemporalResult<FieldRange> {
        match field {
            FieldKey::Era => Ok(FieldRange::new(MIN_SAFE_INTEGER, MAX_SAFE_INTEGER)),
            FieldKey::CanonicalYear => Ok(FieldRange::new(self.min_year, self.max_year)),
            FieldKey::Year => Ok(FieldRange::new(1, self.era_length)),
            _ => Err(TemporalError::unsupported_field(field)),
        }
    }
}

impl Writeable for Era {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        sink.write_str(self.suffix.as_str())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(self.suffix.len())
    }
}

impl_display_with_writeable!(Era);
