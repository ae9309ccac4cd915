//! This module implements the shared `TemporalField` contract and its components.

use alloc::{string::String, sync::Arc};
use core::{fmt, ops::RangeInclusive, str::FromStr};

use serde::{Deserialize, Serialize};
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::{CanonicalYear, Day, Era, Year, YearOfEra},
    error::ErrorMessage,
    TemporalError, TemporalResult, MAX_SAFE_INTEGER,
};

/// The key identifying a temporal field or one of its sub-fields.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Day,
    Year,
    CanonicalYear,
    Era,
    YearOfEra,
}

impl FieldKey {
    /// Returns the field name of this key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Year => "year",
            Self::CanonicalYear => "canonicalYear",
            Self::Era => "era",
            Self::YearOfEra => "yearOfEra",
        }
    }
}

impl FromStr for FieldKey {
    type Err = TemporalError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "year" => Ok(Self::Year),
            "canonicalYear" => Ok(Self::CanonicalYear),
            "era" => Ok(Self::Era),
            "yearOfEra" => Ok(Self::YearOfEra),
            _ => Err(TemporalError::unsupported_field(s)),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value used to replace a field with `with`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Designates the value as an integer.
    Integer(i64),
    /// Designates the value as an era.
    Era(Arc<Era>),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<Arc<Era>> for FieldValue {
    fn from(value: Arc<Era>) -> Self {
        FieldValue::Era(value)
    }
}

impl From<Era> for FieldValue {
    fn from(value: Era) -> Self {
        FieldValue::Era(Arc::new(value))
    }
}

// ==== FieldRange ====

/// An inclusive range of valid field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldRange {
    min: i64,
    max: i64,
}

impl FieldRange {
    /// Creates a new `FieldRange` spanning `min..=max`.
    #[inline]
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// The smallest valid value.
    #[inline]
    #[must_use]
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// The largest valid value.
    #[inline]
    #[must_use]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Returns whether `value` is within the range.
    #[inline]
    #[must_use]
    pub const fn includes(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl From<FieldRange> for RangeInclusive<i64> {
    fn from(value: FieldRange) -> Self {
        value.min..=value.max
    }
}

// ==== Field options ====

/// The caller provided bounds of a field.
///
/// Absent bounds are filled with the defaults of the field kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl FieldOptions {
    /// Creates options with both bounds set.
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Field bounds with every default applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFieldOptions {
    pub(crate) min: i64,
    pub(crate) max: i64,
}

impl ResolvedFieldOptions {
    /// Resolves `options` against the provided default bounds.
    pub fn try_from_options(
        options: FieldOptions,
        default_min: i64,
        default_max: i64,
    ) -> TemporalResult<Self> {
        let min = options.min.unwrap_or(default_min);
        let max = options.max.unwrap_or(default_max);
        if min > max {
            return Err(TemporalError::range().with_enum(ErrorMessage::InvalidFieldOptions));
        }
        Ok(Self { min, max })
    }

    #[inline]
    #[must_use]
    pub const fn min(&self) -> i64 {
        self.min
    }

    #[inline]
    #[must_use]
    pub const fn max(&self) -> i64 {
        self.max
    }
}

impl From<ResolvedFieldOptions> for FieldOptions {
    fn from(value: ResolvedFieldOptions) -> Self {
        Self::new(value.min, value.max)
    }
}

// ==== TemporalField ====

/// The contract shared by every temporal field.
///
/// The display form of a field is provided through [`Writeable`].
pub trait TemporalField: Writeable {
    /// The key identifying the kind of this field.
    fn field_key(&self) -> FieldKey;

    /// Returns the scalar value of this field.
    fn value(&self) -> i64;

    /// Returns the range of valid values of `field`.
    ///
    /// Fails with an `UnsupportedField` error if this field kind does not
    /// recognize `field`.
    fn range(&self, field: FieldKey) -> TemporalResult<FieldRange>;

    /// Returns the range of valid values of the field named `field`.
    fn range_of(&self, field: &str) -> TemporalResult<FieldRange> {
        self.range(field.parse()?)
    }
}

/// The generic temporal field: a field name and its bounds.
///
/// Concrete field kinds build upon `BaseField` for the range of their own
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseField {
    key: FieldKey,
    options: ResolvedFieldOptions,
}

impl BaseField {
    /// Creates a new `BaseField`, defaulting the bounds to
    /// `1..=MAX_SAFE_INTEGER`.
    pub fn try_new(key: FieldKey, options: FieldOptions) -> TemporalResult<Self> {
        let options = ResolvedFieldOptions::try_from_options(options, 1, MAX_SAFE_INTEGER)?;
        Ok(Self::new_unchecked(key, options))
    }

    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(key: FieldKey, options: ResolvedFieldOptions) -> Self {
        Self { key, options }
    }

    #[inline]
    #[must_use]
    pub const fn key(&self) -> FieldKey {
        self.key
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> ResolvedFieldOptions {
        self.options
    }

    /// Returns the bounds of this field if `field` names it.
    pub fn range(&self, field: FieldKey) -> TemporalResult<FieldRange> {
        if field != self.key {
            return Err(TemporalError::unsupported_field(field));
        }
        Ok(FieldRange::new(self.options.min, self.options.max))
    }
}

// ==== AnyField ====

/// Any of the temporal field kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyField {
    Day(Day),
    CanonicalYear(CanonicalYear),
    YearOfEra(YearOfEra),
    Era(Arc<Era>),
}

impl AnyField {
    /// Serializes the field into its JSON `[value, options]` form.
    pub fn to_json(&self) -> TemporalResult<String> {
        match self {
            Self::Day(day) => day.to_json(),
            Self::CanonicalYear(year) => year.to_json(),
            Self::YearOfEra(year) => year.to_json(),
            Self::Era(era) => era.to_json(),
        }
    }
}

impl TemporalField for AnyField {
    fn field_key(&self) -> FieldKey {
        match self {
            Self::Day(day) => day.field_key(),
            Self::CanonicalYear(year) => year.field_key(),
            Self::YearOfEra(year) => year.field_key(),
            Self::Era(era) => era.field_key(),
        }
    }

    fn value(&self) -> i64 {
        match self {
            Self::Day(day) => day.value(),
            Self::CanonicalYear(year) => year.value(),
            Self::YearOfEra(year) => year.value(),
            Self::Era(era) => era.value(),
        }
    }

    fn range(&self, field: FieldKey) -> TemporalResult<FieldRange> {
        match self {
            Self::Day(day) => day.range(field),
            Self::CanonicalYear(year) => year.range(field),
            Self::YearOfEra(year) => year.range(field),
            Self::Era(era) => era.range(field),
        }
    }
}

impl Writeable for AnyField {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        match self {
            Self::Day(day) => day.write_to(sink),
            Self::CanonicalYear(year) => year.write_to(sink),
            Self::YearOfEra(year) => year.write_to(sink),
            Self::Era(era) => era.write_to(sink),
        }
    }

    fn writeable_length_hint(&self) -> LengthHint {
        match self {
            Self::Day(day) => day.writeable_length_hint(),
            Self::CanonicalYear(year) => year.writeable_length_hint(),
            Self::YearOfEra(year) => year.writeable_length_hint(),
            Self::Era(era) => era.writeable_length_hint(),
        }
    }
}

impl_display_with_writeable!(AnyField);

impl From<Day> for AnyField {
    fn from(value: Day) -> Self {
        Self::Day(value)
    }
}

impl From<CanonicalYear> for AnyField {
    fn from(value: CanonicalYear) -> Self {
        Self::CanonicalYear(value)
    }
}

impl From<YearOfEra> for AnyField {
    fn from(value: YearOfEra) -> Self {
        Self::YearOfEra(value)
    }
}

impl From<Arc<Era>> for AnyField {
    fn from(value: Arc<Era>) -> Self {
        Self::Era(value)
    }
}

impl From<Era> for AnyField {
    fn from(value: Era) -> Self {
        Self::Era(Arc::new(value))
    }
}

impl From<Year> for AnyField {
    fn from(value: Year) -> Self {
        match value {
            Year::Canonical(year) => Self::CanonicalYear(year),
            Year::OfEra(year) => Self::YearOfEra(year),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, sync::Arc};
    use core::ops::RangeInclusive;

    use super::{AnyField, BaseField, FieldKey, FieldOptions, FieldRange, TemporalField};
    use crate::{error::ErrorKind, CanonicalYear, Day, Era, EraOptions, MAX_SAFE_INTEGER};

    #[test]
    fn field_key_names() {
        for key in [
            FieldKey::Day,
            FieldKey::Year,
            FieldKey::CanonicalYear,
            FieldKey::Era,
            FieldKey::YearOfEra,
        ] {
            assert_eq!(key.as_str().parse::<FieldKey>(), Ok(key));
        }
        let err = "month".parse::<FieldKey>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedField);
    }

    #[test]
    fn range_bounds() {
        let range = FieldRange::new(-3, 7);
        assert!(range.includes(range.min()));
        assert!(range.includes(range.max()));
        assert!(!range.includes(range.min() - 1));
        assert!(!range.includes(range.max() + 1));

        let inclusive: RangeInclusive<i64> = range.into();
        assert_eq!(inclusive, -3..=7);
    }

    #[test]
    fn base_field_defaults() {
        let field = BaseField::try_new(FieldKey::Day, FieldOptions::default()).unwrap();
        let range = field.range(FieldKey::Day).unwrap();
        assert_eq!(range.min(), 1);
        assert_eq!(range.max(), MAX_SAFE_INTEGER);
    }

    #[test]
    fn base_field_only_ranges_own_field() {
        let field = BaseField::try_new(
            FieldKey::Day,
            FieldOptions {
                min: None,
                max: Some(31),
            },
        )
        .unwrap();
        assert_eq!(field.range(FieldKey::Day), Ok(FieldRange::new(1, 31)));

        let err = field.range(FieldKey::Year).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedField);
        assert!(err.message().contains("year"));
    }

    #[test]
    fn inverted_options_are_rejected() {
        let err = BaseField::try_new(FieldKey::Day, FieldOptions::new(10, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn any_field_dispatch() {
        let era = Arc::new(Era::try_new(2, EraOptions::new("AD").with_min_year(1)).unwrap());
        let fields = [
            AnyField::from(Day::try_new(15, FieldOptions::default()).unwrap()),
            AnyField::from(CanonicalYear::try_new(-44, FieldOptions::default()).unwrap()),
            AnyField::from(era.clone()),
        ];

        assert_eq!(fields[0].field_key(), FieldKey::Day);
        assert_eq!(fields[0].value(), 15);
        assert_eq!(fields[1].field_key(), FieldKey::Year);
        assert_eq!(fields[1].to_string(), "-44");
        assert_eq!(fields[2].value(), 2);
        assert_eq!(fields[2].to_string(), "AD");
        assert_eq!(
            fields[2].range(FieldKey::Year).unwrap().max(),
            era.era_length()
        );

        for field in &fields {
            let err = field.range_of("bogusField").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedField);
        }
    }
}
