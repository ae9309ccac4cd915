//! This module implements `CanonicalYear`, `YearOfEra` and the `Year` union.

use alloc::{format, string::String, sync::Arc};
use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    error::ErrorMessage,
    fields::{
        BaseField, FieldKey, FieldOptions, FieldRange, FieldValue, ResolvedFieldOptions,
        TemporalField,
    },
    primitive::{as_integer_or, IntegerLike},
    utils::{integer_length_hint, is_valid_canonical_year},
    TemporalError, TemporalResult, MAX_CANONICAL_YEAR, MIN_CANONICAL_YEAR,
};

use super::era::{Era, EraOptions};

// ==== YearOfEra ====

/// The options used to create a [`YearOfEra`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearOfEraOptions {
    /// The era of the year.
    pub era: Arc<Era>,
    /// Whether the provided value is a canonical year rather than a year of
    /// the era.
    pub canonical_year: bool,
}

impl YearOfEraOptions {
    /// Options for a value counted from the start of `era`.
    pub fn new(era: Arc<Era>) -> Self {
        Self {
            era,
            canonical_year: false,
        }
    }

    /// Options for a canonical year value within `era`.
    pub fn canonical(era: Arc<Era>) -> Self {
        Self {
            era,
            canonical_year: true,
        }
    }
}

/// A year scoped to an [`Era`].
///
/// The year is 1-based and always within `1..=era.era_length()`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearOfEra {
    year: i64,
    era: Arc<Era>,
}

impl YearOfEra {
    /// Creates a new `YearOfEra`.
    ///
    /// When `options.canonical_year` is set, `value` is a canonical year
    /// that must fall within the era.
    pub fn try_new<V: IntegerLike>(value: V, options: YearOfEraOptions) -> TemporalResult<Self> {
        let value = as_integer_or(
            &value,
            TemporalError::r#type()
                .with_message("Cannot create a year of era from non-integer value"),
        )?;
        let YearOfEraOptions {
            era,
            canonical_year,
        } = options;

        let year = if canonical_year {
            era.year_of(value)?
        } else {
            if !era.contains_year(value) {
                return Err(TemporalError::range().with_message(format!(
                    "Year {value} is not within 1..={} of the era {}.",
                    era.era_length(),
                    era.suffix()
                )));
            }
            value
        };

        Ok(Self::new_unchecked(year, era))
    }

    #[inline]
    #[must_use]
    pub(crate) fn new_unchecked(year: i64, era: Arc<Era>) -> Self {
        Self { year, era }
    }

    /// Returns the year of the era.
    #[inline]
    #[must_use]
    pub const fn year(&self) -> i64 {
        self.year
    }

    /// Returns the era of this year.
    #[inline]
    #[must_use]
    pub fn era(&self) -> &Arc<Era> {
        &self.era
    }

    /// Returns the canonical year of this year.
    #[inline]
    #[must_use]
    pub fn canonical_year(&self) -> i64 {
        self.era.canonical_year_unchecked(self.year)
    }

    /// Returns the options reconstructing this year.
    #[must_use]
    pub fn options(&self) -> YearOfEraOptions {
        YearOfEraOptions::new(self.era.clone())
    }

    /// Converts this year into a `CanonicalYear` with the default bounds.
    pub fn to_canonical_year(&self) -> TemporalResult<CanonicalYear> {
        CanonicalYear::try_new(self.canonical_year(), FieldOptions::default())
    }

    /// Expresses the same canonical year as a year of `era`.
    ///
    /// Fails with an `UnsupportedField` error if the canonical year does not
    /// fall within `era`.
    pub fn with_era(&self, era: &Arc<Era>) -> TemporalResult<Self> {
        canonical_year_in_era(self.canonical_year(), era)
    }

    /// Serializes this year as `[year, {"era": [era, options]}]`.
    pub fn to_json(&self) -> TemporalResult<String> {
        let record = YearOfEraRecord {
            era: (self.era.era(), self.era.options()),
            canonical_year: false,
        };
        Ok(serde_json::to_string(&(self.year, record))?)
    }

    /// Creates a `YearOfEra` from its JSON form.
    pub fn from_json(json: &str) -> TemporalResult<Self> {
        let (value, record): (Value, YearOfEraRecord<Value>) = serde_json::from_str(json)?;
        let (era_value, era_options) = record.era;
        let era = Arc::new(Era::try_new(era_value, era_options)?);
        let options = YearOfEraOptions {
            era,
            canonical_year: record.canonical_year,
        };
        Self::try_new(value, options)
    }
}

/// The JSON options of a `YearOfEra`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YearOfEraRecord<V> {
    era: (V, EraOptions),
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    canonical_year: bool,
}

fn canonical_year_in_era(canonical_year: i64, era: &Arc<Era>) -> TemporalResult<YearOfEra> {
    if !era.contains_canonical_year(canonical_year) {
        #[cfg(feature = "log")]
        log::trace!(
            "canonical year {canonical_year} is outside of the era {}",
            era.suffix()
        );
        return Err(
            TemporalError::unsupported_field(FieldKey::Era).with_message(format!(
                "Canonical year {canonical_year} is not within the era {}.",
                era.suffix()
            )),
        );
    }
    let year = era.year_of(canonical_year)?;
    Ok(YearOfEra::new_unchecked(year, era.clone()))
}

impl TemporalField for YearOfEra {
    fn field_key(&self) -> FieldKey {
        FieldKey::YearOfEra
    }

    fn value(&self) -> i64 {
        self.year
    }

    fn range(&self, field: FieldKey) -> TemporalResult<FieldRange> {
        match field {
            FieldKey::Year | FieldKey::YearOfEra => self.era.range(FieldKey::Year),
            FieldKey::CanonicalYear | FieldKey::Era => self.era.range(field),
            FieldKey::Day => Err(TemporalError::unsupported_field(field)),
        }
    }
}

impl Writeable for YearOfEra {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write!(sink, "{}", self.year)?;
        self.era.write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        integer_length_hint(self.year) + self.era.writeable_length_hint()
    }
}

impl_display_with_writeable!(YearOfEra);

// ==== CanonicalYear ====

/// A canonical (proleptic) year, independent of any era.
///
/// The bounds default to `MIN_CANONICAL_YEAR..=MAX_CANONICAL_YEAR`.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalYear {
    year: i64,
    field: BaseField,
}

impl CanonicalYear {
    /// Creates a new `CanonicalYear`.
    pub fn try_new<V: IntegerLike>(value: V, options: FieldOptions) -> TemporalResult<Self> {
        let year = as_integer_or(
            &value,
            TemporalError::r#type().with_message("Invalid canonical year"),
        )?;
        let options = ResolvedFieldOptions::try_from_options(
            options,
            MIN_CANONICAL_YEAR,
            MAX_CANONICAL_YEAR,
        )?;
        if !is_valid_canonical_year(options.min()) || !is_valid_canonical_year(options.max()) {
            return Err(TemporalError::range().with_enum(ErrorMessage::CanonicalYearOutOfRange));
        }
        if !(options.min()..=options.max()).contains(&year) {
            return Err(TemporalError::range().with_message(format!(
                "Canonical year {year} is not within {}..={}.",
                options.min(),
                options.max()
            )));
        }
        Ok(Self {
            year,
            field: BaseField::new_unchecked(FieldKey::Year, options),
        })
    }

    #[inline]
    #[must_use]
    pub const fn year(&self) -> i64 {
        self.year
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> ResolvedFieldOptions {
        self.field.options()
    }

    /// Returns a new `Year` with `field` replaced by `value`.
    ///
    /// Replacing the era yields a `YearOfEra`; replacing the year yields a
    /// `CanonicalYear` with the same options.
    pub fn with(&self, field: FieldKey, value: FieldValue) -> TemporalResult<Year> {
        match (field, value) {
            (FieldKey::Era, FieldValue::Era(era)) => self.with_era(&era).map(Year::OfEra),
            (FieldKey::Year | FieldKey::CanonicalYear, FieldValue::Integer(year)) => {
                self.with_year(year).map(Year::Canonical)
            }
            (FieldKey::Era | FieldKey::Year | FieldKey::CanonicalYear, _) => {
                Err(TemporalError::r#type()
                    .with_message(format!("Invalid value provided for the {field} field.")))
            }
            (field, _) => Err(TemporalError::unsupported_field(field)),
        }
    }

    /// Returns this year as a year of `era`.
    ///
    /// Fails with an `UnsupportedField` error if the year does not fall
    /// within `era`.
    pub fn with_era(&self, era: &Arc<Era>) -> TemporalResult<YearOfEra> {
        canonical_year_in_era(self.year, era)
    }

    /// Returns a new `CanonicalYear` with the same options.
    pub fn with_year<V: IntegerLike>(&self, year: V) -> TemporalResult<Self> {
        Self::try_new(year, self.options().into())
    }

    /// Serializes this year as `[year, options]`.
    pub fn to_json(&self) -> TemporalResult<String> {
        Ok(serde_json::to_string(&(
            self.year,
            FieldOptions::from(self.options()),
        ))?)
    }

    /// Creates a `CanonicalYear` from its `[year, options]` JSON form.
    pub fn from_json(json: &str) -> TemporalResult<Self> {
        let (value, options): (Value, FieldOptions) = serde_json::from_str(json)?;
        Self::try_new(value, options)
    }
}

impl TemporalField for CanonicalYear {
    fn field_key(&self) -> FieldKey {
        FieldKey::Year
    }

    fn value(&self) -> i64 {
        self.year
    }

    fn range(&self, field: FieldKey) -> TemporalResult<FieldRange> {
        match field {
            FieldKey::CanonicalYear => self.field.range(FieldKey::Year),
            _ => self.field.range(field),
        }
    }
}

impl Writeable for CanonicalYear {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write!(sink, "{}", self.year)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        integer_length_hint(self.year)
    }
}

impl_display_with_writeable!(CanonicalYear);

// ==== Year ====

/// The options used to create a [`Year`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct YearOptions {
    /// The era of the year. Without an era the year is canonical.
    pub era: Option<Arc<Era>>,
    /// Whether the provided value is a canonical year. Only used with an era.
    pub canonical_year: bool,
    /// The bounds of a canonical year. Only used without an era.
    pub field: FieldOptions,
}

impl YearOptions {
    pub fn with_era(mut self, era: Arc<Era>) -> Self {
        self.era = Some(era);
        self
    }

    pub fn with_canonical_year(mut self, canonical_year: bool) -> Self {
        self.canonical_year = canonical_year;
        self
    }
}

/// Either a canonical year or a year of an era.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Year {
    Canonical(CanonicalYear),
    OfEra(YearOfEra),
}

impl Year {
    /// Creates a `YearOfEra` if `options.era` is provided, otherwise a
    /// `CanonicalYear`.
    pub fn try_new<V: IntegerLike>(value: V, options: YearOptions) -> TemporalResult<Self> {
        match options.era {
            Some(era) => YearOfEra::try_new(
                value,
                YearOfEraOptions {
                    era,
                    canonical_year: options.canonical_year,
                },
            )
            .map(Self::OfEra),
            None => CanonicalYear::try_new(value, options.field).map(Self::Canonical),
        }
    }

    /// Returns the canonical year of this year.
    #[inline]
    #[must_use]
    pub fn canonical_year(&self) -> i64 {
        match self {
            Self::Canonical(year) => year.year(),
            Self::OfEra(year) => year.canonical_year(),
        }
    }

    /// Returns the era of this year, if any.
    #[inline]
    #[must_use]
    pub fn era(&self) -> Option<&Arc<Era>> {
        match self {
            Self::Canonical(_) => None,
            Self::OfEra(year) => Some(year.era()),
        }
    }
}

impl TemporalField for Year {
    fn field_key(&self) -> FieldKey {
        match self {
            Self::Canonical(year) => year.field_key(),
            Self::OfEra(year) => year.field_key(),
        }
    }

    fn value(&self) -> i64 {
        match self {
            Self::Canonical(year) => year.value(),
            Self::OfEra(year) => year.value(),
        }
    }

    fn range(&self, field: FieldKey) -> TemporalResult<FieldRange> {
        match self {
            Self::Canonical(year) => year.range(field),
            Self::OfEra(year) => year.range(field),
        }
    }
}

impl Writeable for Year {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        match self {
            Self::Canonical(year) => year.write_to(sink),
            Self::OfEra(year) => year.write_to(sink),
        }
    }

    fn writeable_length_hint(&self) -> LengthHint {
        match self {
            Self::Canonical(year) => year.writeable_length_hint(),
            Self::OfEra(year) => year.writeable_length_hint(),
        }
    }
}

impl_display_with_writeable!(Year);

impl From<CanonicalYear> for Year {
    fn from(value: CanonicalYear) -> Self {
        Self::Canonical(value)
    }
}

impl From<YearOfEra> for Year {
    fn from(value: YearOfEra) -> Self {
        Self::OfEra(value)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, sync::Arc};

    use super::{CanonicalYear, Year, YearOfEra, YearOfEraOptions, YearOptions};
    use crate::{
        error::ErrorKind,
        fields::{FieldKey, FieldOptions, FieldValue, TemporalField},
        Era, EraOptions, MAX_CANONICAL_YEAR, MIN_CANONICAL_YEAR,
    };

    fn eras() -> (Arc<Era>, Arc<Era>) {
        let bc = Era::try_new(
            1,
            EraOptions::new("BC")
                .with_min_year(MIN_CANONICAL_YEAR)
                .with_max_year(0)
                .with_descending(true),
        )
        .unwrap();
        let ad = Era::try_new(
            2,
            EraOptions::new("AD")
                .with_min_year(1)
                .with_max_year(MAX_CANONICAL_YEAR),
        )
        .unwrap();
        (Arc::new(bc), Arc::new(ad))
    }

    #[test]
    fn first_years_of_bc_and_ad() {
        let (bc, ad) = eras();
        let ad1 = YearOfEra::try_new(1, YearOfEraOptions::new(ad.clone())).unwrap();
        assert_eq!(ad1.canonical_year(), 1);
        assert_eq!(ad1.to_string(), "1AD");
        assert!(Arc::ptr_eq(ad1.era(), &ad));

        let bc1 = YearOfEra::try_new(1, YearOfEraOptions::new(bc)).unwrap();
        assert_eq!(bc1.canonical_year(), 0);
        assert_eq!(bc1.to_string(), "1BC");
    }

    #[test]
    fn simple_years_of_era() {
        let (_, ad) = eras();
        for value in [1i64, 15, 31, 365, 366] {
            let year = YearOfEra::try_new(value, YearOfEraOptions::new(ad.clone())).unwrap();
            assert_eq!(year.year(), value);
            assert_eq!(year.value(), value);
            assert_eq!(year.canonical_year(), value);
        }
    }

    #[test]
    fn year_of_era_out_of_range() {
        let (bc, ad) = eras();
        let err = YearOfEra::try_new(0, YearOfEraOptions::new(ad.clone())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err =
            YearOfEra::try_new(1_000_000_001i64, YearOfEraOptions::new(bc.clone())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = YearOfEra::try_new(0, YearOfEraOptions::canonical(ad)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = YearOfEra::try_new(2.5, YearOfEraOptions::new(bc)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn canonical_year_values() {
        let (bc, ad) = eras();
        let year = YearOfEra::try_new(-43, YearOfEraOptions::canonical(bc)).unwrap();
        assert_eq!(year.year(), 44);
        assert_eq!(year.canonical_year(), -43);
        assert_eq!(year.to_string(), "44BC");

        let year = YearOfEra::try_new(2024, YearOfEraOptions::canonical(ad)).unwrap();
        assert_eq!(year.year(), 2024);
    }

    #[test]
    fn year_of_era_ranges() {
        let (bc, _) = eras();
        let year = YearOfEra::try_new(10, YearOfEraOptions::new(bc.clone())).unwrap();
        assert_eq!(year.range(FieldKey::Year).unwrap().max(), bc.era_length());
        assert_eq!(year.range(FieldKey::YearOfEra), year.range(FieldKey::Year));
        assert_eq!(
            year.range(FieldKey::CanonicalYear).unwrap().min(),
            MIN_CANONICAL_YEAR
        );
        assert_eq!(year.range(FieldKey::Era), bc.range(FieldKey::Era));
        let err = year.range(FieldKey::Day).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedField);
    }

    #[test]
    fn year_of_era_with_era() {
        let (bc, ad) = eras();
        let year = YearOfEra::try_new(5, YearOfEraOptions::new(ad.clone())).unwrap();
        let err = year.with_era(&bc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedField);

        let era = Arc::new(Era::try_new(3, EraOptions::new("X").with_min_year(-10)).unwrap());
        let moved = year.with_era(&era).unwrap();
        assert_eq!(moved.year(), 16);
        assert_eq!(moved.canonical_year(), 5);
        assert_eq!(moved.to_canonical_year().unwrap().year(), 5);
    }

    #[test]
    fn canonical_years() {
        for value in [MIN_CANONICAL_YEAR, 1, 15, 31, 365, 366, MAX_CANONICAL_YEAR] {
            let year = CanonicalYear::try_new(value, FieldOptions::default()).unwrap();
            assert_eq!(year.year(), value);
            assert_eq!(year.value(), value);
            assert_eq!(year.field_key(), FieldKey::Year);
        }
    }

    #[test]
    fn canonical_year_rejections() {
        let err = CanonicalYear::try_new("1", FieldOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.message(), "Invalid canonical year");

        let err = CanonicalYear::try_new(MAX_CANONICAL_YEAR + 1, FieldOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = CanonicalYear::try_new(2000, FieldOptions::new(1, 1999)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = CanonicalYear::try_new(
            0,
            FieldOptions {
                min: Some(MIN_CANONICAL_YEAR - 1),
                max: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn canonical_year_ranges() {
        let year = CanonicalYear::try_new(1, FieldOptions::default()).unwrap();
        let range = year.range(FieldKey::Year).unwrap();
        assert_eq!(range.min(), MIN_CANONICAL_YEAR);
        assert_eq!(range.max(), MAX_CANONICAL_YEAR);
        assert_eq!(year.range(FieldKey::CanonicalYear), Ok(range));
        let err = year.range(FieldKey::Era).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedField);
    }

    #[test]
    fn canonical_year_with_era() {
        let (bc, ad) = eras();
        let year = CanonicalYear::try_new(1, FieldOptions::default()).unwrap();

        let with_ad = year.with(FieldKey::Era, FieldValue::Era(ad)).unwrap();
        assert_eq!(with_ad.to_string(), "1AD");
        assert_eq!(with_ad.canonical_year(), 1);

        let err = year.with(FieldKey::Era, FieldValue::Era(bc.clone())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedField);

        let zero = CanonicalYear::try_new(0, FieldOptions::default()).unwrap();
        let Year::OfEra(bc1) = zero.with(FieldKey::Era, bc.into()).unwrap() else {
            panic!("expected a year of era");
        };
        assert_eq!(bc1.year(), 1);
    }

    #[test]
    fn canonical_year_with_year() {
        let year = CanonicalYear::try_new(10, FieldOptions::new(-100, 100)).unwrap();
        let Year::Canonical(other) = year.with(FieldKey::Year, 50i64.into()).unwrap() else {
            panic!("expected a canonical year");
        };
        assert_eq!(other.year(), 50);
        assert_eq!(other.options(), year.options());

        let err = year.with(FieldKey::Year, 101i64.into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = year.with(FieldKey::Era, 1i64.into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);

        let err = year.with(FieldKey::Day, 1i64.into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedField);
    }

    #[test]
    fn year_dispatch() {
        let (bc, _) = eras();
        let year = Year::try_new(2024, YearOptions::default()).unwrap();
        assert!(matches!(year, Year::Canonical(_)));
        assert!(year.era().is_none());

        let year = Year::try_new(44, YearOptions::default().with_era(bc.clone())).unwrap();
        assert!(matches!(year, Year::OfEra(_)));
        assert_eq!(year.canonical_year(), -43);
        assert_eq!(year.field_key(), FieldKey::YearOfEra);

        let year = Year::try_new(
            -43,
            YearOptions::default()
                .with_era(bc)
                .with_canonical_year(true),
        )
        .unwrap();
        assert_eq!(year.value(), 44);
        assert_eq!(year.to_string(), "44BC");
    }

    #[test]
    fn json_round_trips() {
        let year = CanonicalYear::try_new(-500, FieldOptions::new(-1000, 1000)).unwrap();
        let json = year.to_json().unwrap();
        assert_eq!(json, r#"[-500,{"min":-1000,"max":1000}]"#);
        assert_eq!(CanonicalYear::from_json(&json).unwrap(), year);

        let (bc, _) = eras();
        let year = YearOfEra::try_new(44, YearOfEraOptions::new(bc)).unwrap();
        let json = year.to_json().unwrap();
        assert!(json.starts_with(r#"[44,{"era":[1,{"suffix":"BC""#));
        assert_eq!(YearOfEra::from_json(&json).unwrap(), year);

        let year = YearOfEra::from_json(
            r#"[-43, {
                "era": [1, {"suffix": "BC", "maxYear": 0, "eraLength": 1000, "descending": true}],
                "canonicalYear": true
            }]"#,
        )
        .unwrap();
        assert_eq!(year.year(), 44);
        assert_eq!(year.era().min_year(), -999);
    }
}
