//! This module implements `Day` and its JSON representation.

use alloc::string::String;
use core::fmt;

use serde_json::Value;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    fields::{BaseField, FieldKey, FieldOptions, FieldRange, ResolvedFieldOptions, TemporalField},
    primitive::{as_integer_or, IntegerLike},
    utils::integer_length_hint,
    TemporalError, TemporalResult,
};

/// A day field.
///
/// The bounds default to `1..=MAX_SAFE_INTEGER`.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Day {
    day: i64,
    field: BaseField,
}

impl Day {
    /// Creates a new `Day`.
    ///
    /// The day value is not checked against the bounds of `options`; use
    /// [`Day::is_in_range`] to test it.
    pub fn try_new<V: IntegerLike>(value: V, options: FieldOptions) -> TemporalResult<Self> {
        let day = as_integer_or(
            &value,
            TemporalError::r#type().with_message("Cannot create a day from non-integer value"),
        )?;
        let field = BaseField::try_new(FieldKey::Day, options)?;
        // TODO: decide whether construction should reject days outside of the option bounds.
        Ok(Self { day, field })
    }

    /// Returns the day value.
    #[inline]
    #[must_use]
    pub const fn day(&self) -> i64 {
        self.day
    }

    /// Returns the resolved options of this `Day`.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> ResolvedFieldOptions {
        self.field.options()
    }

    /// Returns whether the day value lies within its bounds.
    #[inline]
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        let options = self.options();
        (options.min()..=options.max()).contains(&self.day)
    }

    /// Serializes this `Day` as `[day, options]`.
    pub fn to_json(&self) -> TemporalResult<String> {
        Ok(serde_json::to_string(&(
            self.day,
            FieldOptions::from(self.options()),
        ))?)
    }

    /// Creates a `Day` from its `[day, options]` JSON form.
    pub fn from_json(json: &str) -> TemporalResult<Self> {
        let (value, options): (Value, FieldOptions) = serde_json::from_str(json)?;
        Self::try_new(value, options)
    }
}

impl TemporalField for Day {
    fn field_key(&self) -> FieldKey {
        FieldKey::Day
    }

    fn value(&self) -> i64 {
        self.day
    }

    fn range(&self, field: FieldKey) -> TemporalResult<FieldRange> {
        self.field.range(field)
    }
}

impl Writeable for Day {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write!(sink, "{}", self.day)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        integer_length_hint(self.day)
    }
}

impl_display_with_writeable!(Day);
