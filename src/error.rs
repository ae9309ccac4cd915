//! This module implements `TemporalError`.

use alloc::{borrow::Cow, format};
use core::fmt;

/// `TemporalError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// TypeError: a value that should have been an integer was not.
    Type,
    /// RangeError: a value was outside of its valid range, or the
    /// provided options contradict each other.
    Range,
    /// SyntaxError
    Syntax,
    /// A field name was not recognized by the field kind.
    UnsupportedField,
    /// An internal invariant was broken.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Type => "TypeError",
            Self::Range => "RangeError",
            Self::Syntax => "SyntaxError",
            Self::UnsupportedField => "UnsupportedTemporalFieldError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// Messages shared by several validation sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorMessage {
    NotAnInteger,
    IntegerNotRepresentable,
    CanonicalYearOutOfRange,
    InvalidFieldOptions,
    EraSuffixMissing,
    EraSuffixInvalid,
    EraYearsMissing,
}

impl ErrorMessage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotAnInteger => "Not an integer value",
            Self::IntegerNotRepresentable => {
                "Integer value cannot be represented as a field value."
            }
            Self::CanonicalYearOutOfRange => {
                "Canonical year is outside of the ISO 8601 representable range."
            }
            Self::InvalidFieldOptions => "Field option min must not be greater than max.",
            Self::EraSuffixMissing => "Required era suffix field is empty.",
            Self::EraSuffixInvalid => "Era suffix must be 1 to 16 ASCII characters.",
            Self::EraYearsMissing => "Required fields missing to determine the era years.",
        }
    }
}

/// The error type for `temporal_fields`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl TemporalError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Create a generic error
    #[inline]
    #[must_use]
    pub fn general(msg: &'static str) -> Self {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a type error.
    #[inline]
    #[must_use]
    pub const fn r#type() -> Self {
        Self::new(ErrorKind::Type)
    }

    /// Create a syntax error.
    #[inline]
    #[must_use]
    pub const fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Creates an assertion error
    #[inline]
    #[must_use]
    pub(crate) const fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Create an unsupported field error naming the requested field.
    #[inline]
    #[must_use]
    pub fn unsupported_field(field: impl fmt::Display) -> Self {
        Self::new(ErrorKind::UnsupportedField)
            .with_message(format!("Unsupported temporal field: {field}"))
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Add a shared message to the error.
    #[inline]
    #[must_use]
    pub fn with_enum(mut self, msg: ErrorMessage) -> Self {
        self.msg = Cow::Borrowed(msg.as_str());
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for TemporalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for TemporalError {}

impl From<serde_json::Error> for TemporalError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        let error = match err.classify() {
            // Well formed JSON with an unexpected shape.
            Category::Data => Self::r#type(),
            Category::Syntax | Category::Eof => Self::syntax(),
            Category::Io => Self::general("JSON input could not be read"),
        };
        error.with_message(format!("{err}"))
    }
}
