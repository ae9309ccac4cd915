//! Implementation of the integer guard used to validate raw field values.
//!
//! Field values arrive as any integer-like primitive, a float, or a decoded
//! JSON value. The guard classifies such values and either yields the
//! validated `i64` or reports why the value cannot be used.

use alloc::string::String;

use core_maths::CoreFloat;
use num_traits::ToPrimitive;
use serde_json::{Number, Value};

use crate::{error::ErrorMessage, TemporalError, TemporalResult, MAX_SAFE_INTEGER};

/// The classification of a raw value by the integer guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerClass {
    /// The value is an integer representable as an `i64`.
    Integer(i64),
    /// The value is an integer, but too large to be used as a field value.
    Unrepresentable,
    /// The value is not an integer.
    NotInteger,
}

/// A value that may be classified as an integer.
pub trait IntegerLike {
    /// Classify the value.
    fn classify_integer(&self) -> IntegerClass;
}

impl<T: IntegerLike + ?Sized> IntegerLike for &T {
    #[inline]
    fn classify_integer(&self) -> IntegerClass {
        (**self).classify_integer()
    }
}

macro_rules! impl_integer_like {
    ($($t:ty),+ $(,)?) => {
        $(
            impl IntegerLike for $t {
                #[inline]
                fn classify_integer(&self) -> IntegerClass {
                    self.to_i64()
                        .map_or(IntegerClass::Unrepresentable, IntegerClass::Integer)
                }
            }
        )+
    };
}

impl_integer_like!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Floats are integers only when they are safe integers: finite, without a
/// fractional part and within `±MAX_SAFE_INTEGER`.
fn classify_float(value: f64) -> IntegerClass {
    if value.is_finite()
        && CoreFloat::trunc(value) == value
        && CoreFloat::abs(value) <= MAX_SAFE_INTEGER as f64
    {
        return IntegerClass::Integer(value as i64);
    }
    IntegerClass::NotInteger
}

impl IntegerLike for f64 {
    #[inline]
    fn classify_integer(&self) -> IntegerClass {
        classify_float(*self)
    }
}

impl IntegerLike for f32 {
    #[inline]
    fn classify_integer(&self) -> IntegerClass {
        classify_float(f64::from(*self))
    }
}

impl IntegerLike for str {
    #[inline]
    fn classify_integer(&self) -> IntegerClass {
        IntegerClass::NotInteger
    }
}

impl IntegerLike for String {
    #[inline]
    fn classify_integer(&self) -> IntegerClass {
        IntegerClass::NotInteger
    }
}

impl IntegerLike for bool {
    #[inline]
    fn classify_integer(&self) -> IntegerClass {
        IntegerClass::NotInteger
    }
}

impl IntegerLike for Number {
    fn classify_integer(&self) -> IntegerClass {
        if let Some(value) = self.as_i64() {
            return IntegerClass::Integer(value);
        }
        if self.is_u64() {
            return IntegerClass::Unrepresentable;
        }
        self.as_f64()
            .map_or(IntegerClass::NotInteger, classify_float)
    }
}

impl IntegerLike for Value {
    fn classify_integer(&self) -> IntegerClass {
        match self {
            Value::Number(number) => number.classify_integer(),
            _ => IntegerClass::NotInteger,
        }
    }
}

/// Returns whether the value is an integer.
///
/// Primitive integers are always integers, even when they cannot be used as
/// field values. Floats are integers when they are safe integers.
#[inline]
pub fn is_integer<T: IntegerLike + ?Sized>(value: &T) -> bool {
    !matches!(value.classify_integer(), IntegerClass::NotInteger)
}

/// Returns the value as an integer, or a `SyntaxError` if it is not one.
#[inline]
pub fn as_integer<T: IntegerLike + ?Sized>(value: &T) -> TemporalResult<i64> {
    as_integer_or(
        value,
        TemporalError::syntax().with_enum(ErrorMessage::NotAnInteger),
    )
}

/// Returns the value as an integer, or `error` if it is not one.
///
/// Integers that do not fit an `i64` are rejected with a `RangeError`
/// regardless of `error`.
pub fn as_integer_or<T: IntegerLike + ?Sized>(
    value: &T,
    error: TemporalError,
) -> TemporalResult<i64> {
    match value.classify_integer() {
        IntegerClass::Integer(value) => Ok(value),
        IntegerClass::Unrepresentable => {
            Err(TemporalError::range().with_enum(ErrorMessage::IntegerNotRepresentable))
        }
        IntegerClass::NotInteger => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{as_integer, as_integer_or, is_integer, IntegerClass, IntegerLike};
    use crate::{error::ErrorKind, TemporalError, MAX_SAFE_INTEGER};

    #[test]
    fn primitive_integers() {
        assert!(is_integer(&0u8));
        assert!(is_integer(&-15i32));
        assert!(is_integer(&i64::MIN));
        assert!(is_integer(&u128::MAX));
        assert_eq!(as_integer(&366u16), Ok(366));
        assert_eq!(as_integer(&-999_999_999i64), Ok(-999_999_999));
    }

    #[test]
    fn wide_integers_are_not_representable() {
        assert_eq!(u64::MAX.classify_integer(), IntegerClass::Unrepresentable);
        assert_eq!(i128::MIN.classify_integer(), IntegerClass::Unrepresentable);
        let err = as_integer(&u128::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn safe_integer_floats() {
        assert!(is_integer(&1.0f64));
        assert!(is_integer(&-0.0f64));
        assert!(is_integer(&(MAX_SAFE_INTEGER as f64)));
        assert_eq!(as_integer(&42.0f32), Ok(42));

        assert!(!is_integer(&1.5f64));
        assert!(!is_integer(&f64::NAN));
        assert!(!is_integer(&f64::INFINITY));
        assert!(!is_integer(&((MAX_SAFE_INTEGER as f64) * 2.0)));
    }

    #[test]
    fn non_numbers() {
        assert!(!is_integer("x"));
        assert!(!is_integer(&true));
        let err = as_integer("15").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.message(), "Not an integer value");
    }

    #[test]
    fn json_values() {
        assert_eq!(as_integer(&json!(31)), Ok(31));
        assert_eq!(as_integer(&json!(-7.0)), Ok(-7));
        assert!(!is_integer(&json!(0.25)));
        assert!(!is_integer(&json!("31")));
        assert!(!is_integer(&json!(null)));
        assert!(!is_integer(&json!([1])));
        assert!(is_integer(&json!(u64::MAX)));
    }

    #[test]
    fn caller_supplied_error() {
        let err =
            as_integer_or("day", TemporalError::r#type().with_message("not a day")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.message(), "not a day");
    }
}
