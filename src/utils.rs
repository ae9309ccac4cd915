//! Utility equations for temporal fields

use writeable::LengthHint;

use crate::{MAX_CANONICAL_YEAR, MIN_CANONICAL_YEAR};

/// The number of canonical years representable in total.
pub(crate) const CANONICAL_YEAR_COUNT: i64 = MAX_CANONICAL_YEAR - MIN_CANONICAL_YEAR + 1;

#[inline]
pub(crate) fn is_valid_canonical_year(year: i64) -> bool {
    (MIN_CANONICAL_YEAR..=MAX_CANONICAL_YEAR).contains(&year)
}

/// Returns the number of characters in the decimal representation of `value`.
pub(crate) fn integer_len(value: i64) -> usize {
    let digits = value
        .unsigned_abs()
        .checked_ilog10()
        .map_or(1, |log| log as usize + 1);
    digits + usize::from(value < 0)
}

#[inline]
pub(crate) fn integer_length_hint(value: i64) -> LengthHint {
    LengthHint::exact(integer_len(value))
}
