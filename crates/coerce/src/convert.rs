//! crates/coerce/src/convert.rs
//! String to typed value conversion.

use std::borrow::Cow;

use crate::shape::{NumberShape, decimal_digit_value};
use crate::value::TypedValue;

/// Longest unsigned literal routed to `i32`.
///
/// The threshold is one digit short of `i32::MAX` so that every accepted
/// literal fits; the sign is not counted.
pub const INT_MAX_DIGITS: usize = 9;

/// Longest unsigned literal routed to `i64`.
///
/// `i64::MAX` has 19 digits, so some 19-digit literals overflow. Those fail
/// to parse and fall back to text.
pub const LONG_MAX_DIGITS: usize = 19;

/// Converts `value` into the narrowest typed value it unambiguously represents.
///
/// # Examples
///
/// ```
/// use coerce::{TypedValue, coerce};
///
/// assert_eq!(coerce("+1"), TypedValue::Int(1));
/// assert_eq!(coerce("2147483647"), TypedValue::Long(2_147_483_647));
/// assert_eq!(coerce("false"), TypedValue::Bool(false));
/// assert_eq!(coerce(""), TypedValue::Text(""));
/// ```
#[must_use]
pub fn coerce(value: &str) -> TypedValue<'_> {
    if value.is_empty() {
        return TypedValue::Text(value);
    }

    match NumberShape::classify(value) {
        NumberShape::Float => coerce_float(value),
        NumberShape::Integer => coerce_integer(value),
        NumberShape::NotANumber => {
            if eq_ignore_case(value, "true") {
                TypedValue::Bool(true)
            } else if eq_ignore_case(value, "false") {
                TypedValue::Bool(false)
            } else {
                TypedValue::Text(value)
            }
        }
    }
}

/// Only ASCII digits are accepted in floating point literals.
fn coerce_float(value: &str) -> TypedValue<'_> {
    if !value.is_ascii() {
        return TypedValue::Text(value);
    }
    value
        .parse::<f64>()
        .map_or(TypedValue::Text(value), TypedValue::Double)
}

/// Lengths are counted in UTF-16 units. Every character of an
/// integer-shaped value lies in the BMP, so this equals the character count.
fn coerce_integer(value: &str) -> TypedValue<'_> {
    let sign = usize::from(value.starts_with(['-', '+']));
    let len = value.encode_utf16().count();
    let literal = ascii_digits(value);

    if len <= INT_MAX_DIGITS + sign {
        literal
            .parse::<i32>()
            .map_or(TypedValue::Text(value), TypedValue::Int)
    } else if len <= LONG_MAX_DIGITS + sign {
        literal
            .parse::<i64>()
            .map_or(TypedValue::Text(value), TypedValue::Long)
    } else {
        TypedValue::Text(value)
    }
}

/// Rewrites non-ASCII decimal digits as their ASCII equivalents.
fn ascii_digits(value: &str) -> Cow<'_, str> {
    if value.is_ascii() {
        return Cow::Borrowed(value);
    }
    value
        .chars()
        .map(|c| {
            decimal_digit_value(c)
                .and_then(|digit| char::from_digit(digit, 10))
                .unwrap_or(c)
        })
        .collect()
}

/// Case-insensitive comparison that folds each character through its
/// uppercase and then lowercase form, so `'ſ'` compares equal to `'s'`.
fn eq_ignore_case(candidate: &str, expected: &str) -> bool {
    if candidate.len() < expected.len() {
        return false;
    }
    let mut left = candidate.chars();
    let mut right = expected.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if chars_eq_ignore_case(a, b) => {}
            _ => return false,
        }
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    let (upper_a, upper_b) = (single_upper(a), single_upper(b));
    upper_a == upper_b || single_lower(upper_a) == single_lower(upper_b)
}

fn single_upper(c: char) -> char {
    let mut mapped = c.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(upper), None) => upper,
        _ => c,
    }
}

fn single_lower(c: char) -> char {
    let mut mapped = c.to_lowercase();
    match (mapped.next(), mapped.next()) {
        (Some(lower), None) => lower,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_unchanged() {
        assert_eq!(coerce(""), TypedValue::Text(""));
    }

    #[test]
    fn small_integers_become_int() {
        assert_eq!(coerce("1"), TypedValue::Int(1));
        assert_eq!(coerce("+1"), TypedValue::Int(1));
        assert_eq!(coerce("-1"), TypedValue::Int(-1));
        assert_eq!(coerce("123456789"), TypedValue::Int(123_456_789));
        assert_eq!(coerce("-123456789"), TypedValue::Int(-123_456_789));
        assert_eq!(coerce("007"), TypedValue::Int(7));
    }

    #[test]
    fn ten_digits_become_long() {
        assert_eq!(coerce("1234567890"), TypedValue::Long(1_234_567_890));
        assert_eq!(
            coerce(&i32::MAX.to_string()),
            TypedValue::Long(i64::from(i32::MAX))
        );
        assert_eq!(
            coerce(&i32::MIN.to_string()),
            TypedValue::Long(i64::from(i32::MIN))
        );
    }

    #[test]
    fn long_boundaries() {
        assert_eq!(coerce(&i64::MAX.to_string()), TypedValue::Long(i64::MAX));
        assert_eq!(coerce(&i64::MIN.to_string()), TypedValue::Long(i64::MIN));
        assert_eq!(
            coerce("+9223372036854775807"),
            TypedValue::Long(i64::MAX)
        );
    }

    #[test]
    fn overflowing_nineteen_digits_fall_back_to_text() {
        assert_eq!(
            coerce("9999999999999999999"),
            TypedValue::Text("9999999999999999999")
        );
    }

    #[test]
    fn twenty_digits_stay_text() {
        assert_eq!(
            coerce("12345678901234567890"),
            TypedValue::Text("12345678901234567890")
        );
        assert_eq!(
            coerce("-12345678901234567890"),
            TypedValue::Text("-12345678901234567890")
        );
    }

    #[test]
    fn floats_become_double() {
        assert_eq!(coerce("1.1"), TypedValue::Double(1.1));
        assert_eq!(coerce("-2.5"), TypedValue::Double(-2.5));
        assert_eq!(coerce("+.5"), TypedValue::Double(0.5));
        assert_eq!(coerce("3."), TypedValue::Double(3.0));
    }

    #[test]
    fn lone_dot_falls_back_to_text() {
        assert_eq!(coerce("."), TypedValue::Text("."));
        assert_eq!(coerce("-."), TypedValue::Text("-."));
    }

    #[test]
    fn booleans_ignore_case() {
        assert_eq!(coerce("true"), TypedValue::Bool(true));
        assert_eq!(coerce("TRUE"), TypedValue::Bool(true));
        assert_eq!(coerce("False"), TypedValue::Bool(false));
        assert_eq!(coerce("falſe"), TypedValue::Bool(false));
    }

    #[test]
    fn near_booleans_stay_text() {
        for value in ["yes", "truee", "tru", " true", "1true", "t"] {
            assert_eq!(coerce(value), TypedValue::Text(value), "{value:?}");
        }
    }

    #[test]
    fn signs_alone_stay_text() {
        assert_eq!(coerce("+"), TypedValue::Text("+"));
        assert_eq!(coerce("-"), TypedValue::Text("-"));
    }

    #[test]
    fn arabic_indic_integers_become_int() {
        assert_eq!(coerce("\u{0661}\u{0662}\u{0663}"), TypedValue::Int(123));
        assert_eq!(coerce("-\u{0669}"), TypedValue::Int(-9));
    }

    #[test]
    fn fullwidth_integers_become_int() {
        assert_eq!(coerce("\u{FF11}\u{FF12}"), TypedValue::Int(12));
        assert_eq!(coerce("+\u{FF10}\u{FF17}"), TypedValue::Int(7));
    }

    #[test]
    fn non_ascii_thresholds_count_characters() {
        // nine fullwidth digits are 27 bytes but still nine characters
        let nine = "\u{FF19}".repeat(9);
        assert_eq!(coerce(&nine), TypedValue::Int(999_999_999));

        let ten = "\u{0661}".repeat(10);
        assert_eq!(coerce(&ten), TypedValue::Long(1_111_111_111));

        let twenty = "\u{0966}".repeat(20);
        assert_eq!(coerce(&twenty), TypedValue::Text(&twenty));
    }

    #[test]
    fn mixed_scripts_parse_digit_by_digit() {
        assert_eq!(coerce("1\u{0662}\u{FF13}"), TypedValue::Int(123));
    }

    #[test]
    fn non_ascii_floats_stay_text() {
        let value = "\u{0661}.\u{0665}";
        assert_eq!(coerce(value), TypedValue::Text(value));
    }

    #[test]
    fn ordinary_strings_are_unchanged() {
        assert_eq!(coerce("value1"), TypedValue::Text("value1"));
        assert_eq!(coerce("1.2.3"), TypedValue::Text("1.2.3"));
    }
}
