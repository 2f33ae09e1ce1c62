//! crates/coerce/src/shape.rs
//! Character-level classification of candidate numbers.

/// First code point of every run of ten decimal digits (`Nd`) in the Basic
/// Multilingual Plane, sorted.
const DIGIT_ZEROS: [u32; 37] = [
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10,
];

/// Value of `c` as a decimal digit.
///
/// Any BMP character of general category `Nd` counts, so Arabic-Indic `'٣'`
/// and fullwidth `'３'` are both 3. Digits outside the BMP are not
/// recognised; numbers are judged one UTF-16 unit at a time and a surrogate
/// half is never a digit.
///
/// # Examples
///
/// ```
/// use coerce::decimal_digit_value;
///
/// assert_eq!(decimal_digit_value('7'), Some(7));
/// assert_eq!(decimal_digit_value('\u{0663}'), Some(3));
/// assert_eq!(decimal_digit_value('\u{FF19}'), Some(9));
/// assert_eq!(decimal_digit_value('x'), None);
/// ```
#[must_use]
pub fn decimal_digit_value(c: char) -> Option<u32> {
    let code = u32::from(c);
    if c.is_ascii() {
        return c.to_digit(10);
    }
    let run = DIGIT_ZEROS.partition_point(|&zero| zero <= code);
    let zero = DIGIT_ZEROS[run.checked_sub(1)?];
    let value = code - zero;
    (value < 10).then_some(value)
}

/// Result of inspecting a string for a numeric shape.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NumberShape {
    /// Contains something other than an optional sign, digits and one dot.
    NotANumber,
    /// Optional sign followed by decimal digits only.
    Integer,
    /// Optional sign followed by decimal digits with exactly one `.`.
    Float,
}

impl NumberShape {
    /// Classifies `value`.
    ///
    /// The check is purely lexical: `"+"` and `"-"` on their own are not
    /// numbers, while `"."` or `"1."` are float-shaped even though only the
    /// latter parses. Digits are anything [`decimal_digit_value`] accepts.
    /// Callers are expected to handle parse failures.
    #[must_use]
    pub fn classify(value: &str) -> Self {
        let digits = match value.strip_prefix(['-', '+']) {
            Some("") => return Self::NotANumber,
            Some(rest) => rest,
            None if value.is_empty() => return Self::NotANumber,
            None => value,
        };

        let mut has_dot = false;
        for c in digits.chars() {
            if c == '.' {
                if has_dot {
                    return Self::NotANumber;
                }
                has_dot = true;
                continue;
            }
            if decimal_digit_value(c).is_none() {
                return Self::NotANumber;
            }
        }

        if has_dot { Self::Float } else { Self::Integer }
    }

    /// Returns `true` for the integer and float shapes.
    #[must_use]
    pub const fn is_number(self) -> bool {
        !matches!(self, Self::NotANumber)
    }
}

#[cfg(test)]
mod tests {
    use super::{NumberShape, decimal_digit_value};

    #[test]
    fn digits_are_integer_shaped() {
        assert_eq!(NumberShape::classify("0"), NumberShape::Integer);
        assert_eq!(NumberShape::classify("123456789"), NumberShape::Integer);
        assert_eq!(NumberShape::classify("+7"), NumberShape::Integer);
        assert_eq!(NumberShape::classify("-7"), NumberShape::Integer);
    }

    #[test]
    fn single_dot_is_float_shaped() {
        assert_eq!(NumberShape::classify("1.1"), NumberShape::Float);
        assert_eq!(NumberShape::classify("-0.5"), NumberShape::Float);
        assert_eq!(NumberShape::classify(".5"), NumberShape::Float);
        assert_eq!(NumberShape::classify("1."), NumberShape::Float);
        assert_eq!(NumberShape::classify("."), NumberShape::Float);
    }

    #[test]
    fn everything_else_is_not_a_number() {
        for value in ["", "+", "-", "1.1.1", "1e5", "abc", "12a", " 1", "--1", "0x10"] {
            assert_eq!(
                NumberShape::classify(value),
                NumberShape::NotANumber,
                "{value:?}"
            );
        }
    }

    #[test]
    fn unicode_decimal_digits_are_integer_shaped() {
        assert_eq!(NumberShape::classify("\u{0661}\u{0662}\u{0663}"), NumberShape::Integer);
        assert_eq!(NumberShape::classify("-\u{FF11}\u{FF12}"), NumberShape::Integer);
        assert_eq!(NumberShape::classify("\u{0967}.\u{0968}"), NumberShape::Float);
    }

    #[test]
    fn other_numeric_characters_are_not_digits() {
        // superscript two, roman numeral one, vulgar half, mathematical bold zero
        for value in ["\u{00B2}", "\u{2160}", "\u{00BD}", "\u{1D7CE}"] {
            assert_eq!(
                NumberShape::classify(value),
                NumberShape::NotANumber,
                "{value:?}"
            );
        }
    }

    #[test]
    fn digit_values_cover_every_run() {
        for zero in super::DIGIT_ZEROS {
            let zero_char = char::from_u32(zero).expect("valid code point");
            let nine_char = char::from_u32(zero + 9).expect("valid code point");
            assert_eq!(decimal_digit_value(zero_char), Some(0), "{zero:#06X}");
            assert_eq!(decimal_digit_value(nine_char), Some(9), "{zero:#06X}");
        }
        assert_eq!(decimal_digit_value('\u{065F}'), None);
        assert_eq!(decimal_digit_value('\u{066A}'), None);
        assert_eq!(decimal_digit_value('\u{FF1A}'), None);
    }

    #[test]
    fn is_number_matches_shape() {
        assert!(NumberShape::Integer.is_number());
        assert!(NumberShape::Float.is_number());
        assert!(!NumberShape::NotANumber.is_number());
    }
}
