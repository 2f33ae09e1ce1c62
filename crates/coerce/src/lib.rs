#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `coerce` converts the string values carried by a logging context map into
//! typed JSON scalars. A value that unambiguously looks like a number or a
//! boolean is emitted as one; everything else is passed through unchanged.
//!
//! # Design
//!
//! - [`NumberShape::classify`] inspects the characters of a value and decides
//!   whether it is integer-shaped, float-shaped, or not a number at all.
//!   Any BMP decimal digit counts ([`decimal_digit_value`]), so `"١٢٣"`
//!   is an integer; only ASCII digits parse as floats.
//! - [`coerce`] routes integer-shaped values to `i32` or `i64` purely by their
//!   literal length, float-shaped values to `f64`, and the words `true`/`false`
//!   (ignoring case) to booleans.
//! - [`TypedValue`] borrows the original string for the pass-through case so
//!   the hot path never allocates.
//!
//! # Invariants
//!
//! - The empty string is always returned unchanged.
//! - Integer-shaped values of at most 9 UTF-16 units (10 with a sign) become
//!   [`TypedValue::Int`]; at most 19 (20 with a sign) become
//!   [`TypedValue::Long`]; longer values stay text.
//! - A parse failure never escapes: the original string is returned instead.
//!
//! # Examples
//!
//! ```
//! use coerce::{TypedValue, coerce};
//!
//! assert_eq!(coerce("42"), TypedValue::Int(42));
//! assert_eq!(coerce("1234567890"), TypedValue::Long(1_234_567_890));
//! assert_eq!(coerce("1.5"), TypedValue::Double(1.5));
//! assert_eq!(coerce("TRUE"), TypedValue::Bool(true));
//! assert_eq!(coerce("value1"), TypedValue::Text("value1"));
//! ```

mod convert;
mod shape;
mod value;

pub use convert::{INT_MAX_DIGITS, LONG_MAX_DIGITS, coerce};
pub use shape::{NumberShape, decimal_digit_value};
pub use value::TypedValue;
