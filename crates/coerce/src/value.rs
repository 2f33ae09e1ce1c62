use std::fmt;

use serde::ser::{Serialize, Serializer};

/// A context value after coercion.
///
/// Text borrows from the input so that values which are passed through
/// unchanged are never copied.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TypedValue<'a> {
    /// The original string, unchanged.
    Text(&'a str),
    /// A 32-bit signed integer.
    Int(i32),
    /// A 64-bit signed integer.
    Long(i64),
    /// A 64-bit floating point number.
    Double(f64),
    /// A boolean.
    Bool(bool),
}

impl<'a> TypedValue<'a> {
    /// Returns the borrowed text when the value was not converted.
    #[must_use]
    pub const fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` when the value was left as text.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Short label for the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Double(_) => "double",
            Self::Bool(_) => "bool",
        }
    }
}

impl<'a> From<&'a str> for TypedValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for TypedValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Int(value) => write!(f, "{value}"),
            Self::Long(value) => write!(f, "{value}"),
            Self::Double(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for TypedValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Int(value) => serializer.serialize_i32(value),
            Self::Long(value) => serializer.serialize_i64(value),
            Self::Double(value) => serializer.serialize_f64(value),
            Self::Bool(value) => serializer.serialize_bool(value),
        }
    }
}
