//! Streaming JSON output.
//!
//! Providers never build a document tree. They push field names and values
//! into a [`JsonWriter`] owned by the host, which keeps track of nesting and
//! separators. [`StreamingJsonWriter`] is a compact implementation over any
//! [`io::Write`] sink, using `serde_json` for string escaping and scalars.

use std::io::{self, Write};

use coerce::TypedValue;

use crate::error::WriteError;

/// Destination for the fields a provider emits.
///
/// Calls must arrive in a well-formed order: a field name is followed by
/// exactly one value or nested object, and every
/// [`write_object_field_start`](Self::write_object_field_start) is balanced
/// by a [`write_end_object`](Self::write_end_object).
pub trait JsonWriter {
    /// Writes the name of the next field in the current object.
    fn write_field_name(&mut self, name: &str) -> Result<(), WriteError>;

    /// Writes the value of the field named by the previous call.
    fn write_value(&mut self, value: TypedValue<'_>) -> Result<(), WriteError>;

    /// Opens a nested object stored under `name`.
    fn write_object_field_start(&mut self, name: &str) -> Result<(), WriteError>;

    /// Closes the innermost open object.
    fn write_end_object(&mut self) -> Result<(), WriteError>;

    /// Writes a complete string field.
    fn write_string_field(&mut self, name: &str, value: &str) -> Result<(), WriteError> {
        self.write_field_name(name)?;
        self.write_value(TypedValue::Text(value))
    }
}

impl<T: JsonWriter + ?Sized> JsonWriter for &mut T {
    fn write_field_name(&mut self, name: &str) -> Result<(), WriteError> {
        (**self).write_field_name(name)
    }

    fn write_value(&mut self, value: TypedValue<'_>) -> Result<(), WriteError> {
        (**self).write_value(value)
    }

    fn write_object_field_start(&mut self, name: &str) -> Result<(), WriteError> {
        (**self).write_object_field_start(name)
    }

    fn write_end_object(&mut self) -> Result<(), WriteError> {
        (**self).write_end_object()
    }

    fn write_string_field(&mut self, name: &str, value: &str) -> Result<(), WriteError> {
        (**self).write_string_field(name, value)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Scope {
    has_fields: bool,
}

/// Compact JSON writer over an [`io::Write`] sink.
///
/// Non-finite doubles are written as the quoted strings `"NaN"`,
/// `"Infinity"` and `"-Infinity"`, since JSON has no literal for them.
///
/// # Examples
///
/// ```
/// use coerce::TypedValue;
/// use providers::{JsonWriter, StreamingJsonWriter};
///
/// let mut writer = StreamingJsonWriter::new(Vec::new());
/// writer.write_start_object()?;
/// writer.write_field_name("count")?;
/// writer.write_value(TypedValue::Int(3))?;
/// writer.write_object_field_start("ctx")?;
/// writer.write_string_field("user", "alice")?;
/// writer.write_end_object()?;
/// writer.write_end_object()?;
///
/// let json = String::from_utf8(writer.into_inner()).unwrap();
/// assert_eq!(json, r#"{"count":3,"ctx":{"user":"alice"}}"#);
/// # Ok::<(), providers::WriteError>(())
/// ```
#[derive(Debug)]
pub struct StreamingJsonWriter<W> {
    out: W,
    scopes: Vec<Scope>,
    awaiting_value: bool,
}

impl<W> StreamingJsonWriter<W> {
    /// Wraps `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self {
            out,
            scopes: Vec::new(),
            awaiting_value: false,
        }
    }

    /// Number of currently open objects.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Borrows the underlying sink.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consumes the writer and returns the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StreamingJsonWriter<W> {
    /// Opens an object, either as the root document or as the value of the
    /// field named by the previous call.
    pub fn write_start_object(&mut self) -> Result<(), WriteError> {
        if !self.scopes.is_empty() && !self.awaiting_value {
            return Err(WriteError::State("nested object written without a field name"));
        }
        self.awaiting_value = false;
        self.out.write_all(b"{")?;
        self.scopes.push(Scope::default());
        Ok(())
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn write_double(&mut self, value: f64) -> Result<(), WriteError> {
        if value.is_finite() {
            serde_json::to_writer(&mut self.out, &value)?;
        } else if value.is_nan() {
            self.out.write_all(b"\"NaN\"")?;
        } else if value.is_sign_positive() {
            self.out.write_all(b"\"Infinity\"")?;
        } else {
            self.out.write_all(b"\"-Infinity\"")?;
        }
        Ok(())
    }
}

impl<W: Write> JsonWriter for StreamingJsonWriter<W> {
    fn write_field_name(&mut self, name: &str) -> Result<(), WriteError> {
        if self.awaiting_value {
            return Err(WriteError::State("field name written while a value was expected"));
        }
        let Some(scope) = self.scopes.last_mut() else {
            return Err(WriteError::State("field name written outside an object"));
        };
        let separate = scope.has_fields;
        scope.has_fields = true;

        if separate {
            self.out.write_all(b",")?;
        }
        serde_json::to_writer(&mut self.out, name)?;
        self.out.write_all(b":")?;
        self.awaiting_value = true;
        Ok(())
    }

    fn write_value(&mut self, value: TypedValue<'_>) -> Result<(), WriteError> {
        if !self.awaiting_value {
            return Err(WriteError::State("value written without a field name"));
        }
        self.awaiting_value = false;
        match value {
            TypedValue::Double(double) => self.write_double(double),
            other => Ok(serde_json::to_writer(&mut self.out, &other)?),
        }
    }

    fn write_object_field_start(&mut self, name: &str) -> Result<(), WriteError> {
        self.write_field_name(name)?;
        self.write_start_object()
    }

    fn write_end_object(&mut self) -> Result<(), WriteError> {
        if self.awaiting_value {
            return Err(WriteError::State("object closed while a value was expected"));
        }
        if self.scopes.pop().is_none() {
            return Err(WriteError::State("no open object to close"));
        }
        self.out.write_all(b"}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish(writer: StreamingJsonWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner()).expect("utf-8")
    }

    #[test]
    fn writes_separators_between_fields() {
        let mut writer = StreamingJsonWriter::new(Vec::new());
        writer.write_start_object().unwrap();
        writer.write_string_field("a", "x").unwrap();
        writer.write_field_name("b").unwrap();
        writer.write_value(TypedValue::Bool(true)).unwrap();
        writer.write_field_name("c").unwrap();
        writer.write_value(TypedValue::Long(-5)).unwrap();
        writer.write_end_object().unwrap();

        assert_eq!(finish(writer), r#"{"a":"x","b":true,"c":-5}"#);
    }

    #[test]
    fn nested_objects_track_their_own_separators() {
        let mut writer = StreamingJsonWriter::new(Vec::new());
        writer.write_start_object().unwrap();
        writer.write_string_field("before", "1").unwrap();
        writer.write_object_field_start("inner").unwrap();
        assert_eq!(writer.depth(), 2);
        writer.write_string_field("x", "y").unwrap();
        writer.write_string_field("z", "w").unwrap();
        writer.write_end_object().unwrap();
        writer.write_string_field("after", "2").unwrap();
        writer.write_end_object().unwrap();

        assert_eq!(
            finish(writer),
            r#"{"before":"1","inner":{"x":"y","z":"w"},"after":"2"}"#
        );
    }

    #[test]
    fn escapes_names_and_values() {
        let mut writer = StreamingJsonWriter::new(Vec::new());
        writer.write_start_object().unwrap();
        writer.write_string_field("qu\"ote", "line\nbreak\t").unwrap();
        writer.write_end_object().unwrap();

        assert_eq!(finish(writer), r#"{"qu\"ote":"line\nbreak\t"}"#);
    }

    #[test]
    fn non_finite_doubles_are_quoted() {
        let mut writer = StreamingJsonWriter::new(Vec::new());
        writer.write_start_object().unwrap();
        writer.write_field_name("a").unwrap();
        writer.write_value(TypedValue::Double(f64::INFINITY)).unwrap();
        writer.write_field_name("b").unwrap();
        writer.write_value(TypedValue::Double(f64::NEG_INFINITY)).unwrap();
        writer.write_field_name("c").unwrap();
        writer.write_value(TypedValue::Double(f64::NAN)).unwrap();
        writer.write_field_name("d").unwrap();
        writer.write_value(TypedValue::Double(1.1)).unwrap();
        writer.write_end_object().unwrap();

        assert_eq!(
            finish(writer),
            r#"{"a":"Infinity","b":"-Infinity","c":"NaN","d":1.1}"#
        );
    }

    #[test]
    fn rejects_value_without_name() {
        let mut writer = StreamingJsonWriter::new(Vec::new());
        writer.write_start_object().unwrap();
        assert!(matches!(
            writer.write_value(TypedValue::Int(1)),
            Err(WriteError::State(_))
        ));
    }

    #[test]
    fn rejects_field_outside_object() {
        let mut writer = StreamingJsonWriter::new(Vec::new());
        assert!(matches!(
            writer.write_field_name("a"),
            Err(WriteError::State(_))
        ));
    }

    #[test]
    fn rejects_unbalanced_end() {
        let mut writer = StreamingJsonWriter::new(Vec::new());
        assert!(matches!(
            writer.write_end_object(),
            Err(WriteError::State(_))
        ));
    }

    #[test]
    fn rejects_dangling_field_name() {
        let mut writer = StreamingJsonWriter::new(Vec::new());
        writer.write_start_object().unwrap();
        writer.write_field_name("a").unwrap();
        assert!(writer.write_field_name("b").is_err());
        assert!(writer.write_end_object().is_err());
    }

    #[test]
    fn forwards_through_mutable_reference() {
        let mut writer = StreamingJsonWriter::new(Vec::new());
        writer.write_start_object().unwrap();
        {
            let borrowed: &mut dyn JsonWriter = &mut writer;
            borrowed.write_string_field("k", "v").unwrap();
        }
        writer.write_end_object().unwrap();
        assert_eq!(finish(writer), r#"{"k":"v"}"#);
    }
}
