#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Test doubles and fixtures shared by the workspace's integration tests.
//!
//! [`RecordingWriter`] implements [`JsonWriter`] by recording every call, so
//! tests can assert on the exact sequence a provider produced (for example
//! that a wrapper object is opened once, or not at all). [`render_json`]
//! runs providers against a real [`StreamingJsonWriter`] and returns the
//! document text.

use coerce::TypedValue;
use providers::{
    ContextMap, ErrorInfo, EventSnapshot, JsonProvider, JsonWriter, StreamingJsonWriter,
    WriteError,
};

/// Owned copy of a [`TypedValue`].
#[derive(Clone, Debug, PartialEq)]
pub enum OwnedValue {
    /// Text value.
    Text(String),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// Double.
    Double(f64),
    /// Boolean.
    Bool(bool),
}

impl From<TypedValue<'_>> for OwnedValue {
    fn from(value: TypedValue<'_>) -> Self {
        match value {
            TypedValue::Text(text) => Self::Text(text.to_owned()),
            TypedValue::Int(int) => Self::Int(int),
            TypedValue::Long(long) => Self::Long(long),
            TypedValue::Double(double) => Self::Double(double),
            TypedValue::Bool(flag) => Self::Bool(flag),
        }
    }
}

impl From<&str> for OwnedValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// One call made on a [`RecordingWriter`].
#[derive(Clone, Debug, PartialEq)]
pub enum WriterCall {
    /// `write_field_name`.
    FieldName(String),
    /// `write_value`.
    Value(OwnedValue),
    /// `write_object_field_start`.
    ObjectStart(String),
    /// `write_end_object`.
    EndObject,
    /// `write_string_field`.
    StringField(String, String),
}

/// [`JsonWriter`] that records calls instead of producing JSON.
#[derive(Clone, Debug, Default)]
pub struct RecordingWriter {
    calls: Vec<WriterCall>,
}

impl RecordingWriter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far.
    #[must_use]
    pub fn calls(&self) -> &[WriterCall] {
        &self.calls
    }

    /// Consumes the recorder and returns its calls.
    #[must_use]
    pub fn into_calls(self) -> Vec<WriterCall> {
        self.calls
    }

    /// Number of recorded `write_object_field_start` calls.
    #[must_use]
    pub fn object_starts(&self) -> usize {
        self.count(|call| matches!(call, WriterCall::ObjectStart(_)))
    }

    /// Number of recorded `write_end_object` calls.
    #[must_use]
    pub fn object_ends(&self) -> usize {
        self.count(|call| matches!(call, WriterCall::EndObject))
    }

    /// Field names and values in the order they were written, flattening
    /// nested objects. Both `write_field_name` + `write_value` pairs and
    /// `write_string_field` calls are included.
    #[must_use]
    pub fn fields(&self) -> Vec<(String, OwnedValue)> {
        let mut fields = Vec::new();
        let mut pending = None;
        for call in &self.calls {
            match call {
                WriterCall::FieldName(name) => pending = Some(name.clone()),
                WriterCall::Value(value) => {
                    if let Some(name) = pending.take() {
                        fields.push((name, value.clone()));
                    }
                }
                WriterCall::StringField(name, value) => {
                    fields.push((name.clone(), OwnedValue::Text(value.clone())));
                }
                WriterCall::ObjectStart(_) | WriterCall::EndObject => {}
            }
        }
        fields
    }

    fn count(&self, predicate: impl Fn(&WriterCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl JsonWriter for RecordingWriter {
    fn write_field_name(&mut self, name: &str) -> Result<(), WriteError> {
        self.calls.push(WriterCall::FieldName(name.to_owned()));
        Ok(())
    }

    fn write_value(&mut self, value: TypedValue<'_>) -> Result<(), WriteError> {
        self.calls.push(WriterCall::Value(value.into()));
        Ok(())
    }

    fn write_object_field_start(&mut self, name: &str) -> Result<(), WriteError> {
        self.calls.push(WriterCall::ObjectStart(name.to_owned()));
        Ok(())
    }

    fn write_end_object(&mut self) -> Result<(), WriteError> {
        self.calls.push(WriterCall::EndObject);
        Ok(())
    }

    fn write_string_field(&mut self, name: &str, value: &str) -> Result<(), WriteError> {
        self.calls
            .push(WriterCall::StringField(name.to_owned(), value.to_owned()));
        Ok(())
    }
}

/// Builds a context map from literal pairs.
#[must_use]
pub fn context(entries: &[(&str, &str)]) -> ContextMap {
    entries.iter().copied().collect()
}

/// Builds an error of class `root` whose cause chain is `causes`, outermost
/// first. Each entry is `(class, message)`; `None` leaves the part absent.
#[must_use]
pub fn error_chain(root: &str, causes: &[(Option<&str>, Option<&str>)]) -> ErrorInfo {
    let inner = causes.iter().rev().fold(None, |below, &(class, message)| {
        let mut error = class.map_or_else(ErrorInfo::anonymous, ErrorInfo::new);
        if let Some(message) = message {
            error = error.with_message(message);
        }
        Some(match below {
            Some(cause) => error.caused_by(cause),
            None => error,
        })
    });

    let error = ErrorInfo::new(root);
    match inner {
        Some(cause) => error.caused_by(cause),
        None => error,
    }
}

/// Writes `event` through every provider into one JSON object and returns
/// the document.
pub fn render_json(
    providers: &[&dyn JsonProvider<EventSnapshot>],
    event: &EventSnapshot,
) -> Result<String, WriteError> {
    let mut writer = StreamingJsonWriter::new(Vec::new());
    writer.write_start_object()?;
    for provider in providers {
        provider.write_to(&mut writer, event)?;
    }
    writer.write_end_object()?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

/// Records the calls every provider makes for `event`.
pub fn record(
    providers: &[&dyn JsonProvider<EventSnapshot>],
    event: &EventSnapshot,
) -> Result<RecordingWriter, WriteError> {
    let mut writer = RecordingWriter::new();
    for provider in providers {
        provider.write_to(&mut writer, event)?;
    }
    Ok(writer)
}
