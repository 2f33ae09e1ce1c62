//! Error types for provider configuration and JSON output.

use std::io;

/// Error returned when a provider is given configuration it cannot use.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A key field name mapping did not split into exactly two parts.
    #[error("key field name mapping ({entry}) must be in the form keyName=fieldName")]
    MalformedKeyFieldName {
        /// The offending mapping, verbatim.
        entry: String,
    },
}

impl ConfigError {
    /// Creates a malformed mapping error for `entry`.
    pub fn malformed_key_field_name(entry: impl Into<String>) -> Self {
        Self::MalformedKeyFieldName {
            entry: entry.into(),
        }
    }
}

/// Error produced while writing JSON output.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The underlying sink rejected the bytes.
    #[error("I/O error while writing JSON: {0}")]
    Io(#[from] io::Error),

    /// A name or value could not be serialized.
    #[error("failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A call arrived that does not fit the current nesting state.
    #[error("invalid JSON writer state: {0}")]
    State(&'static str),
}
