//! Configurable output field names.

use serde::{Deserialize, Serialize};

/// Field name that disables a field entirely.
pub const IGNORE_FIELD_INDICATOR: &str = "[ignore]";

/// Default name of the rendered stack trace field.
pub const DEFAULT_STACK_TRACE_FIELD: &str = "stack_trace";

/// Names of the fields written by the shipped providers.
///
/// Setting a name to [`IGNORE_FIELD_INDICATOR`] suppresses that field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FieldNames {
    /// Wrapper object for context entries; `None` writes them inline.
    pub context: Option<String>,
    /// Field holding the rendered stack trace.
    pub stack_trace: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            context: None,
            stack_trace: DEFAULT_STACK_TRACE_FIELD.to_owned(),
        }
    }
}

/// Builders that accept a shared [`FieldNames`] configuration.
pub trait FieldNamesAware: Sized {
    /// Applies the names relevant to this provider.
    #[must_use]
    fn with_field_names(self, names: &FieldNames) -> Self;
}

/// Returns `true` when `name` turns the field off.
#[must_use]
pub fn is_ignored(name: &str) -> bool {
    name == IGNORE_FIELD_INDICATOR
}
