//! crates/providers/src/context.rs
//! Context map fields.
//!
//! [`ContextFieldFormatter`] writes the entries of an event's
//! [`ContextMap`] as JSON fields, after filtering them by key, renaming them
//! and coercing their values with [`coerce::coerce`]. Entries are written
//! inline or, when a wrapper field name is configured, inside one nested
//! object that is only opened once an entry qualifies.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::context_map::ContextMap;
use crate::error::{ConfigError, WriteError};
use crate::event::LoggingEvent;
use crate::field_names::{FieldNames, FieldNamesAware};
use crate::provider::{JsonProvider, Lifecycle};
use crate::writer::JsonWriter;

const ORIGIN: &str = "ContextFieldFormatter";

/// Splits a `keyName=fieldName` mapping.
///
/// Trailing empty parts are dropped before counting, so `"a="` is rejected
/// and `"=b"` maps the empty key. Anything other than exactly two remaining
/// parts is an error.
///
/// # Examples
///
/// ```
/// use providers::parse_key_field_name;
///
/// assert_eq!(parse_key_field_name("user_id=user").unwrap(), ("user_id", "user"));
/// assert!(parse_key_field_name("user_id").is_err());
/// assert!(parse_key_field_name("a=b=c").is_err());
/// ```
pub fn parse_key_field_name(entry: &str) -> Result<(&str, &str), ConfigError> {
    let mut parts: Vec<&str> = entry.split('=').collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    match parts.as_slice() {
        [key, field] => Ok((*key, *field)),
        _ => Err(ConfigError::malformed_key_field_name(entry)),
    }
}

/// Writes filtered, renamed and coerced context entries.
///
/// Immutable once built; share it by reference or `Arc` across threads.
///
/// # Examples
///
/// ```
/// use providers::{ContextFieldFormatter, ContextMap, JsonWriter, StreamingJsonWriter};
///
/// let formatter = ContextFieldFormatter::builder()
///     .exclude_key("secret")
///     .field_name("ctx")
///     .build();
///
/// let map: ContextMap = [("a", "1"), ("secret", "s"), ("b", "x")].into_iter().collect();
/// let mut writer = StreamingJsonWriter::new(Vec::new());
/// writer.write_start_object()?;
/// formatter.write_context(&mut writer, Some(&map))?;
/// writer.write_end_object()?;
///
/// assert_eq!(writer.into_inner(), br#"{"ctx":{"a":1,"b":"x"}}"#);
/// # Ok::<(), providers::WriteError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ContextFieldFormatter {
    include_keys: FxHashSet<String>,
    exclude_keys: FxHashSet<String>,
    key_field_names: FxHashMap<String, String>,
    field_name: Option<String>,
    lifecycle: Lifecycle,
}

impl ContextFieldFormatter {
    /// Starts an empty configuration.
    #[must_use]
    pub fn builder() -> ContextFieldFormatterBuilder {
        ContextFieldFormatterBuilder::new()
    }

    /// Keys allowed through; empty means no restriction.
    pub fn include_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.include_keys.iter().map(String::as_str)
    }

    /// Keys filtered out; empty means no restriction.
    pub fn exclude_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.exclude_keys.iter().map(String::as_str)
    }

    /// Wrapper object name, if entries are nested.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    /// Output name for `key`.
    #[must_use]
    pub fn output_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.key_field_names.get(key).map_or(key, String::as_str)
    }

    /// Returns `true` when both include and exclude keys are configured.
    #[must_use]
    pub fn has_conflicting_key_filters(&self) -> bool {
        !self.include_keys.is_empty() && !self.exclude_keys.is_empty()
    }

    /// Returns `true` when an entry with `key` passes both filters.
    #[must_use]
    pub fn accepts(&self, key: &str) -> bool {
        (self.include_keys.is_empty() || self.include_keys.contains(key))
            && !self.exclude_keys.contains(key)
    }

    /// Writes the qualifying entries of `map`.
    ///
    /// An absent map, an empty map, or a map with no qualifying entry writes
    /// nothing at all, not even the wrapper object.
    pub fn write_context(
        &self,
        writer: &mut dyn JsonWriter,
        map: Option<&ContextMap>,
    ) -> Result<(), WriteError> {
        let Some(map) = map.filter(|map| !map.is_empty()) else {
            return Ok(());
        };

        let mut wrapped = false;
        for (key, value) in map.iter() {
            let Some(value) = value else {
                continue;
            };
            if !self.accepts(key) {
                continue;
            }

            if !wrapped && let Some(wrapper) = &self.field_name {
                writer.write_object_field_start(wrapper)?;
                wrapped = true;
            }
            writer.write_field_name(self.output_name(key))?;
            writer.write_value(coerce::coerce(value))?;
        }

        if wrapped {
            writer.write_end_object()?;
        }
        Ok(())
    }
}

impl<E: LoggingEvent + ?Sized> JsonProvider<E> for ContextFieldFormatter {
    fn start(&self) {
        if self.has_conflicting_key_filters() {
            logging::status_warn!(
                ORIGIN,
                "both include keys and exclude keys are configured; only one should be set"
            );
        }
        if self.lifecycle.start() {
            tracing::debug!(
                include = self.include_keys.len(),
                exclude = self.exclude_keys.len(),
                renamed = self.key_field_names.len(),
                wrapper = ?self.field_name,
                "context field formatter started"
            );
        }
    }

    fn stop(&self) {
        self.lifecycle.stop();
    }

    fn is_started(&self) -> bool {
        self.lifecycle.is_started()
    }

    fn write_to(&self, writer: &mut dyn JsonWriter, event: &E) -> Result<(), WriteError> {
        self.write_context(writer, event.context_map())
    }
}

/// Builder for [`ContextFieldFormatter`].
#[derive(Clone, Debug, Default)]
pub struct ContextFieldFormatterBuilder {
    include_keys: FxHashSet<String>,
    exclude_keys: FxHashSet<String>,
    key_field_names: FxHashMap<String, String>,
    field_name: Option<String>,
}

impl ContextFieldFormatterBuilder {
    /// Creates a builder with no filters, no renames and no wrapper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key to the include list.
    #[must_use]
    pub fn include_key(mut self, key: impl Into<String>) -> Self {
        self.include_keys.insert(key.into());
        self
    }

    /// Replaces the include list.
    #[must_use]
    pub fn include_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a key to the exclude list.
    #[must_use]
    pub fn exclude_key(mut self, key: impl Into<String>) -> Self {
        self.exclude_keys.insert(key.into());
        self
    }

    /// Replaces the exclude list.
    #[must_use]
    pub fn exclude_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a `keyName=fieldName` mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedKeyFieldName`] when `entry` does not
    /// split into exactly two parts.
    pub fn key_field_name(self, entry: &str) -> Result<Self, ConfigError> {
        let (key, field) = parse_key_field_name(entry)?;
        Ok(self.rename_key(key, field))
    }

    /// Adds several `keyName=fieldName` mappings.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed mapping.
    pub fn key_field_names<I, S>(self, entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .try_fold(self, |builder, entry| builder.key_field_name(entry.as_ref()))
    }

    /// Writes `key` under `field` instead of its own name.
    #[must_use]
    pub fn rename_key(mut self, key: impl Into<String>, field: impl Into<String>) -> Self {
        self.key_field_names.insert(key.into(), field.into());
        self
    }

    /// Nests all entries inside an object named `name`.
    #[must_use]
    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = Some(name.into());
        self
    }

    /// Freezes the configuration.
    #[must_use]
    pub fn build(self) -> ContextFieldFormatter {
        ContextFieldFormatter {
            include_keys: self.include_keys,
            exclude_keys: self.exclude_keys,
            key_field_names: self.key_field_names,
            field_name: self.field_name,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl FieldNamesAware for ContextFieldFormatterBuilder {
    fn with_field_names(mut self, names: &FieldNames) -> Self {
        self.field_name.clone_from(&names.context);
        self
    }
}
