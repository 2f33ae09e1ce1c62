//! Error chain fields.

use std::sync::Arc;

use crate::error::WriteError;
use crate::event::LoggingEvent;
use crate::field_names::{self, DEFAULT_STACK_TRACE_FIELD, FieldNames, FieldNamesAware};
use crate::provider::{JsonProvider, Lifecycle};
use crate::render::{ExtendedTraceRenderer, ThrowableRenderer};
use crate::throwable::{ThrowableProxy, cause_chain};
use crate::writer::JsonWriter;

/// Default name of the rendered trace field.
pub const FIELD_STACK_TRACE: &str = DEFAULT_STACK_TRACE_FIELD;

/// Prefix of the per-depth cause class name fields.
pub const FIELD_CAUSE: &str = "cause";

/// Prefix of the per-depth cause message fields.
pub const FIELD_CAUSE_MESSAGE: &str = "causeMsg";

/// Writes a rendered trace plus one `causeN`/`causeMsgN` pair per cause.
///
/// Depth 1 is the immediate cause of the event's error; the error itself only
/// appears in the rendered trace.
///
/// # Examples
///
/// ```
/// use providers::{ErrorChainFormatter, ErrorInfo, JsonWriter, ShortenedTraceRenderer, StreamingJsonWriter};
///
/// let formatter = ErrorChainFormatter::builder()
///     .renderer(ShortenedTraceRenderer::new().max_length(10))
///     .build();
/// let error = ErrorInfo::new("FooException")
///     .with_message("boom")
///     .caused_by(ErrorInfo::new("BarException").with_message("root"));
///
/// let mut writer = StreamingJsonWriter::new(Vec::new());
/// writer.write_start_object()?;
/// formatter.write_throwable(&mut writer, Some(&error))?;
/// writer.write_end_object()?;
///
/// assert_eq!(
///     writer.into_inner(),
///     br#"{"stack_trace":"FooExce...","cause1":"BarException","causeMsg1":"root"}"#
/// );
/// # Ok::<(), providers::WriteError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ErrorChainFormatter {
    field_name: String,
    renderer: Arc<dyn ThrowableRenderer>,
    lifecycle: Lifecycle,
}

impl ErrorChainFormatter {
    /// Starts a configuration with the default field name and renderer.
    #[must_use]
    pub fn builder() -> ErrorChainFormatterBuilder {
        ErrorChainFormatterBuilder::new()
    }

    /// Name of the rendered trace field.
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// The configured renderer.
    #[must_use]
    pub fn renderer(&self) -> &dyn ThrowableRenderer {
        self.renderer.as_ref()
    }

    /// Writes the fields for `throwable`; nothing when it is absent.
    pub fn write_throwable(
        &self,
        writer: &mut dyn JsonWriter,
        throwable: Option<&dyn ThrowableProxy>,
    ) -> Result<(), WriteError> {
        let Some(throwable) = throwable else {
            return Ok(());
        };

        if !field_names::is_ignored(&self.field_name) {
            let rendered = self.renderer.render(throwable);
            writer.write_string_field(&self.field_name, &rendered)?;
        }
        write_causes(writer, throwable)
    }
}

impl Default for ErrorChainFormatter {
    fn default() -> Self {
        ErrorChainFormatterBuilder::new().build()
    }
}

/// Writes `causeN`/`causeMsgN` for every cause below `root`.
///
/// Absent or empty class names and messages produce no field. A cause that
/// loops back into the chain ends it.
pub fn write_causes(
    writer: &mut dyn JsonWriter,
    root: &dyn ThrowableProxy,
) -> Result<(), WriteError> {
    for (depth, cause) in cause_chain(root) {
        if let Some(class_name) = cause.class_name().filter(|s| !s.is_empty()) {
            writer.write_string_field(&format!("{FIELD_CAUSE}{depth}"), class_name)?;
        }
        if let Some(message) = cause.message().filter(|s| !s.is_empty()) {
            writer.write_string_field(&format!("{FIELD_CAUSE_MESSAGE}{depth}"), message)?;
        }
    }
    Ok(())
}

impl<E: LoggingEvent + ?Sized> JsonProvider<E> for ErrorChainFormatter {
    fn start(&self) {
        if self.lifecycle.start() {
            self.renderer.start();
            tracing::debug!(
                field = %self.field_name,
                renderer = ?self.renderer,
                "error chain formatter started"
            );
        }
    }

    fn stop(&self) {
        if self.lifecycle.stop() {
            self.renderer.stop();
        }
    }

    fn is_started(&self) -> bool {
        self.lifecycle.is_started()
    }

    fn write_to(&self, writer: &mut dyn JsonWriter, event: &E) -> Result<(), WriteError> {
        self.write_throwable(writer, event.throwable())
    }
}

/// Builder for [`ErrorChainFormatter`].
#[derive(Clone, Debug)]
pub struct ErrorChainFormatterBuilder {
    field_name: String,
    renderer: Arc<dyn ThrowableRenderer>,
}

impl ErrorChainFormatterBuilder {
    /// Creates a builder using `stack_trace` and [`ExtendedTraceRenderer`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            field_name: FIELD_STACK_TRACE.to_owned(),
            renderer: Arc::new(ExtendedTraceRenderer::new()),
        }
    }

    /// Sets the rendered trace field name.
    #[must_use]
    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    /// Replaces the renderer.
    #[must_use]
    pub fn renderer<R: ThrowableRenderer + 'static>(self, renderer: R) -> Self {
        self.renderer_arc(Arc::new(renderer))
    }

    /// Replaces the renderer with a shared one.
    #[must_use]
    pub fn renderer_arc(mut self, renderer: Arc<dyn ThrowableRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Freezes the configuration.
    #[must_use]
    pub fn build(self) -> ErrorChainFormatter {
        ErrorChainFormatter {
            field_name: self.field_name,
            renderer: self.renderer,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl Default for ErrorChainFormatterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldNamesAware for ErrorChainFormatterBuilder {
    fn with_field_names(self, names: &FieldNames) -> Self {
        self.field_name(names.stack_trace.clone())
    }
}
