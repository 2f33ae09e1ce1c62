//! The per-event view a host hands to providers.

use crate::context_map::ContextMap;
use crate::throwable::{ErrorInfo, ThrowableProxy};

/// Data a provider may read from a log event.
///
/// Both accessors return `None` when the event carries nothing for them;
/// that is a normal state and produces no output.
pub trait LoggingEvent {
    /// The context map captured with the event.
    fn context_map(&self) -> Option<&ContextMap>;

    /// The error attached to the event.
    fn throwable(&self) -> Option<&dyn ThrowableProxy>;
}

/// Owned [`LoggingEvent`] for hosts without an event type of their own.
///
/// # Examples
///
/// ```
/// use providers::{ErrorInfo, EventSnapshot, LoggingEvent};
///
/// let event = EventSnapshot::new()
///     .with_context([("user", "alice")])
///     .with_error(ErrorInfo::new("IoError").with_message("disk gone"));
///
/// assert_eq!(event.context_map().and_then(|map| map.get("user")), Some("alice"));
/// assert!(event.throwable().is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventSnapshot {
    context: Option<ContextMap>,
    error: Option<ErrorInfo>,
}

impl EventSnapshot {
    /// Creates an event with no context and no error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the context map with `entries`.
    #[must_use]
    pub fn with_context<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.context = Some(entries.into_iter().collect());
        self
    }

    /// Replaces the context map.
    #[must_use]
    pub fn with_context_map(mut self, context: ContextMap) -> Self {
        self.context = Some(context);
        self
    }

    /// Attaches an error.
    #[must_use]
    pub fn with_error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }
}

impl LoggingEvent for EventSnapshot {
    fn context_map(&self) -> Option<&ContextMap> {
        self.context.as_ref()
    }

    fn throwable(&self) -> Option<&dyn ThrowableProxy> {
        self.error.as_ref().map(|error| error as &dyn ThrowableProxy)
    }
}

impl<T: LoggingEvent + ?Sized> LoggingEvent for &T {
    fn context_map(&self) -> Option<&ContextMap> {
        (**self).context_map()
    }

    fn throwable(&self) -> Option<&dyn ThrowableProxy> {
        (**self).throwable()
    }
}
