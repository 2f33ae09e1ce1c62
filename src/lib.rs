#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `event-json` bundles the workspace crates behind one dependency:
//!
//! - [`coerce`]: best-effort conversion of context strings to JSON numbers
//!   and booleans.
//! - [`providers`]: the context map and error chain field providers, the
//!   [`JsonWriter`](providers::JsonWriter) abstraction they write through and
//!   the declarative settings that build them.
//! - [`logging`]: status reporting for configuration problems, bridged from
//!   `tracing`.
//!
//! The most common items are re-exported at the crate root.
//!
//! # Examples
//!
//! ```
//! use event_json::{
//!     ContextFieldFormatter, ErrorChainFormatter, ErrorInfo, EventSnapshot, JsonProvider,
//!     JsonWriter, StreamingJsonWriter,
//! };
//!
//! let context = ContextFieldFormatter::builder().field_name("mdc").build();
//! let errors = ErrorChainFormatter::default();
//! JsonProvider::<EventSnapshot>::start(&context);
//! JsonProvider::<EventSnapshot>::start(&errors);
//!
//! let event = EventSnapshot::new().with_context([("attempt", "3"), ("retry", "false")]);
//! let mut writer = StreamingJsonWriter::new(Vec::new());
//! writer.write_start_object()?;
//! context.write_to(&mut writer, &event)?;
//! errors.write_to(&mut writer, &event)?;
//! writer.write_end_object()?;
//!
//! assert_eq!(writer.into_inner(), br#"{"mdc":{"attempt":3,"retry":false}}"#);
//! # Ok::<(), event_json::WriteError>(())
//! ```

pub use coerce;
pub use logging;
pub use providers;

pub use coerce::TypedValue;
pub use logging::{LoggingConfig, StatusEvent, StatusLevel, drain_status, init_tracing};
pub use providers::{
    ConfigError, ContextFieldFormatter, ContextFieldSettings, ContextMap, ErrorChainFormatter,
    ErrorInfo, EventSnapshot, ExtendedTraceRenderer, FieldNames, FieldNamesAware, JsonProvider,
    JsonWriter, LoggingEvent, ShortenedTraceRenderer, StackFrame, StackTraceSettings,
    StreamingJsonWriter, ThrowableProxy, ThrowableRenderer, WriteError,
};
