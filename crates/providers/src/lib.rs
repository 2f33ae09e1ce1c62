#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `providers` contains the two JSON field providers of the event-json
//! workspace. A host logging framework builds each provider once, calls
//! [`JsonProvider::start`], and then asks it to write its fields into the
//! JSON object of every log event through a [`JsonWriter`].
//!
//! - [`ContextFieldFormatter`] writes the entries of the event's
//!   [`ContextMap`], filtered by include/exclude keys, renamed through
//!   `keyName=fieldName` mappings, optionally nested under a wrapper field,
//!   with values coerced to numbers and booleans by [`coerce::coerce`].
//! - [`ErrorChainFormatter`] writes the event's error rendered by a pluggable
//!   [`ThrowableRenderer`], followed by `causeN`/`causeMsgN` fields for each
//!   error in its cause chain.
//!
//! # Design
//!
//! Formatters are immutable once built. Their builders validate
//! configuration eagerly and return [`ConfigError`] for malformed mappings;
//! inconsistent but usable configuration is reported as a status event from
//! [`JsonProvider::start`] through the `logging` crate. Output goes straight
//! to the writer and every failure there surfaces as [`WriteError`].
//!
//! Errors are seen through the [`ThrowableProxy`] trait, so hosts can expose
//! their own error representation. [`ErrorInfo`] is an owned implementation
//! that can also capture a [`std::error::Error`] and its sources.
//!
//! # Invariants
//!
//! - A provider with nothing to write makes no writer calls at all; in
//!   particular no empty wrapper object is emitted.
//! - Cause depth 1 is the immediate cause of the event's error.
//! - Writing the same event twice produces identical output.
//!
//! # Examples
//!
//! ```
//! use providers::{
//!     ContextFieldFormatter, ErrorChainFormatter, ErrorInfo, EventSnapshot, JsonProvider,
//!     JsonWriter, ShortenedTraceRenderer, StreamingJsonWriter,
//! };
//!
//! let context = ContextFieldFormatter::builder()
//!     .key_field_name("req=request_id")?
//!     .build();
//! let errors = ErrorChainFormatter::builder()
//!     .renderer(ShortenedTraceRenderer::new().max_length(3))
//!     .build();
//!
//! let event = EventSnapshot::new()
//!     .with_context([("req", "42"), ("user", "alice")])
//!     .with_error(ErrorInfo::new("Outer").caused_by(ErrorInfo::new("Inner").with_message("why")));
//!
//! let mut writer = StreamingJsonWriter::new(Vec::new());
//! writer.write_start_object()?;
//! context.write_to(&mut writer, &event)?;
//! errors.write_to(&mut writer, &event)?;
//! writer.write_end_object()?;
//!
//! assert_eq!(
//!     String::from_utf8(writer.into_inner())?,
//!     r#"{"request_id":42,"user":"alice","stack_trace":"...","cause1":"Inner","causeMsg1":"why"}"#
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod context;
mod context_map;
mod error;
mod event;
mod field_names;
mod provider;
pub mod render;
mod settings;
mod stack_trace;
mod throwable;
mod writer;

pub use context::{ContextFieldFormatter, ContextFieldFormatterBuilder, parse_key_field_name};
pub use context_map::ContextMap;
pub use error::{ConfigError, WriteError};
pub use event::{EventSnapshot, LoggingEvent};
pub use field_names::{
    DEFAULT_STACK_TRACE_FIELD, FieldNames, FieldNamesAware, IGNORE_FIELD_INDICATOR, is_ignored,
};
pub use provider::{JsonProvider, Lifecycle};
pub use render::{ExtendedTraceRenderer, ShortenedTraceRenderer, ThrowableRenderer};
pub use settings::{ContextFieldSettings, RendererSettings, StackTraceSettings};
pub use stack_trace::{
    ErrorChainFormatter, ErrorChainFormatterBuilder, FIELD_CAUSE, FIELD_CAUSE_MESSAGE,
    FIELD_STACK_TRACE, write_causes,
};
pub use throwable::{CauseChain, ErrorInfo, StackFrame, ThrowableProxy, cause_chain};
pub use writer::{JsonWriter, StreamingJsonWriter};
