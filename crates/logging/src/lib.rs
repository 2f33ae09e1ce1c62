#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` carries the diagnostics side of the event-json workspace. JSON
//! providers are configured once by a host framework and then run on every log
//! event; problems found while configuring them are reported as *status
//! events* rather than returned errors, so a misconfigured provider keeps
//! running while the host is told about the problem.
//!
//! # Design
//!
//! - Status events are ordinary [`tracing`] events emitted under
//!   [`STATUS_TARGET`] with an `origin` field. The [`status_error!`],
//!   [`status_warn!`] and [`status_info!`] macros fill both in.
//! - [`StatusLayer`] is a `tracing-subscriber` layer that collects those
//!   events into a thread-local buffer, read back with [`drain_status`].
//! - [`init_tracing`] installs a stderr formatting layer filtered by an
//!   `EnvFilter` alongside the status layer.
//!
//! # Invariants
//!
//! - Only events whose target is exactly [`STATUS_TARGET`] reach the buffer.
//! - Events below the thread's [`threshold`] are discarded.
//! - The buffer is per thread; draining it on one thread never observes
//!   events reported on another.
//!
//! # Examples
//!
//! ```
//! use logging::{StatusLayer, StatusLevel, drain_status};
//! use tracing_subscriber::layer::SubscriberExt;
//!
//! let subscriber = tracing_subscriber::registry().with(StatusLayer::new());
//! tracing::subscriber::with_default(subscriber, || {
//!     logging::status_error!("ContextFieldFormatter", "include and exclude keys are both set");
//! });
//!
//! let events = drain_status();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].level, StatusLevel::Error);
//! assert_eq!(events[0].origin, "ContextFieldFormatter");
//! ```

mod config;
mod levels;
mod thread_local;
mod tracing_bridge;
mod tracing_macros;

pub use config::{DEFAULT_FILTER, LoggingConfig};
pub use levels::StatusLevel;
pub use thread_local::{
    StatusEvent, drain_status, has_errors, level_gte, record, set_threshold, threshold,
};
pub use tracing_bridge::{STATUS_TARGET, StatusLayer, init_tracing, init_tracing_with_filter};

#[doc(hidden)]
pub use tracing as __tracing;
