//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and provider status reporting.
//!
//! Providers report configuration problems through the [`status_error!`],
//! [`status_warn!`] and [`status_info!`] macros, which emit ordinary tracing
//! events under [`STATUS_TARGET`]. [`StatusLayer`] picks those events up and
//! stores them in the thread-local status buffer so hosts and tests can
//! inspect them with [`drain_status`](crate::drain_status).
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{LoggingConfig, init_tracing};
//!
//! init_tracing(&LoggingConfig::default()).expect("subscriber installs");
//! logging::status_warn!("ContextFieldFormatter", "include and exclude both set");
//! assert_eq!(logging::drain_status().len(), 1);
//! ```

use super::config::LoggingConfig;
use super::levels::StatusLevel;
use super::thread_local::{StatusEvent, level_gte, record};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

/// Tracing target used for status events.
pub const STATUS_TARGET: &str = "event_json::status";

/// A tracing layer that records status events into the thread-local buffer.
///
/// Events with any other target are ignored, so the layer can sit next to a
/// regular formatting layer without duplicating output.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusLayer {
    _private: (),
}

impl StatusLayer {
    /// Create a new StatusLayer.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl<S> Layer<S> for StatusLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target() != STATUS_TARGET {
            return;
        }

        let level = StatusLevel::from_tracing(metadata.level());
        if !level_gte(level) {
            return;
        }

        let mut visitor = StatusVisitor::default();
        event.record(&mut visitor);
        record(StatusEvent {
            level,
            origin: visitor.origin.unwrap_or_default(),
            message: visitor.message.unwrap_or_default(),
        });
    }
}

/// Visitor to extract the message and origin from a status event.
#[derive(Default)]
struct StatusVisitor {
    message: Option<String>,
    origin: Option<String>,
}

impl tracing::field::Visit for StatusVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = Some(format!("{value:?}")),
            "origin" => self.origin = Some(format!("{value:?}")),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_owned()),
            "origin" => self.origin = Some(value.to_owned()),
            _ => {}
        }
    }
}

/// Initialize tracing with a formatting layer and the status layer.
///
/// The configured filter applies to the formatting layer only; status events
/// are always offered to [`StatusLayer`], which applies the status threshold
/// from `config` instead.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::set_threshold(config.status_threshold);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(config.ansi)
        .with_writer(std::io::stderr)
        .with_filter(config.env_filter());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(StatusLayer::new())
        .try_init()
}

/// Initialize tracing with a custom filter in addition to the status layer.
///
/// # Example
///
/// ```rust,ignore
/// use logging::init_tracing_with_filter;
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_with_filter(EnvFilter::from_default_env()).expect("subscriber installs");
/// ```
pub fn init_tracing_with_filter<F>(filter: F) -> Result<(), TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(StatusLayer::new())
        .try_init()
}
