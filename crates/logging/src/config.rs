//! crates/logging/src/config.rs
//! Subscriber configuration for hosts that let this workspace install tracing.

use super::levels::StatusLevel;
use tracing_subscriber::EnvFilter;

/// Directive used when neither `RUST_LOG` nor the configuration supplies one.
pub const DEFAULT_FILTER: &str = "warn";

/// Logging configuration consumed by [`init_tracing`](crate::init_tracing).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggingConfig {
    /// `EnvFilter` directive for the formatting layer, e.g. `"providers=debug"`.
    pub filter: String,
    /// Emit ANSI colour codes.
    pub ansi: bool,
    /// Minimum level kept in the status buffer.
    pub status_threshold: StatusLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_owned(),
            ansi: false,
            status_threshold: StatusLevel::Info,
        }
    }
}

impl LoggingConfig {
    /// Creates a configuration with the given filter directive.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            ..Self::default()
        }
    }

    /// Builds the filter for the formatting layer.
    ///
    /// `RUST_LOG` wins when set and valid. An unparsable configured directive
    /// falls back to [`DEFAULT_FILTER`].
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.filter))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
