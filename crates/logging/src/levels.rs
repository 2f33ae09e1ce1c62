//! crates/logging/src/levels.rs
//! Severity levels for status events.

use std::fmt;

use tracing::Level;

/// Severity of a status event reported by a provider.
///
/// Levels are ordered so that `Error > Warn > Info`, which lets a threshold
/// be expressed as a simple comparison.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StatusLevel {
    /// Informational lifecycle message.
    #[default]
    Info,
    /// Questionable configuration that does not stop processing.
    Warn,
    /// Misconfiguration reported at start-up.
    Error,
}

impl StatusLevel {
    /// Maps a tracing level onto a status level.
    ///
    /// `DEBUG` and `TRACE` collapse into [`StatusLevel::Info`].
    #[must_use]
    pub const fn from_tracing(level: &Level) -> Self {
        match *level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO | Level::DEBUG | Level::TRACE => Self::Info,
        }
    }

    /// Returns the lowercase label for the level.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(StatusLevel::Error > StatusLevel::Warn);
        assert!(StatusLevel::Warn > StatusLevel::Info);
        assert_eq!(StatusLevel::default(), StatusLevel::Info);
    }

    #[test]
    fn tracing_levels_map_onto_status_levels() {
        assert_eq!(StatusLevel::from_tracing(&Level::ERROR), StatusLevel::Error);
        assert_eq!(StatusLevel::from_tracing(&Level::WARN), StatusLevel::Warn);
        assert_eq!(StatusLevel::from_tracing(&Level::INFO), StatusLevel::Info);
        assert_eq!(StatusLevel::from_tracing(&Level::DEBUG), StatusLevel::Info);
        assert_eq!(StatusLevel::from_tracing(&Level::TRACE), StatusLevel::Info);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(StatusLevel::Warn.to_string(), "warn");
        assert_eq!(StatusLevel::Error.label(), "error");
    }
}
