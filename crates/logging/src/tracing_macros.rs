//! crates/logging/src/tracing_macros.rs
//! Convenience macros for provider status reporting.
//!
//! These macros wrap the standard tracing macros with the status target and
//! an `origin` field naming the reporting component.

/// Report an error-level status event.
///
/// # Example
/// ```ignore
/// status_error!("ContextFieldFormatter", "bad mapping {}", entry);
/// ```
#[macro_export]
macro_rules! status_error {
    ($origin:expr, $($arg:tt)+) => {
        $crate::__tracing::error!(target: $crate::STATUS_TARGET, origin = $origin, $($arg)+)
    };
}

/// Report a warn-level status event.
///
/// # Example
/// ```ignore
/// status_warn!("ErrorChainFormatter", "renderer replaced after start");
/// ```
#[macro_export]
macro_rules! status_warn {
    ($origin:expr, $($arg:tt)+) => {
        $crate::__tracing::warn!(target: $crate::STATUS_TARGET, origin = $origin, $($arg)+)
    };
}

/// Report an info-level status event.
///
/// # Example
/// ```ignore
/// status_info!("ErrorChainFormatter", "started");
/// ```
#[macro_export]
macro_rules! status_info {
    ($origin:expr, $($arg:tt)+) => {
        $crate::__tracing::info!(target: $crate::STATUS_TARGET, origin = $origin, $($arg)+)
    };
}
