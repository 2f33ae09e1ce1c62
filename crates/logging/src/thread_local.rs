//! crates/logging/src/thread_local.rs
//! Thread-local storage for the status threshold and collected status events.

use super::levels::StatusLevel;
use std::cell::{Cell, RefCell};

thread_local! {
    static THRESHOLD: Cell<StatusLevel> = const { Cell::new(StatusLevel::Info) };
    #[allow(clippy::missing_const_for_thread_local)]
    static EVENTS: RefCell<Vec<StatusEvent>> = RefCell::new(Vec::new());
}

/// Status event collected while configuring or starting a provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusEvent {
    /// Severity of the event.
    pub level: StatusLevel,
    /// Component that reported the event.
    pub origin: String,
    /// Human-readable description.
    pub message: String,
}

impl StatusEvent {
    /// Creates a status event.
    pub fn new(level: StatusLevel, origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            origin: origin.into(),
            message: message.into(),
        }
    }
}

/// Sets the minimum level recorded for the current thread.
pub fn set_threshold(level: StatusLevel) {
    THRESHOLD.with(|t| t.set(level));
}

/// Returns the minimum level recorded for the current thread.
pub fn threshold() -> StatusLevel {
    THRESHOLD.with(Cell::get)
}

/// Check if `level` is at or above the current threshold.
pub fn level_gte(level: StatusLevel) -> bool {
    level >= threshold()
}

/// Record a status event, honouring the threshold.
pub fn record(event: StatusEvent) {
    if !level_gte(event.level) {
        return;
    }
    EVENTS.with(|e| e.borrow_mut().push(event));
}

/// Drain all collected status events, clearing the internal buffer.
pub fn drain_status() -> Vec<StatusEvent> {
    EVENTS.with(|e| e.borrow_mut().drain(..).collect())
}

/// Returns `true` when an error-level event is waiting in the buffer.
pub fn has_errors() -> bool {
    EVENTS.with(|e| e.borrow().iter().any(|event| event.level == StatusLevel::Error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_drain() {
        set_threshold(StatusLevel::Info);
        drain_status();

        record(StatusEvent::new(StatusLevel::Warn, "ctx", "first"));
        record(StatusEvent::new(StatusLevel::Error, "ctx", "second"));

        assert!(has_errors());
        let events = drain_status();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "first");
        assert_eq!(events[1].level, StatusLevel::Error);

        assert!(drain_status().is_empty());
        assert!(!has_errors());
    }

    #[test]
    fn threshold_filters_lower_levels() {
        set_threshold(StatusLevel::Warn);
        drain_status();

        record(StatusEvent::new(StatusLevel::Info, "ctx", "dropped"));
        record(StatusEvent::new(StatusLevel::Warn, "ctx", "kept"));

        let events = drain_status();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "kept");

        set_threshold(StatusLevel::Info);
    }

    #[test]
    fn threshold_is_per_thread() {
        set_threshold(StatusLevel::Error);
        let other = std::thread::spawn(threshold).join().expect("thread joins");
        assert_eq!(other, StatusLevel::Info);
        assert_eq!(threshold(), StatusLevel::Error);
        set_threshold(StatusLevel::Info);
    }
}
