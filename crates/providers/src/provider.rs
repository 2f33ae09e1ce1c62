//! Provider lifecycle.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::WriteError;
use crate::writer::JsonWriter;

/// A component that contributes fields to the JSON document of an event.
///
/// Hosts call [`start`](Self::start) once after configuration, then
/// [`write_to`](Self::write_to) for every event, possibly from several
/// threads, and finally [`stop`](Self::stop).
pub trait JsonProvider<E: ?Sized>: Send + Sync {
    /// Validates configuration and prepares for writing.
    fn start(&self);

    /// Releases anything acquired by [`start`](Self::start).
    fn stop(&self);

    /// Returns `true` between [`start`](Self::start) and [`stop`](Self::stop).
    fn is_started(&self) -> bool;

    /// Writes this provider's fields for `event`.
    fn write_to(&self, writer: &mut dyn JsonWriter, event: &E) -> Result<(), WriteError>;
}

/// Started flag shared by the shipped providers.
#[derive(Debug, Default)]
pub struct Lifecycle {
    started: AtomicBool,
}

impl Lifecycle {
    /// Creates a stopped lifecycle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            started: AtomicBool::new(false),
        }
    }

    /// Marks the owner started. Returns `false` if it already was.
    pub fn start(&self) -> bool {
        !self.started.swap(true, Ordering::AcqRel)
    }

    /// Marks the owner stopped. Returns `false` if it already was.
    pub fn stop(&self) -> bool {
        self.started.swap(false, Ordering::AcqRel)
    }

    /// Current state.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }
}

impl Clone for Lifecycle {
    fn clone(&self) -> Self {
        Self {
            started: AtomicBool::new(self.is_started()),
        }
    }
}
