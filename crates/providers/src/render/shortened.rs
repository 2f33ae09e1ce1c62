use super::{ThrowableRenderer, TraceOptions};
use crate::throwable::ThrowableProxy;

/// Renderer that bounds the size of the trace.
///
/// Each error in the chain prints at most
/// [`max_frames_per_error`](Self::max_frames_per_error) frames, followed by a
/// `... N frames truncated` line. The complete output is cut to
/// [`max_length`](Self::max_length) characters, ending in `...`.
/// Packaging locations are off by default.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ShortenedTraceRenderer {
    options: TraceOptions,
}

impl ShortenedTraceRenderer {
    /// Creates a renderer with no limits and no packaging locations.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            options: TraceOptions {
                packaging: false,
                max_frames_per_error: None,
                max_length: None,
            },
        }
    }

    /// Limits the frames printed for each error in the chain.
    #[must_use]
    pub const fn max_frames_per_error(mut self, max: usize) -> Self {
        self.options.max_frames_per_error = Some(max);
        self
    }

    /// Limits the total length of the output in characters.
    #[must_use]
    pub const fn max_length(mut self, max: usize) -> Self {
        self.options.max_length = Some(max);
        self
    }

    /// Controls whether packaging locations are printed.
    #[must_use]
    pub const fn packaging(mut self, packaging: bool) -> Self {
        self.options.packaging = packaging;
        self
    }
}

impl Default for ShortenedTraceRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ThrowableRenderer for ShortenedTraceRenderer {
    fn render(&self, throwable: &dyn ThrowableProxy) -> String {
        self.options.render(throwable)
    }
}
