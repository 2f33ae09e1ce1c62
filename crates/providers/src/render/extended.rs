use super::{ThrowableRenderer, TraceOptions};
use crate::throwable::ThrowableProxy;

/// Default renderer: full trace with packaging locations.
///
/// Every frame of every error in the chain is printed, followed by its
/// packaging location in brackets when one is known. Frames a cause shares
/// with the error it caused are collapsed into a single
/// `... N common frames omitted` line.
///
/// # Examples
///
/// ```
/// use providers::{ErrorInfo, ExtendedTraceRenderer, StackFrame, ThrowableRenderer};
///
/// let error = ErrorInfo::new("app.FooException")
///     .with_message("boom")
///     .with_frame(StackFrame::new("app.Run.go").with_file("Run.java").with_line(3).with_location("app.jar"))
///     .caused_by(ErrorInfo::new("app.BarException").with_message("root"));
///
/// assert_eq!(
///     ExtendedTraceRenderer::new().render(&error),
///     "app.FooException: boom\n\tat app.Run.go(Run.java:3) [app.jar]\nCaused by: app.BarException: root\n"
/// );
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExtendedTraceRenderer {
    options: TraceOptions,
}

impl ExtendedTraceRenderer {
    /// Creates a renderer that prints packaging locations.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            options: TraceOptions {
                packaging: true,
                max_frames_per_error: None,
                max_length: None,
            },
        }
    }

    /// Creates a renderer that omits packaging locations.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            options: TraceOptions {
                packaging: false,
                max_frames_per_error: None,
                max_length: None,
            },
        }
    }

    /// Returns `true` when packaging locations are printed.
    #[must_use]
    pub const fn packaging(&self) -> bool {
        self.options.packaging
    }
}

impl Default for ExtendedTraceRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ThrowableRenderer for ExtendedTraceRenderer {
    fn render(&self, throwable: &dyn ThrowableProxy) -> String {
        self.options.render(throwable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::throwable::{ErrorInfo, StackFrame};

    fn frame(symbol: &str, line: u32) -> StackFrame {
        StackFrame::new(symbol)
            .with_file("App.java")
            .with_line(line)
            .with_location("app.jar")
    }

    #[test]
    fn renders_single_error() {
        let error = ErrorInfo::new("FooException")
            .with_message("boom")
            .with_frames([frame("a.run", 1), frame("a.main", 2)]);

        assert_eq!(
            ExtendedTraceRenderer::new().render(&error),
            "FooException: boom\n\
             \tat a.run(App.java:1) [app.jar]\n\
             \tat a.main(App.java:2) [app.jar]\n"
        );
    }

    #[test]
    fn collapses_common_frames_of_causes() {
        let error = ErrorInfo::new("Outer")
            .with_frames([frame("a.wrap", 10), frame("a.main", 2)])
            .caused_by(
                ErrorInfo::new("Inner")
                    .with_message("root")
                    .with_frames([frame("a.load", 20), frame("a.wrap", 11), frame("a.main", 2)]),
            );

        assert_eq!(
            ExtendedTraceRenderer::new().render(&error),
            "Outer\n\
             \tat a.wrap(App.java:10) [app.jar]\n\
             \tat a.main(App.java:2) [app.jar]\n\
             Caused by: Inner: root\n\
             \tat a.load(App.java:20) [app.jar]\n\
             \tat a.wrap(App.java:11) [app.jar]\n\
             \t... 1 common frames omitted\n"
        );
    }

    #[test]
    fn plain_variant_drops_locations() {
        let error = ErrorInfo::new("E").with_frame(frame("a.run", 1));
        assert_eq!(
            ExtendedTraceRenderer::plain().render(&error),
            "E\n\tat a.run(App.java:1)\n"
        );
        assert!(!ExtendedTraceRenderer::plain().packaging());
        assert!(ExtendedTraceRenderer::default().packaging());
    }
}
