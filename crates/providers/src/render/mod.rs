//! Conversion of an error chain into a human-readable trace.
//!
//! [`ThrowableRenderer`] is the pluggable strategy used by
//! [`ErrorChainFormatter`](crate::ErrorChainFormatter) for its primary field.
//! Both shipped renderers share one layout:
//!
//! ```text
//! app.FooException: boom
//! 	at app.Service.run(Service.java:42) [service.jar]
//! 	at app.Main.main(Main.java:7) [app.jar]
//! Caused by: app.BarException: root
//! 	at app.Store.load(Store.java:13) [store.jar]
//! 	... 1 common frames omitted
//! ```

mod extended;
mod shortened;

use std::fmt;

use rustc_hash::FxHashSet;

pub use extended::ExtendedTraceRenderer;
pub use shortened::ShortenedTraceRenderer;

use crate::throwable::{StackFrame, ThrowableProxy, address};

/// Separator written after every trace line.
pub const LINE_SEPARATOR: &str = "\n";

/// Prefix of the header line of every cause.
pub const CAUSED_BY: &str = "Caused by: ";

/// Opening of the line written for a cause that is already in the trace.
pub const CIRCULAR_REFERENCE: &str = "[CIRCULAR REFERENCE: ";

/// Marker appended when output is cut at its length limit.
pub const ELLIPSIS: &str = "...";

/// Strategy that turns an error chain into a string.
///
/// Implementations must be shareable across threads; the formatter holding
/// them is used concurrently for different events.
pub trait ThrowableRenderer: Send + Sync + fmt::Debug {
    /// Called once when the owning formatter starts.
    fn start(&self) {}

    /// Called once when the owning formatter stops.
    fn stop(&self) {}

    /// Renders `throwable` and every cause below it.
    fn render(&self, throwable: &dyn ThrowableProxy) -> String;
}

/// Layout switches shared by the shipped renderers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TraceOptions {
    pub(crate) packaging: bool,
    pub(crate) max_frames_per_error: Option<usize>,
    pub(crate) max_length: Option<usize>,
}

impl TraceOptions {
    pub(crate) fn render(&self, throwable: &dyn ThrowableProxy) -> String {
        let mut out = String::new();
        let mut current = Some(throwable);
        let mut enclosing: &[StackFrame] = &[];
        let mut prefix = "";
        let mut visited = FxHashSet::default();

        while let Some(error) = current {
            out.push_str(prefix);
            if !visited.insert(address(error)) {
                out.push_str(CIRCULAR_REFERENCE);
                push_title(&mut out, error);
                out.push(']');
                out.push_str(LINE_SEPARATOR);
                break;
            }

            let frames = error.frames();
            let common = common_frames(frames, enclosing);

            push_header(&mut out, error);
            self.push_frames(&mut out, &frames[..frames.len() - common]);
            if common > 0 {
                out.push_str("\t... ");
                out.push_str(&common.to_string());
                out.push_str(" common frames omitted");
                out.push_str(LINE_SEPARATOR);
            }

            enclosing = frames;
            current = error.cause();
            prefix = CAUSED_BY;
        }

        match self.max_length {
            Some(limit) => truncate(out, limit),
            None => out,
        }
    }

    fn push_frames(&self, out: &mut String, frames: &[StackFrame]) {
        let shown = self
            .max_frames_per_error
            .map_or(frames.len(), |max| max.min(frames.len()));

        for frame in &frames[..shown] {
            out.push_str("\tat ");
            out.push_str(&frame.to_string());
            if self.packaging
                && let Some(location) = frame.location()
            {
                out.push_str(" [");
                out.push_str(location);
                out.push(']');
            }
            out.push_str(LINE_SEPARATOR);
        }

        let hidden = frames.len() - shown;
        if hidden > 0 {
            out.push_str("\t... ");
            out.push_str(&hidden.to_string());
            out.push_str(" frames truncated");
            out.push_str(LINE_SEPARATOR);
        }
    }
}

fn push_header(out: &mut String, error: &dyn ThrowableProxy) {
    push_title(out, error);
    out.push_str(LINE_SEPARATOR);
}

fn push_title(out: &mut String, error: &dyn ThrowableProxy) {
    match (error.class_name(), error.message()) {
        (Some(class), Some(message)) => {
            out.push_str(class);
            out.push_str(": ");
            out.push_str(message);
        }
        (Some(class), None) => out.push_str(class),
        (None, Some(message)) => out.push_str(message),
        (None, None) => out.push_str("<unknown>"),
    }
}

/// Number of trailing frames `frames` shares with `enclosing`.
fn common_frames(frames: &[StackFrame], enclosing: &[StackFrame]) -> usize {
    frames
        .iter()
        .rev()
        .zip(enclosing.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Cuts `text` to at most `limit` characters, ending in [`ELLIPSIS`].
fn truncate(mut text: String, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text;
    }
    let (keep, marker) = if limit >= ELLIPSIS.len() {
        (limit - ELLIPSIS.len(), ELLIPSIS)
    } else {
        (limit, "")
    };
    let cut = text
        .char_indices()
        .nth(keep)
        .map_or(text.len(), |(index, _)| index);
    text.truncate(cut);
    text.push_str(marker);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::throwable::{ErrorInfo, LoopedError};

    fn frame(symbol: &str) -> StackFrame {
        StackFrame::new(symbol).with_file("F.java").with_line(1)
    }

    #[test]
    fn common_frames_counts_shared_tail() {
        let outer = [frame("a"), frame("b"), frame("c")];
        let inner = [frame("x"), frame("b"), frame("c")];
        assert_eq!(common_frames(&inner, &outer), 2);
        assert_eq!(common_frames(&inner, &[]), 0);
        assert_eq!(common_frames(&outer, &outer), 3);
    }

    #[test]
    fn header_variants() {
        let mut out = String::new();
        push_header(&mut out, &ErrorInfo::new("C").with_message("m"));
        push_header(&mut out, &ErrorInfo::new("C"));
        push_header(&mut out, &ErrorInfo::anonymous().with_message("m"));
        push_header(&mut out, &ErrorInfo::anonymous());
        assert_eq!(out, "C: m\nC\nm\n<unknown>\n");
    }

    #[test]
    fn cycle_back_to_root_is_marked() {
        let a = LoopedError::new("A");
        let b = LoopedError::new("B");
        a.caused_by(&b);
        b.caused_by(&a);

        let options = TraceOptions {
            packaging: false,
            max_frames_per_error: None,
            max_length: None,
        };
        assert_eq!(
            options.render(&a),
            "A\nCaused by: B\nCaused by: [CIRCULAR REFERENCE: A]\n"
        );
    }

    #[test]
    fn self_caused_error_is_marked() {
        let a = LoopedError::new("A");
        a.caused_by(&a);

        let options = TraceOptions {
            packaging: true,
            max_frames_per_error: None,
            max_length: None,
        };
        assert_eq!(options.render(&a), "A\nCaused by: [CIRCULAR REFERENCE: A]\n");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("abcdefgh".to_owned(), 6), "abc...");
        assert_eq!(truncate("abc".to_owned(), 6), "abc");
        assert_eq!(truncate("abcdef".to_owned(), 2), "ab");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("ééééé".to_owned(), 4), "é...");
    }
}
