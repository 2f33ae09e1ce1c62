//! Error representation handed to providers by the host.

use std::error::Error;
use std::fmt;

use rustc_hash::FxHashSet;

/// Read-only view of an error and its chain of causes.
///
/// The cause link is a borrowed back-reference; providers only navigate it.
pub trait ThrowableProxy {
    /// Fully qualified name of the error type, if known.
    fn class_name(&self) -> Option<&str>;

    /// Error message, if any.
    fn message(&self) -> Option<&str>;

    /// Stack frames, innermost first.
    fn frames(&self) -> &[StackFrame] {
        &[]
    }

    /// The error that caused this one.
    fn cause(&self) -> Option<&dyn ThrowableProxy>;
}

/// Iterates the causes below `root`, numbered from 1.
///
/// `root` itself is not yielded. The walk is a plain loop over
/// [`ThrowableProxy::cause`], so chain length does not affect stack usage.
/// It ends at the first cause that was already visited, so a cyclic chain
/// yields each error once.
///
/// # Examples
///
/// ```
/// use providers::{ErrorInfo, ThrowableProxy, cause_chain};
///
/// let error = ErrorInfo::new("Outer")
///     .caused_by(ErrorInfo::new("Middle").caused_by(ErrorInfo::new("Inner")));
///
/// let names: Vec<_> = cause_chain(&error)
///     .map(|(depth, cause)| (depth, cause.class_name().unwrap_or_default().to_owned()))
///     .collect();
/// assert_eq!(names, [(1, "Middle".to_owned()), (2, "Inner".to_owned())]);
/// ```
pub fn cause_chain(root: &dyn ThrowableProxy) -> CauseChain<'_> {
    let mut visited = FxHashSet::default();
    visited.insert(address(root));
    CauseChain {
        next: root.cause(),
        depth: 0,
        visited,
    }
}

/// Identity of a proxy, ignoring its vtable.
pub(crate) fn address(throwable: &dyn ThrowableProxy) -> *const () {
    std::ptr::from_ref(throwable).cast::<()>()
}

/// Iterator returned by [`cause_chain`].
pub struct CauseChain<'a> {
    next: Option<&'a dyn ThrowableProxy>,
    depth: usize,
    visited: FxHashSet<*const ()>,
}

impl<'a> Iterator for CauseChain<'a> {
    type Item = (usize, &'a dyn ThrowableProxy);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if !self.visited.insert(address(current)) {
            return None;
        }
        self.next = current.cause();
        self.depth += 1;
        Some((self.depth, current))
    }
}

impl fmt::Debug for CauseChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CauseChain")
            .field("depth", &self.depth)
            .field("exhausted", &self.next.is_none())
            .finish()
    }
}

/// One frame of a stack trace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StackFrame {
    symbol: String,
    file: Option<String>,
    line: Option<u32>,
    location: Option<String>,
}

impl StackFrame {
    /// Creates a frame for `symbol` with no source information.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            file: None,
            line: None,
            location: None,
        }
    }

    /// Sets the source file.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the source line.
    #[must_use]
    pub const fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Sets the packaging location (library, module or archive).
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Function or method name.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Source file, if known.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Source line, if known.
    #[must_use]
    pub const fn line(&self) -> Option<u32> {
        self.line
    }

    /// Packaging location, if known.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}({file}:{line})", self.symbol),
            (Some(file), None) => write!(f, "{}({file})", self.symbol),
            (None, _) => write!(f, "{}(Unknown Source)", self.symbol),
        }
    }
}

/// Owned error description implementing [`ThrowableProxy`].
///
/// # Examples
///
/// ```
/// use providers::{ErrorInfo, StackFrame, ThrowableProxy};
///
/// let error = ErrorInfo::new("app.FooException")
///     .with_message("boom")
///     .with_frame(StackFrame::new("app.Service.run").with_file("Service.java").with_line(42))
///     .caused_by(ErrorInfo::new("app.BarException").with_message("root"));
///
/// assert_eq!(error.message(), Some("boom"));
/// assert_eq!(error.cause().and_then(|c| c.class_name()), Some("app.BarException"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorInfo {
    class_name: Option<String>,
    message: Option<String>,
    frames: Vec<StackFrame>,
    cause: Option<Box<ErrorInfo>>,
}

impl ErrorInfo {
    /// Creates an error of type `class_name` with no message.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            ..Self::default()
        }
    }

    /// Creates an error whose type is unknown.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Sets the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Appends a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: StackFrame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Appends several stack frames.
    #[must_use]
    pub fn with_frames(mut self, frames: impl IntoIterator<Item = StackFrame>) -> Self {
        self.frames.extend(frames);
        self
    }

    /// Sets the cause.
    #[must_use]
    pub fn caused_by(mut self, cause: Self) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Captures a Rust error and its `source()` chain.
    ///
    /// The root takes its class name from the static type `E`. Sources are
    /// only reachable as trait objects, so their class names are unknown and
    /// providers omit the corresponding `causeN` fields. Messages come from
    /// `Display`; empty messages are treated as absent.
    pub fn capture<E: Error + 'static>(error: &E) -> Self {
        let mut messages = Vec::new();
        let mut source = error.source();
        while let Some(current) = source {
            messages.push(current.to_string());
            source = current.source();
        }

        let cause = messages.into_iter().rev().fold(None, |cause, message| {
            Some(Box::new(Self {
                message: non_empty(message),
                cause,
                ..Self::default()
            }))
        });

        Self {
            class_name: Some(std::any::type_name::<E>().to_owned()),
            message: non_empty(error.to_string()),
            frames: Vec::new(),
            cause,
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

impl ThrowableProxy for ErrorInfo {
    fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    fn cause(&self) -> Option<&dyn ThrowableProxy> {
        self.cause.as_deref().map(|cause| cause as &dyn ThrowableProxy)
    }
}

/// Error whose cause link is set after construction, so tests can close a
/// chain into a loop.
#[cfg(test)]
pub(crate) struct LoopedError<'a> {
    name: &'static str,
    cause: std::cell::Cell<Option<&'a LoopedError<'a>>>,
}

#[cfg(test)]
impl<'a> LoopedError<'a> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            cause: std::cell::Cell::new(None),
        }
    }

    pub(crate) fn caused_by(&self, cause: &'a LoopedError<'a>) {
        self.cause.set(Some(cause));
    }
}

#[cfg(test)]
impl ThrowableProxy for LoopedError<'_> {
    fn class_name(&self) -> Option<&str> {
        Some(self.name)
    }

    fn message(&self) -> Option<&str> {
        None
    }

    fn cause(&self) -> Option<&dyn ThrowableProxy> {
        self.cause.get().map(|cause| cause as &dyn ThrowableProxy)
    }
}
