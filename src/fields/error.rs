//! Error values and stack trace rendering
//!
//! Error reporting parses stack traces out of the logged error text. Errors
//! that carry frames (see [`StackTrace`]) are rendered in the goroutine dump
//! layout the backend recognizes: the message, a blank line, a
//! `goroutine 1 [running]:` header, then a function line and a tab-indented
//! `file:line +0x<column>` line per frame. Other errors keep their plain
//! message.

use std::error::Error;
use std::fmt;
use std::panic::Location;

/// Routine id and state are not observable; the backend parser needs them
const GOROUTINE_HEADER: &str = "\n\ngoroutine 1 [running]:";

/// One frame of a captured call stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub function: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl StackFrame {
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
            column: 0,
        }
    }

    /// Frame for the caller of the enclosing `#[track_caller]` function
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            function: String::new(),
            file: location.file().to_string(),
            line: location.line(),
            column: location.column(),
        }
    }

    fn render(&self) -> String {
        let function = if self.function.is_empty() {
            "unknown"
        } else {
            &self.function
        };
        format!(
            "{}()\n\t{}:{} +{:#x}",
            function, self.file, self.line, self.column
        )
    }
}

/// Errors exposing a structured call stack
pub trait StackTrace {
    fn stack_trace(&self) -> &[StackFrame];
}

/// An error annotated with the program locations it passed through
///
/// # Example
///
/// ```
/// use rust_logdriver::fields::TracedError;
///
/// fn load() -> Result<(), TracedError> {
///     std::fs::read("/nonexistent").map_err(TracedError::new)?;
///     Ok(())
/// }
///
/// assert!(load().is_err());
/// ```
#[derive(Debug)]
pub struct TracedError {
    source: Box<dyn Error + Send + Sync>,
    frames: Vec<StackFrame>,
}

impl TracedError {
    /// Wrap `err`, recording the caller as the innermost frame
    #[track_caller]
    pub fn new(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self {
            source: err.into(),
            frames: vec![StackFrame::caller()],
        }
    }

    /// Record the caller as the next outer frame
    #[track_caller]
    #[must_use]
    pub fn traced(mut self) -> Self {
        self.frames.push(StackFrame::caller());
        self
    }

    #[must_use]
    pub fn with_frame(mut self, frame: StackFrame) -> Self {
        self.frames.push(frame);
        self
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl Error for TracedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

impl StackTrace for TracedError {
    fn stack_trace(&self) -> &[StackFrame] {
        &self.frames
    }
}

/// Error captured into a log field: its message and, if found, its frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    message: String,
    frames: Option<Vec<StackFrame>>,
}

impl ErrorValue {
    /// Capture `err`
    ///
    /// Frames are taken from the first [`TracedError`] found on `err` or
    /// along its `source()` chain.
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        let mut frames = None;
        let mut current = Some(err);
        while let Some(e) = current {
            if let Some(traced) = e.downcast_ref::<TracedError>() {
                frames = Some(traced.stack_trace().to_vec());
                break;
            }
            current = e.source();
        }

        Self {
            message: err.to_string(),
            frames,
        }
    }

    pub fn from_stack_trace<E>(err: &E) -> Self
    where
        E: Error + StackTrace + ?Sized,
    {
        Self {
            message: err.to_string(),
            frames: Some(err.stack_trace().to_vec()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn frames(&self) -> Option<&[StackFrame]> {
        self.frames.as_deref()
    }

    /// Message plus a goroutine dump of the frames, or the plain message
    /// without frames
    pub fn render_stack_trace(&self) -> String {
        match &self.frames {
            Some(frames) if !frames.is_empty() => {
                let mut out = self.message.clone();
                out.push_str(GOROUTINE_HEADER);
                for frame in frames {
                    out.push('\n');
                    out.push_str(&frame.render());
                }
                out
            }
            _ => self.message.clone(),
        }
    }
}
