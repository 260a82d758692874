use std::fmt;

/// Byte range within the input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Shift the span right by `offset` bytes.
    pub(crate) fn offset(self, offset: usize) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// All errors produced by mealtime.
///
/// The resolver itself never returns these: an unparsable slot is dropped.
/// They surface from the strict parsing entry points and from document loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ScheduleError {
    #[error("{message}")]
    Clock {
        message: String,
        span: Span,
        input: String,
    },

    #[error("{message}")]
    Range {
        message: String,
        span: Span,
        input: String,
    },

    #[error("{message}")]
    Document { message: String },
}

impl ScheduleError {
    pub fn clock(message: impl Into<String>, span: Span, input: impl Into<String>) -> Self {
        Self::Clock {
            message: message.into(),
            span,
            input: input.into(),
        }
    }

    pub fn range(message: impl Into<String>, span: Span, input: impl Into<String>) -> Self {
        Self::Range {
            message: message.into(),
            span,
            input: input.into(),
        }
    }

    pub fn document(message: impl Into<String>) -> Self {
        Self::Document {
            message: message.into(),
        }
    }

    /// Re-home a clock error found inside a larger range string.
    pub(crate) fn within(self, offset: usize, input: &str) -> Self {
        match self {
            Self::Clock { message, span, .. } => Self::Range {
                message,
                span: span.offset(offset),
                input: input.to_string(),
            },
            other => other,
        }
    }

    /// Format a rich error with the input and an underline.
    pub fn display_rich(&self) -> String {
        match self {
            Self::Clock {
                message,
                span,
                input,
            }
            | Self::Range {
                message,
                span,
                input,
            } => format_span_error("error", message, span, input),
            Self::Document { message } => format!("error: {message}"),
        }
    }
}

fn format_span_error(prefix: &str, message: &str, span: &Span, input: &str) -> String {
    let mut out = format!("{prefix}: {message}\n");
    out.push_str(&format!("  {input}\n"));
    // Carets are placed by character column, not byte offset, so en-dashes line up.
    let col = input
        .get(..span.start)
        .map_or(span.start, |s| s.chars().count());
    let width = input
        .get(span.start..span.end)
        .map_or(span.end - span.start, |s| s.chars().count());
    out.push_str(&" ".repeat(col + 2));
    out.push_str(&"^".repeat(width.max(1)));
    out
}
