//! iCalendar parse error types.

use std::fmt;

/// Result type for iCalendar parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while parsing an iCalendar stream.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Line number where the error occurred (1-based).
    pub line: usize,
    /// Column where the error occurred (1-based).
    pub col: usize,
    /// Optional extra context.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, line: usize, col: usize) -> Self {
        Self {
            kind,
            line,
            col,
            context: None,
        }
    }

    /// Attaches extra context to the error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, col {}: {}", self.line, self.col, self.kind)?;
        if let Some(context) = &self.context {
            write!(f, " ({context})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Document does not start with BEGIN:VCALENDAR.
    MissingBegin,
    /// A component was never closed with END.
    MissingEnd,
    /// END name does not match the open component.
    MismatchedComponent,
    /// Property name contains invalid characters.
    InvalidPropertyName,
    /// Content line has no property name.
    MissingPropertyName,
    /// Parameter is malformed.
    InvalidParameter,
    /// Quoted parameter value was never closed.
    UnclosedQuote,
    /// Content line has no colon separator.
    MissingColon,
    /// Invalid DATE value.
    InvalidDate,
    /// Invalid TIME value.
    InvalidTime,
    /// Invalid DATE-TIME value.
    InvalidDateTime,
    /// Invalid DURATION value.
    InvalidDuration,
    /// Invalid PERIOD value.
    InvalidPeriod,
    /// Invalid UTC-OFFSET value.
    InvalidUtcOffset,
    /// Invalid RECUR rule.
    InvalidRecur,
    /// Invalid property value.
    InvalidValue,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBegin => write!(f, "expected BEGIN:VCALENDAR"),
            Self::MissingEnd => write!(f, "unterminated component"),
            Self::MismatchedComponent => write!(f, "mismatched END"),
            Self::InvalidPropertyName => write!(f, "invalid property name"),
            Self::MissingPropertyName => write!(f, "missing property name"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::UnclosedQuote => write!(f, "unclosed quote"),
            Self::MissingColon => write!(f, "missing colon separator"),
            Self::InvalidDate => write!(f, "invalid date"),
            Self::InvalidTime => write!(f, "invalid time"),
            Self::InvalidDateTime => write!(f, "invalid date-time"),
            Self::InvalidDuration => write!(f, "invalid duration"),
            Self::InvalidPeriod => write!(f, "invalid period"),
            Self::InvalidUtcOffset => write!(f, "invalid UTC offset"),
            Self::InvalidRecur => write!(f, "invalid recurrence rule"),
            Self::InvalidValue => write!(f, "invalid value"),
        }
    }
}
