//! iCalendar text parsing (RFC 5545).

pub mod error;
pub mod lexer;
pub mod parser;
pub mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::ContentLine;
pub use parser::parse;
