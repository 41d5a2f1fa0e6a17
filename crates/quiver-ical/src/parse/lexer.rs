//! Content line lexer (RFC 5545 §3.1).
//!
//! Splits a calendar stream into unfolded content lines and breaks each
//! line into name, parameters and raw value. Parameter values decode
//! RFC 6868 caret escapes.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::core::Parameter;

/// A content line after unfolding, before value interpretation.
#[derive(Debug, Clone)]
pub struct ContentLine {
    /// Property name (uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Everything after the colon, still escaped.
    pub raw_value: String,
}

/// ## Summary
/// Splits input into logical content lines, merging folded continuations.
///
/// Folds are CRLF (or bare LF, leniently) followed by a single space or
/// tab; unfolding removes the line break and that one whitespace
/// character, inserting nothing. Empty lines are skipped. Each logical
/// line is returned with the 1-based number of its first physical line.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        if line.starts_with([' ', '\t']) {
            let continuation = &line[1..];
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(continuation);
            } else {
                lines.push((i + 1, continuation.to_string()));
            }
        } else {
            lines.push((i + 1, line.to_string()));
        }
    }

    lines
}

/// Parses a single content line.
///
/// Format: `name *(";" param) ":" value`
///
/// ## Errors
/// Returns an error when the name is empty or contains invalid
/// characters, a parameter is malformed, a quoted value is unclosed, or
/// the colon separator is missing.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let mut cursor = Cursor::new(line, line_num);

    let name = cursor.take_name()?;
    if name.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::MissingPropertyName,
            line_num,
            1,
        ));
    }

    let mut params = Vec::new();
    loop {
        match cursor.next() {
            Some(':') => break,
            Some(';') => params.push(cursor.take_parameter()?),
            Some(c) => {
                return Err(cursor
                    .error(ParseErrorKind::InvalidPropertyName)
                    .with_context(format!("unexpected character '{c}'")));
            }
            None => return Err(cursor.error(ParseErrorKind::MissingColon)),
        }
    }

    Ok(ContentLine {
        name: name.to_ascii_uppercase(),
        params,
        raw_value: cursor.rest().to_string(),
    })
}

/// Character cursor over a single content line.
struct Cursor<'a> {
    line: &'a str,
    line_num: usize,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str, line_num: usize) -> Self {
        Self {
            line,
            line_num,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.line_num, self.pos + 1)
    }

    /// Consumes an iana-token (alphanumeric plus hyphen), stopping at any
    /// other character.
    fn take_name(&mut self) -> ParseResult<&'a str> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '-' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        Ok(&self.line[start..self.pos])
    }

    /// Consumes `name "=" value *("," value)` after a `;`. Leaves the
    /// cursor at the `;` or `:` that follows.
    fn take_parameter(&mut self) -> ParseResult<Parameter> {
        let name = self.take_name()?;
        if name.is_empty() {
            return Err(self.error(ParseErrorKind::InvalidParameter));
        }
        if self.peek() != Some('=') {
            return Err(self
                .error(ParseErrorKind::InvalidParameter)
                .with_context(format!("parameter {name} has no value")));
        }
        self.next();

        let mut values = vec![self.take_param_value()?];
        while self.peek() == Some(',') {
            self.next();
            values.push(self.take_param_value()?);
        }

        match self.peek() {
            Some(';' | ':') => Ok(Parameter::with_values(name, values)),
            Some(c) => Err(self
                .error(ParseErrorKind::InvalidParameter)
                .with_context(format!("unexpected character '{c}'"))),
            None => Err(self.error(ParseErrorKind::MissingColon)),
        }
    }

    /// Consumes one parameter value, quoted or plain, decoding RFC 6868
    /// caret escapes (`^n`, `^'`, `^^`).
    fn take_param_value(&mut self) -> ParseResult<String> {
        let mut value = String::new();

        if self.peek() == Some('"') {
            let quote_col = self.pos + 1;
            self.next();
            loop {
                match self.next() {
                    Some('"') => break,
                    Some('^') => value.push_str(&self.take_caret_escape()),
                    Some(c) => value.push(c),
                    None => {
                        return Err(ParseError::new(
                            ParseErrorKind::UnclosedQuote,
                            self.line_num,
                            quote_col,
                        ));
                    }
                }
            }
        } else {
            while let Some(c) = self.peek() {
                match c {
                    ',' | ';' | ':' => break,
                    '^' => {
                        self.next();
                        value.push_str(&self.take_caret_escape());
                    }
                    _ => {
                        self.next();
                        value.push(c);
                    }
                }
            }
        }

        Ok(value)
    }

    /// Decodes the character after a `^`; invalid escapes are preserved
    /// verbatim per RFC 6868 §3.2.
    fn take_caret_escape(&mut self) -> String {
        match self.peek() {
            Some('n') => {
                self.next();
                "\n".to_string()
            }
            Some('\'') => {
                self.next();
                "\"".to_string()
            }
            Some('^') => {
                self.next();
                "^".to_string()
            }
            _ => "^".to_string(),
        }
    }
}
