//! Text and parameter value escaping (RFC 5545 §3.3.11, RFC 6868).

/// Escapes a TEXT value: backslash, comma, semicolon, newline.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// ## Summary
/// Encodes a parameter value, applying RFC 6868 caret escapes and quoting
/// the result when it contains `,` `;` or `:`. Double quotes have no
/// escape inside quoted strings, so they become `^'`.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '^' => encoded.push_str("^^"),
            '\n' => encoded.push_str("^n"),
            '"' => encoded.push_str("^'"),
            '\r' => {}
            _ => encoded.push(c),
        }
    }

    if encoded.contains([',', ';', ':']) {
        format!("\"{encoded}\"")
    } else {
        encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_escapes() {
        assert_eq!(escape_text("a, b; c"), "a\\, b\\; c");
        assert_eq!(escape_text("line1\nline2"), "line1\\nline2");
        assert_eq!(escape_text("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn param_value_plain() {
        assert_eq!(escape_param_value("simple"), "simple");
    }

    #[test]
    fn param_value_quoted_when_reserved() {
        assert_eq!(escape_param_value("Doe, Jane"), "\"Doe, Jane\"");
        assert_eq!(
            escape_param_value("mailto:x@example.com"),
            "\"mailto:x@example.com\""
        );
    }

    #[test]
    fn param_value_caret_encoding() {
        assert_eq!(escape_param_value("a^b"), "a^^b");
        assert_eq!(escape_param_value("say \"hi\""), "say ^'hi^'");
        assert_eq!(escape_param_value("two\nlines"), "two^nlines");
    }
}
