//! Content line folding (RFC 5545 §3.1).

/// Maximum line length in octets (not characters).
const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line at 75 octets, breaking only on UTF-8 character
/// boundaries. Continuation lines start with a single space that counts
/// toward their length.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut budget = MAX_LINE_OCTETS;

    for c in line.chars() {
        let width = c.len_utf8();
        if width > budget {
            result.push_str("\r\n ");
            budget = MAX_LINE_OCTETS - 1;
        }
        result.push(c);
        budget -= width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_line_unchanged() {
        assert_eq!(fold_line("SUMMARY:Short"), "SUMMARY:Short");
    }

    #[test]
    fn folds_at_75_octets() {
        let line = "X".repeat(80);
        let folded = fold_line(&line);
        let first: &str = folded.split("\r\n").next().unwrap();
        assert_eq!(first.len(), 75);
        assert!(folded.contains("\r\n X"));
    }

    #[test]
    fn folds_on_char_boundaries() {
        let line = format!("NOTE:{}", "\u{65e5}".repeat(40));
        let folded = fold_line(&line);
        for segment in folded.split("\r\n ") {
            assert!(segment.len() <= MAX_LINE_OCTETS);
        }
        assert_eq!(folded.replace("\r\n ", ""), line);
    }

    #[test]
    fn long_line_folds_repeatedly() {
        let folded = fold_line(&"X".repeat(200));
        assert!(folded.matches("\r\n ").count() >= 2);
    }
}
