//! Textual edits over the current query.
//!
//! Spans use the parser's convention: 1-based lines and columns, both ends
//! inclusive, columns counted in characters. When an edit removes a span that
//! crosses lines, a single joining '\n' is inserted at the edit point so that
//! line/column arithmetic downstream stays well-defined.

use crate::types::SourceSpan;
use std::ops::Range;

/// A candidate query produced by substituting one token.
#[derive(Debug, Clone)]
pub struct ReplacedComponent {
    /// Full query text after the substitution
    pub query: String,
    /// The fragment that was replaced
    pub original: String,
    /// The substitute text
    pub replacement: String,
}

/// Converts an inclusive line/column span into a byte range over `text`.
///
/// The end column may sit one past the end of its line. Returns `None` when
/// the span does not resolve to positions inside `text`.
pub fn span_to_byte_range(text: &str, span: &SourceSpan) -> Option<Range<usize>> {
    let start = byte_offset(text, span.start_line, span.start_col)?;
    // exclusive end: the byte just past the span's last column
    let end = byte_offset(text, span.end_line, span.end_col + 1)?;
    (start <= end).then_some(start..end)
}

/// Byte offset of the 1-based (line, col) character position.
///
/// Accepts the one-past-end column of any line (it resolves to the line's
/// terminating '\n' or to `text.len()` on the last line).
fn byte_offset(text: &str, line: usize, col: usize) -> Option<usize> {
    if line == 0 || col == 0 {
        return None;
    }
    let mut cur_line = 1usize;
    let mut cur_col = 1usize;
    for (idx, ch) in text.char_indices() {
        if cur_line == line && cur_col == col {
            return Some(idx);
        }
        if ch == '\n' {
            if cur_line == line {
                // col was past this line's one-past-end position
                return (cur_col == col).then_some(idx);
            }
            cur_line += 1;
            cur_col = 1;
        } else {
            cur_col += 1;
        }
    }
    (cur_line == line && cur_col == col).then_some(text.len())
}

/// Removes the span from `text`, joining lines with a single '\n' when the
/// span was multi-line.
pub fn delete_span(text: &str, span: &SourceSpan) -> Option<String> {
    let range = span_to_byte_range(text, span)?;
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..range.start]);
    if span.is_multi_line() {
        out.push('\n');
    }
    out.push_str(&text[range.end..]);
    Some(out)
}

/// Replaces the span in `text` with each candidate substitute, retaining the
/// replaced fragment so callers can report it.
pub fn replace_span(text: &str, span: &SourceSpan, substitutes: &[String]) -> Vec<ReplacedComponent> {
    let Some(range) = span_to_byte_range(text, span) else {
        return Vec::new();
    };
    let original = text[range.clone()].to_string();

    substitutes
        .iter()
        .map(|substitute| {
            let mut query = String::with_capacity(text.len() + substitute.len());
            query.push_str(&text[..range.start]);
            query.push_str(substitute);
            if span.is_multi_line() {
                // same line-joining convention as deletion, after the substitute
                query.push('\n');
            }
            query.push_str(&text[range.end..]);
            ReplacedComponent {
                query,
                original: original.clone(),
                replacement: substitute.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_range_single_line() {
        let text = "SELECT a FORM b";
        let range = span_to_byte_range(text, &SourceSpan::new(1, 10, 1, 13)).unwrap();
        assert_eq!(&text[range], "FORM");
    }

    #[test]
    fn test_byte_range_end_of_line() {
        let text = "SELECT a\nFROM b";
        let range = span_to_byte_range(text, &SourceSpan::new(2, 6, 2, 6)).unwrap();
        assert_eq!(&text[range], "b");
    }

    #[test]
    fn test_byte_range_multi_byte_columns_are_chars() {
        let text = "SELECT 'café' x";
        let range = span_to_byte_range(text, &SourceSpan::new(1, 15, 1, 15)).unwrap();
        assert_eq!(&text[range], "x");
    }

    #[test]
    fn test_byte_range_out_of_range() {
        assert!(span_to_byte_range("SELECT", &SourceSpan::new(2, 1, 2, 1)).is_none());
        assert!(span_to_byte_range("SELECT", &SourceSpan::new(1, 9, 1, 9)).is_none());
    }

    #[test]
    fn test_delete_single_line() {
        let out = delete_span("SELECT a FORM b", &SourceSpan::new(1, 10, 1, 14)).unwrap();
        assert_eq!(out, "SELECT a b");
    }

    #[test]
    fn test_delete_multi_line_joins_with_newline() {
        let out = delete_span("abc\ndef\nghi", &SourceSpan::new(1, 2, 2, 2)).unwrap();
        assert_eq!(out, "a\nf\nghi");
    }

    #[test]
    fn test_replace_single_token() {
        let replaced = replace_span(
            "SELECT a FORM b",
            &SourceSpan::new(1, 10, 1, 13),
            &["FROM".to_string()],
        );
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].query, "SELECT a FROM b");
        assert_eq!(replaced[0].original, "FORM");
        assert_eq!(replaced[0].replacement, "FROM");
    }

    #[test]
    fn test_replace_multi_line_inserts_newline_after_substitute() {
        let replaced = replace_span(
            "abc\ndef\nghi",
            &SourceSpan::new(1, 2, 2, 2),
            &["X".to_string()],
        );
        assert_eq!(replaced[0].query, "aX\nf\nghi");
        assert_eq!(replaced[0].original, "bc\nde");
    }

    #[test]
    fn test_replace_each_candidate_from_same_base() {
        let replaced = replace_span(
            "SELECT 1 X",
            &SourceSpan::new(1, 10, 1, 10),
            &["a".to_string(), "b".to_string()],
        );
        assert_eq!(replaced[0].query, "SELECT 1 a");
        assert_eq!(replaced[1].query, "SELECT 1 b");
    }
}
