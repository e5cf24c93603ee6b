//! The parse-probe capability consumed by the search engine.
//!
//! The engine only needs one thing from a parser: attempt a parse and, on
//! failure, report a single error span plus the set of tokens that would have
//! been valid there. [`ParseProbe`] is that seam; [`SqlparserProbe`] is the
//! production implementation backed by the `sqlparser` crate.

use crate::types::{Dialect, SourceSpan};
use regex::Regex;
use sqlparser::parser::Parser;
use std::sync::OnceLock;
use thiserror::Error;

/// A single located syntax failure.
#[derive(Debug, Clone)]
pub struct SyntaxIssue {
    /// The offending token's span in the text that was parsed (1-based,
    /// inclusive). A zeroed start marks an unlocatable failure.
    pub span: SourceSpan,
    /// Token descriptors the parser would have accepted at the error site.
    /// Lexical categories appear in angle-bracket form (e.g. `<IDENTIFIER>`).
    pub expected: Vec<String>,
    /// The parser's own message.
    pub cause: String,
}

impl SyntaxIssue {
    /// Whether the engine can branch on this failure.
    ///
    /// End-of-input failures and validation-category failures are dead ends:
    /// there is no fragment to delete or replace.
    pub fn is_locatable(&self) -> bool {
        if self.span.start_line == 0 || self.span.start_col == 0 {
            return false;
        }
        let cause = self.cause.as_str();
        let at_eof = cause.contains("found: EOF")
            || cause.contains("found EOF")
            || cause.contains("Encountered \"<EOF>\"")
            || cause.contains("Encountered: <EOF>");
        let validation =
            cause.contains("ValidatorException") || cause.to_lowercase().contains("validation");
        !at_eof && !validation
    }
}

/// Failure modes of a parse attempt.
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    /// The parser located a syntax error.
    #[error("syntax error at {}:{}: {}", .0.span.start_line, .0.span.start_col, .0.cause)]
    Syntax(SyntaxIssue),
    /// The parser failed for reasons unrelated to the query's syntax.
    #[error("parser unavailable: {0}")]
    Unavailable(String),
}

/// Attempt-parse capability. The engine treats any error other than a
/// locatable [`SyntaxIssue`] as a dead branch, never as fatal.
pub trait ParseProbe {
    fn check(&self, sql: &str) -> Result<(), ProbeError>;
}

/// Closures make convenient scripted probes in tests.
impl<F> ParseProbe for F
where
    F: Fn(&str) -> Result<(), ProbeError>,
{
    fn check(&self, sql: &str) -> Result<(), ProbeError> {
        self(sql)
    }
}

/// Production probe backed by the `sqlparser` crate.
#[derive(Debug, Clone, Copy)]
pub struct SqlparserProbe {
    dialect: Dialect,
}

impl SqlparserProbe {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }
}

impl ParseProbe for SqlparserProbe {
    fn check(&self, sql: &str) -> Result<(), ProbeError> {
        let dialect = self.dialect.to_sqlparser_dialect();
        match Parser::parse_sql(dialect.as_ref(), sql) {
            Ok(_) => Ok(()),
            Err(err) => Err(ProbeError::Syntax(issue_from_message(
                &err.to_string(),
                sql,
            ))),
        }
    }
}

/// Reconstructs a [`SyntaxIssue`] from a sqlparser error message.
///
/// sqlparser reports errors as text in the shape
/// `Expected: <descriptors>, found: <token> at Line: X, Column: Y`.
/// This parsing is coupled to that message format, exactly like the position
/// recovery it is derived from; a message that does not match yields an
/// unlocatable issue, which the engine treats as a dead branch.
fn issue_from_message(message: &str, sql: &str) -> SyntaxIssue {
    let (start_line, start_col) = parse_position(message).unwrap_or((0, 0));
    let found = parse_found_token(message);
    let expected = parse_expected_tokens(message);

    // sqlparser reports only the offending token's start; recover the span's
    // end from the found token's length. The found text is quoted and
    // whitespace-trimmed in the message, so clamp to the reported line rather
    // than trusting the derived length blindly.
    let found_len = found.as_deref().map(|t| t.chars().count()).unwrap_or(1);
    let mut end_col = start_col + found_len.saturating_sub(1);
    if let Some(line) = sql.split('\n').nth(start_line.saturating_sub(1)) {
        end_col = end_col.min(line.chars().count()).max(start_col);
    }

    SyntaxIssue {
        span: SourceSpan::new(start_line, start_col, start_line, end_col),
        expected,
        cause: message.to_string(),
    }
}

/// Extracts `Line: X, Column: Y` from the message.
fn parse_position(message: &str) -> Option<(usize, usize)> {
    static POSITION_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = POSITION_REGEX.get_or_init(|| {
        // Handles variations like "Line: 1, Column: 5" or "Line:1,Column:5"
        Regex::new(r"Line:\s*(\d+)\s*,\s*Column:\s*(\d+)").expect("Invalid regex pattern")
    });

    re.captures(message).and_then(|caps| {
        let line: usize = caps.get(1)?.as_str().parse().ok()?;
        let column: usize = caps.get(2)?.as_str().parse().ok()?;
        Some((line, column))
    })
}

/// Extracts the found-token text, with surrounding quotes removed.
fn parse_found_token(message: &str) -> Option<String> {
    static FOUND_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = FOUND_REGEX
        .get_or_init(|| Regex::new(r"found:?\s*(.+?)(?:\s+at Line:|$)").expect("Invalid regex pattern"));

    let raw = re.captures(message)?.get(1)?.as_str().trim();
    if raw.is_empty() {
        return None;
    }
    Some(strip_quotes(raw).to_string())
}

/// Extracts and normalizes the expected-token descriptors.
fn parse_expected_tokens(message: &str) -> Vec<String> {
    static EXPECTED_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = EXPECTED_REGEX.get_or_init(|| {
        Regex::new(r"Expected:?\s*(.+?),\s*found").expect("Invalid regex pattern")
    });

    let Some(caps) = re.captures(message) else {
        return Vec::new();
    };
    let list = caps
        .get(1)
        .map(|m| m.as_str())
        .unwrap_or("")
        .trim()
        .trim_start_matches("one of ");

    list.split(" or ")
        .flat_map(|part| part.split(", "))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(normalize_descriptor)
        .collect()
}

/// Maps a descriptor to either a literal token or angle-bracket placeholder.
///
/// sqlparser describes insertable tokens literally (`FROM`, `)`) and token
/// classes in prose (`an identifier`, `an expression`). Prose descriptors
/// become `<IDENTIFIER>`-style placeholders so the candidate selector can
/// filter them the same way it filters Calcite-style placeholders.
fn normalize_descriptor(descriptor: &str) -> String {
    let bare = strip_quotes(descriptor);
    if bare.starts_with('<') && bare.ends_with('>') {
        return bare.to_string();
    }

    let is_literal = !bare.is_empty()
        && bare
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c.is_ascii_punctuation());
    if is_literal {
        return bare.to_string();
    }

    let stem = bare
        .strip_prefix("an ")
        .or_else(|| bare.strip_prefix("a "))
        .unwrap_or(bare);
    format!("<{}>", stem.to_uppercase().replace(' ', "_"))
}

fn strip_quotes(token: &str) -> &str {
    token
        .trim_matches('\'')
        .trim_matches('"')
        .trim_matches('`')
}
