//! Incremental mapping from edited-text positions back to the original query.
//!
//! Every search branch edits the query text independently, so each branch
//! carries its own tracker. Trackers are immutable values: applying an edit
//! produces a new tracker and leaves the old one usable by sibling branches.

use crate::error::RepairError;
use crate::types::SourceSpan;

/// A position in the original, untouched query (1-based line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalPos {
    pub line: usize,
    pub col: usize,
}

/// Maps positions in the current (edited) text to the original query.
///
/// Backed by one entry per character of the current text, each holding the
/// original position that character is attributed to. Characters inserted by
/// a replacement are attributed to the first position of the fragment they
/// replaced, so errors reported inside substituted text still point at the
/// fragment that caused them.
#[derive(Debug, Clone)]
pub struct PositionTracker {
    lines: Vec<Vec<OriginalPos>>,
}

impl PositionTracker {
    /// The identity mapping over an unedited query.
    pub fn identity(sql: &str) -> Self {
        let lines = sql
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                line.chars()
                    .enumerate()
                    .map(|(j, _)| OriginalPos {
                        line: i + 1,
                        col: j + 1,
                    })
                    .collect()
            })
            .collect();
        Self { lines }
    }

    /// Number of lines in the current text.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of characters on the given 1-based line, if it exists.
    pub fn line_len(&self, line: usize) -> Option<usize> {
        self.lines.get(line.checked_sub(1)?).map(Vec::len)
    }

    /// Translates a current-text position into original-query coordinates.
    ///
    /// The one-past-end column of a non-empty line is accepted (parsers report
    /// trailing errors there) and maps to the last character's attribution
    /// shifted one column right. Anything else out of range is an
    /// [`RepairError::InvalidPosition`]: silently returning garbage
    /// coordinates would corrupt every downstream edit span.
    pub fn translate(&self, line: usize, col: usize) -> Result<OriginalPos, RepairError> {
        let out_of_range = RepairError::InvalidPosition { line, column: col };
        let entries = line
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .ok_or_else(|| out_of_range.clone())?;

        if (1..=entries.len()).contains(&col) {
            Ok(entries[col - 1])
        } else if col == entries.len() + 1 && !entries.is_empty() {
            let last = entries[entries.len() - 1];
            Ok(OriginalPos {
                line: last.line,
                col: last.col + 1,
            })
        } else {
            Err(out_of_range)
        }
    }

    /// Returns a new tracker as if the given current-text span were removed.
    ///
    /// A multi-line span leaves the prefix of its start line and the suffix of
    /// its end line as separate lines, mirroring the joining line break the
    /// textual edit inserts at the deletion point.
    pub fn after_deletion(&self, span: &SourceSpan) -> Self {
        self.splice(span, &[])
    }

    /// Returns a new tracker as if the span were replaced by `replacement`.
    pub fn after_replacement(&self, span: &SourceSpan, replacement: &str) -> Self {
        let anchor = self
            .lines
            .get(span.start_line.saturating_sub(1))
            .and_then(|l| l.get(span.start_col.saturating_sub(1)).or_else(|| l.last()))
            .copied()
            .unwrap_or(OriginalPos { line: 1, col: 1 });
        let inserted: Vec<OriginalPos> = replacement.chars().map(|_| anchor).collect();
        self.splice(span, &inserted)
    }

    fn splice(&self, span: &SourceSpan, inserted: &[OriginalPos]) -> Self {
        let sl = span.start_line.max(1);
        let el = span.end_line.max(sl);
        let mut lines: Vec<Vec<OriginalPos>> = Vec::with_capacity(self.lines.len() + 1);

        lines.extend(self.lines.iter().take(sl - 1).cloned());

        let start_entries = self.lines.get(sl - 1).map(Vec::as_slice).unwrap_or(&[]);
        let end_entries = self.lines.get(el - 1).map(Vec::as_slice).unwrap_or(&[]);
        let prefix_len = span.start_col.saturating_sub(1).min(start_entries.len());
        let suffix_start = span.end_col.min(end_entries.len());

        let mut head: Vec<OriginalPos> = start_entries[..prefix_len].to_vec();
        head.extend_from_slice(inserted);

        if sl == el {
            head.extend_from_slice(&end_entries[suffix_start..]);
            lines.push(head);
        } else {
            // The textual edit inserts a '\n' at the edit point when the span
            // crosses lines, so prefix and suffix stay separate lines.
            lines.push(head);
            lines.push(end_entries[suffix_start..].to_vec());
        }

        lines.extend(self.lines.iter().skip(el).cloned());

        Self { lines }
    }
}
