//! Response types for the repair API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A contiguous region of the original query.
///
/// Lines and columns are 1-based and both ends are inclusive, following the
/// reporting convention of Calcite-style SQL parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceSpan {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl SourceSpan {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Whether the span covers more than one line.
    pub fn is_multi_line(&self) -> bool {
        self.start_line != self.end_line
    }
}

/// The kind of edit applied to an unparseable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    /// The component was removed.
    Deletion,
    /// The component was replaced by a substitute token.
    Replacement,
}

/// One applied correction, expressed in original-query coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditDescriptor {
    /// The original-query span the edit affects
    pub span: SourceSpan,

    /// Deletion or replacement
    pub kind: EditKind,

    /// The replaced fragment text (replacements only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,

    /// The substitute text (replacements only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,

    /// Characters affected; multi-line spans count the joining line break
    pub cost: usize,
}

/// Aggregate statistics over the returned edit list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Total number of edits applied
    pub edit_count: usize,
    /// Number of deletion edits
    pub deletion_count: usize,
    /// Number of replacement edits
    pub replacement_count: usize,
    /// Sum of the per-edit cost metric
    pub total_cost: usize,
}

impl Summary {
    pub fn from_edits(edits: &[EditDescriptor]) -> Self {
        let deletion_count = edits
            .iter()
            .filter(|e| e.kind == EditKind::Deletion)
            .count();
        Self {
            edit_count: edits.len(),
            deletion_count,
            replacement_count: edits.len() - deletion_count,
            total_cost: edits.iter().map(|e| e.cost).sum(),
        }
    }
}

/// The result of one repair run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepairResult {
    /// Edits in the order they apply to the original query, outermost first.
    /// Empty when the query already parses cleanly.
    pub edits: Vec<EditDescriptor>,

    /// The query text after all edits were applied. Equals the input when no
    /// edits were needed; empty when nothing could be parsed in time.
    pub repaired_sql: String,

    /// Whether the wall-clock budget elapsed before the search finished
    pub timed_out: bool,

    /// Aggregate statistics
    pub summary: Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_edits() {
        let edits = vec![
            EditDescriptor {
                span: SourceSpan::new(1, 1, 1, 3),
                kind: EditKind::Deletion,
                original: None,
                replacement: None,
                cost: 3,
            },
            EditDescriptor {
                span: SourceSpan::new(1, 5, 1, 8),
                kind: EditKind::Replacement,
                original: Some("FORM".into()),
                replacement: Some("FROM".into()),
                cost: 4,
            },
        ];

        let summary = Summary::from_edits(&edits);
        assert_eq!(summary.edit_count, 2);
        assert_eq!(summary.deletion_count, 1);
        assert_eq!(summary.replacement_count, 1);
        assert_eq!(summary.total_cost, 7);
    }

    #[test]
    fn test_edit_descriptor_json_shape() {
        let edit = EditDescriptor {
            span: SourceSpan::new(1, 10, 1, 13),
            kind: EditKind::Replacement,
            original: Some("FORM".into()),
            replacement: Some("FROM".into()),
            cost: 4,
        };

        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(json["kind"], "replacement");
        assert_eq!(json["span"]["startCol"], 10);
        assert_eq!(json["original"], "FORM");
    }

    #[test]
    fn test_deletion_omits_fragment_fields() {
        let edit = EditDescriptor {
            span: SourceSpan::new(2, 1, 3, 4),
            kind: EditKind::Deletion,
            original: None,
            replacement: None,
            cost: 9,
        };

        let json = serde_json::to_string(&edit).unwrap();
        assert!(!json.contains("original"));
        assert!(!json.contains("replacement"));
    }
}
