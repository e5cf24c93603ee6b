//! Depth-bounded search over candidate edits.
//!
//! Each branch of the tree holds a query text, a tracker mapping it back to
//! the original, and a chain of [`EditNode`]s describing how it got there.
//! Branches are explored deletion-first; the first solution found at the
//! shallowest depth wins.

use crate::candidates::CandidateSelector;
use crate::edit::{delete_span, replace_span, span_to_byte_range};
use crate::error::RepairError;
use crate::parser::{ParseProbe, ProbeError};
use crate::tracker::PositionTracker;
use crate::types::{EditDescriptor, EditKind, SourceSpan};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One correction step in a branch's edit chain.
///
/// Nodes hold only a parent link; the chain from a leaf back to the root is
/// the branch's full edit sequence. `None` as a parent is the root state with
/// no edits applied.
#[derive(Debug)]
pub struct EditNode {
    pub parent: Option<Arc<EditNode>>,
    /// The affected region, in original-query coordinates
    pub span: SourceSpan,
    pub kind: EditKind,
    pub original: Option<String>,
    pub replacement: Option<String>,
    pub cost: usize,
}

/// The recursive searcher plus the state it accumulates.
pub struct Searcher<'a, P: ?Sized> {
    probe: &'a P,
    selector: CandidateSelector,
    cancel: &'a AtomicBool,
    /// Depth of the best solution found so far
    pub best_depth: usize,
    /// Leaf node of the best solution's edit chain
    pub best: Option<Arc<EditNode>>,
    /// Query text of the best solution
    pub repaired: Option<String>,
}

impl<'a, P: ParseProbe + ?Sized> Searcher<'a, P> {
    pub fn new(probe: &'a P, selector: CandidateSelector, cancel: &'a AtomicBool) -> Self {
        Self {
            probe,
            selector,
            cancel,
            best_depth: usize::MAX,
            best: None,
            repaired: None,
        }
    }

    /// Runs the search from the unedited query.
    pub fn run(&mut self, sql: &str) -> Result<(), RepairError> {
        let tracker = PositionTracker::identity(sql);
        self.explore(sql, None, 0, &tracker)
    }

    /// Explores one branch: parse the text, record a solution or generate the
    /// deletion and replacement child branches for the reported error.
    fn explore(
        &mut self,
        text: &str,
        parent: Option<Arc<EditNode>>,
        depth: usize,
        tracker: &PositionTracker,
    ) -> Result<(), RepairError> {
        // Cancellation is observed between parse attempts; a cancelled branch
        // returns whatever state has been accumulated so far.
        if self.cancel.load(Ordering::Relaxed) {
            return Ok(());
        }
        if depth > self.best_depth {
            return Ok(());
        }

        let issue = match self.probe.check(text) {
            Ok(()) => {
                if depth < self.best_depth {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(depth, "recording solution");
                    self.best_depth = depth;
                    self.best = parent;
                    self.repaired = Some(text.to_string());
                }
                return Ok(());
            }
            Err(ProbeError::Syntax(issue)) if issue.is_locatable() => issue,
            // Unlocatable or non-syntax failures are dead ends, never fatal.
            Err(_) => return Ok(()),
        };

        // Report the edit in original-query coordinates; the error span itself
        // stays in current-text coordinates for applying the edit.
        let start = tracker.translate(issue.span.start_line, issue.span.start_col)?;
        let end = tracker.translate(issue.span.end_line, issue.span.end_col)?;
        let original_span = SourceSpan::new(start.line, start.col, end.line, end.col);

        if span_to_byte_range(text, &issue.span).is_none() {
            // The parser reported a span outside the text it was given.
            return Ok(());
        }

        if let Some(next_text) = delete_span(text, &issue.span) {
            let cost = text.chars().count() - next_text.chars().count()
                + usize::from(issue.span.is_multi_line());
            let node = Arc::new(EditNode {
                parent: parent.clone(),
                span: original_span,
                kind: EditKind::Deletion,
                original: None,
                replacement: None,
                cost,
            });
            let next_tracker = tracker.after_deletion(&issue.span);
            self.explore(&next_text, Some(node), depth + 1, &next_tracker)?;
        }

        let candidates = self.selector.select(&issue.expected);
        for replaced in replace_span(text, &issue.span, &candidates) {
            let node = Arc::new(EditNode {
                parent: parent.clone(),
                span: original_span,
                kind: EditKind::Replacement,
                cost: replaced.original.chars().count(),
                original: Some(replaced.original),
                replacement: Some(replaced.replacement.clone()),
            });
            let next_tracker = tracker.after_replacement(&issue.span, &replaced.replacement);
            self.explore(&replaced.query, Some(node), depth + 1, &next_tracker)?;
        }

        Ok(())
    }
}

/// Walks the parent chain of a solution leaf into an ordered edit list,
/// outermost ancestor first. An absent leaf means no edits were needed.
pub fn collect_edits(leaf: Option<&Arc<EditNode>>) -> Vec<EditDescriptor> {
    let mut edits = Vec::new();
    let mut cursor = leaf;
    while let Some(node) = cursor {
        edits.push(EditDescriptor {
            span: node.span,
            kind: node.kind,
            original: node.original.clone(),
            replacement: node.replacement.clone(),
            cost: node.cost,
        });
        cursor = node.parent.as_ref();
    }
    edits.reverse();
    edits
}
