//! Repair entry points and the timeout supervisor.

use crate::candidates::CandidateSelector;
use crate::error::RepairError;
use crate::parser::{ParseProbe, SqlparserProbe};
use crate::search::{collect_edits, Searcher};
use crate::types::{
    EditDescriptor, EditKind, RepairOptions, RepairRequest, RepairResult, SourceSpan, Summary,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Repairs the query in the request using the production sqlparser probe.
pub fn repair(request: &RepairRequest) -> Result<RepairResult, RepairError> {
    let options = request.options.clone().unwrap_or_default();
    let probe = SqlparserProbe::new(request.dialect);
    repair_with_probe(&request.sql, &options, &probe)
}

/// Repairs a query against a caller-supplied parse probe.
///
/// The search runs on a supervised worker thread. When the wall-clock budget
/// elapses the supervisor raises the cancel flag and then waits for the worker
/// to notice it and hand back whatever partial state it accumulated; a result
/// is always produced, marked `timed_out` when the budget was exceeded.
pub fn repair_with_probe<P>(
    sql: &str,
    options: &RepairOptions,
    probe: &P,
) -> Result<RepairResult, RepairError>
where
    P: ParseProbe + Sync + ?Sized,
{
    let cancel = AtomicBool::new(false);
    let cancel_ref = &cancel;
    let time_limit = Duration::from_millis(options.time_limit_ms);
    let (tx, rx) = mpsc::channel();

    let (state, timed_out) = thread::scope(|scope| {
        scope.spawn(move || {
            let selector = CandidateSelector::new(options.replacement_limit, options.seed);
            let mut searcher = Searcher::new(probe, selector, cancel_ref);
            let outcome = searcher
                .run(sql)
                .map(|()| (searcher.best.take(), searcher.repaired.take()));
            // The supervisor outlives the worker; a send can only fail if the
            // supervisor itself panicked, and then the scope unwinds anyway.
            let _ = tx.send(outcome);
        });

        match rx.recv_timeout(time_limit) {
            Ok(outcome) => outcome.map(|state| (state, false)),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                cancel_ref.store(true, Ordering::Relaxed);
                match rx.recv() {
                    Ok(outcome) => outcome.map(|state| (state, true)),
                    Err(_) => Err(RepairError::WorkerFailed),
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(RepairError::WorkerFailed),
        }
    })?;

    let (best, repaired) = state;
    let result = match repaired {
        Some(repaired_sql) => {
            let edits = collect_edits(best.as_ref());
            let summary = Summary::from_edits(&edits);
            RepairResult {
                edits,
                repaired_sql,
                timed_out,
                summary,
            }
        }
        // No parseable variant was found before the search ended; report the
        // whole query as one unparseable component.
        None => full_span_fallback(sql, timed_out),
    };
    Ok(result)
}

fn full_span_fallback(sql: &str, timed_out: bool) -> RepairResult {
    let lines: Vec<&str> = sql.split('\n').collect();
    let end_line = lines.len();
    let end_col = lines
        .last()
        .map(|line| line.chars().count())
        .unwrap_or(0)
        .max(1);
    let span = SourceSpan::new(1, 1, end_line, end_col);
    let edits = vec![EditDescriptor {
        span,
        kind: EditKind::Deletion,
        original: None,
        replacement: None,
        cost: sql.chars().count() + usize::from(span.is_multi_line()),
    }];
    let summary = Summary::from_edits(&edits);
    RepairResult {
        edits,
        repaired_sql: String::new(),
        timed_out,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ProbeError, SyntaxIssue};
    use crate::types::Dialect;

    fn options(time_limit_ms: u64) -> RepairOptions {
        RepairOptions {
            time_limit_ms,
            replacement_limit: 3,
            seed: Some(0),
        }
    }

    #[test]
    fn test_clean_query_needs_no_edits() {
        let request = RepairRequest {
            sql: "SELECT id, name FROM users WHERE id = 1".to_string(),
            dialect: Dialect::Generic,
            source_name: None,
            options: None,
        };
        let result = repair(&request).unwrap();

        assert!(result.edits.is_empty());
        assert_eq!(result.repaired_sql, request.sql);
        assert!(!result.timed_out);
        assert_eq!(result.summary.edit_count, 0);
    }

    #[test]
    fn test_misplaced_keyword_is_deleted() {
        let request = RepairRequest {
            sql: "SELECT FROM users".to_string(),
            dialect: Dialect::Generic,
            source_name: None,
            options: Some(options(5000)),
        };
        let result = repair(&request).unwrap();

        assert!(!result.timed_out);
        assert_eq!(result.edits.len(), 1);
        assert_eq!(result.edits[0].kind, EditKind::Deletion);
        assert!(result.repaired_sql.contains("users"));
        // the repaired text must itself parse cleanly
        let probe = SqlparserProbe::new(Dialect::Generic);
        assert!(probe.check(&result.repaired_sql).is_ok());
    }

    #[test]
    fn test_timeout_yields_full_span_fallback() {
        // every parse attempt stalls briefly and fails at the first character,
        // so the search can never terminate on its own
        let probe = |sql: &str| -> Result<(), ProbeError> {
            std::thread::sleep(Duration::from_millis(1));
            if sql.is_empty() {
                return Err(ProbeError::Unavailable("scripted".to_string()));
            }
            Err(ProbeError::Syntax(SyntaxIssue {
                span: SourceSpan::new(1, 1, 1, 1),
                expected: vec!["X".to_string()],
                cause: "scripted failure".to_string(),
            }))
        };
        let sql = "SELECT a FROM b";
        let result = repair_with_probe(sql, &options(30), &probe).unwrap();

        assert!(result.timed_out);
        assert_eq!(result.repaired_sql, "");
        assert_eq!(result.edits.len(), 1);
        assert_eq!(result.edits[0].kind, EditKind::Deletion);
        assert_eq!(result.edits[0].span, SourceSpan::new(1, 1, 1, 15));
        assert_eq!(result.edits[0].cost, sql.chars().count());
    }

    #[test]
    fn test_exhausted_search_yields_full_span_fallback() {
        // nothing ever parses and every failure is unlocatable
        let probe = |_: &str| -> Result<(), ProbeError> {
            Err(ProbeError::Unavailable("scripted".to_string()))
        };
        let result = repair_with_probe("garbage", &options(5000), &probe).unwrap();

        assert!(!result.timed_out);
        assert_eq!(result.repaired_sql, "");
        assert_eq!(result.edits.len(), 1);
        assert_eq!(result.edits[0].span, SourceSpan::new(1, 1, 1, 7));
    }

    #[test]
    fn test_repair_is_idempotent() {
        let request = RepairRequest {
            sql: "SELECT FROM users".to_string(),
            dialect: Dialect::Generic,
            source_name: None,
            options: Some(options(5000)),
        };
        let first = repair(&request).unwrap();

        let again = RepairRequest {
            sql: first.repaired_sql.clone(),
            ..request
        };
        let second = repair(&again).unwrap();
        assert!(second.edits.is_empty());
        assert_eq!(second.repaired_sql, first.repaired_sql);
    }

    #[test]
    fn test_fallback_spans_multi_line_input() {
        let probe = |_: &str| -> Result<(), ProbeError> {
            Err(ProbeError::Unavailable("scripted".to_string()))
        };
        let result = repair_with_probe("ab\ncdef", &options(5000), &probe).unwrap();

        assert_eq!(result.edits[0].span, SourceSpan::new(1, 1, 2, 4));
        // chars plus the joining line break
        assert_eq!(result.edits[0].cost, 8);
    }
}
