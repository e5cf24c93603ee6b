//! Human-readable table output formatting.

use crate::output::FileRepair;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use sqltriage_core::{EditDescriptor, EditKind, SourceSpan};
use std::fmt::Write;

/// Format the repair outcome as human-readable text with optional colors.
pub fn format_table(repairs: &[FileRepair], quiet: bool, use_colors: bool) -> String {
    let colored = use_colors && std::io::stdout().is_terminal();
    let mut out = String::new();

    write_header(&mut out, colored);
    write_summary(&mut out, repairs, colored);

    for file in repairs {
        write_file(&mut out, file, quiet, colored);
    }

    out
}

fn write_header(out: &mut String, colored: bool) {
    let title = "SQLTriage Repair";
    let line = "═".repeat(50);

    if colored {
        writeln!(out, "{}", title.bold()).unwrap();
        writeln!(out, "{}", line.dimmed()).unwrap();
    } else {
        writeln!(out, "{title}").unwrap();
        writeln!(out, "{line}").unwrap();
    }
}

fn write_summary(out: &mut String, repairs: &[FileRepair], colored: bool) {
    let files: Vec<_> = repairs.iter().map(|f| f.name.as_str()).collect();
    writeln!(out, "Files: {}", files.join(", ")).unwrap();
    writeln!(out).unwrap();

    let edit_count: usize = repairs.iter().map(|f| f.result.summary.edit_count).sum();
    let total_cost: usize = repairs.iter().map(|f| f.result.summary.total_cost).sum();

    let stats = format!(
        "Summary: {} inputs | {} edits | total cost {}",
        repairs.len(),
        edit_count,
        total_cost
    );

    if colored {
        writeln!(out, "{}", stats.cyan()).unwrap();
    } else {
        writeln!(out, "{stats}").unwrap();
    }

    writeln!(out).unwrap();
}

fn write_file(out: &mut String, file: &FileRepair, quiet: bool, colored: bool) {
    let result = &file.result;

    let status = if result.edits.is_empty() {
        if colored {
            "clean".green().to_string()
        } else {
            "clean".to_string()
        }
    } else {
        let mut status = format!(
            "{} edit{}",
            result.summary.edit_count,
            if result.summary.edit_count == 1 { "" } else { "s" }
        );
        if result.timed_out {
            status.push_str(" (timed out)");
        }
        if colored {
            status.red().to_string()
        } else {
            status
        }
    };

    writeln!(out, "{}: {status}", file.name).unwrap();

    if quiet || result.edits.is_empty() {
        return;
    }

    for edit in &result.edits {
        write_edit(out, edit, colored);
    }

    if !result.repaired_sql.is_empty() {
        writeln!(out, "  repaired: {}", result.repaired_sql).unwrap();
    }
    writeln!(out).unwrap();
}

fn write_edit(out: &mut String, edit: &EditDescriptor, colored: bool) {
    let kind = match edit.kind {
        EditKind::Deletion => {
            if colored {
                "delete ".yellow().to_string()
            } else {
                "delete ".to_string()
            }
        }
        EditKind::Replacement => {
            if colored {
                "replace".blue().to_string()
            } else {
                "replace".to_string()
            }
        }
    };

    let change = match (&edit.original, &edit.replacement) {
        (Some(original), Some(replacement)) => format!(" {original} → {replacement}"),
        _ => String::new(),
    };

    writeln!(
        out,
        "  [{kind}] {}{change} (cost {})",
        span_label(&edit.span),
        edit.cost
    )
    .unwrap();
}

fn span_label(span: &SourceSpan) -> String {
    if span.start_line == span.end_line && span.start_col == span.end_col {
        format!("{}:{}", span.start_line, span.start_col)
    } else {
        format!(
            "{}:{}-{}:{}",
            span.start_line, span.start_col, span.end_line, span.end_col
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqltriage_core::{repair, Dialect, RepairRequest};

    fn repair_of(sql: &str) -> FileRepair {
        let result = repair(&RepairRequest {
            sql: sql.to_string(),
            dialect: Dialect::Generic,
            source_name: None,
            options: None,
        })
        .expect("repair");
        FileRepair {
            name: "test.sql".to_string(),
            result,
        }
    }

    #[test]
    fn test_format_table_clean() {
        let output = format_table(&[repair_of("SELECT * FROM users")], false, false);
        assert!(output.contains("SQLTriage Repair"));
        assert!(output.contains("Summary: 1 inputs | 0 edits"));
        assert!(output.contains("test.sql: clean"));
    }

    #[test]
    fn test_format_table_with_edits() {
        let output = format_table(&[repair_of("SELECT FROM users")], false, false);
        assert!(output.contains("1 edit"));
        assert!(output.contains("[delete ]"));
        assert!(output.contains("repaired:"));
    }

    #[test]
    fn test_format_table_quiet_hides_detail() {
        let output = format_table(&[repair_of("SELECT FROM users")], true, false);
        assert!(output.contains("1 edit"));
        assert!(!output.contains("[delete ]"));
    }

    #[test]
    fn test_span_label() {
        assert_eq!(span_label(&SourceSpan::new(1, 10, 1, 13)), "1:10-1:13");
        assert_eq!(span_label(&SourceSpan::new(2, 5, 2, 5)), "2:5");
    }
}
