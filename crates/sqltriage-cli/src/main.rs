//! SQLTriage CLI - SQL query repair

use sqltriage_cli::cli;
use sqltriage_cli::input;
use sqltriage_cli::output;

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use sqltriage_core::{repair, RepairOptions, RepairRequest};
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use cli::{Args, OutputFormat};
use output::{format_json, format_table, FileRepair};

/// Edits were required to make an input parseable.
const EXIT_FAILURE: u8 = 1;
/// Configuration or I/O error (e.g. unreadable input file).
const EXIT_CONFIG_ERROR: u8 = 66;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(has_edits) => {
            if has_edits {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("sqltriage: error: {e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

fn run(args: Args) -> Result<bool> {
    let sources = input::read_input(&args.files)?;

    let dialect = args.dialect.into();
    let options = RepairOptions {
        time_limit_ms: args.time_limit,
        replacement_limit: args.limit,
        seed: args.seed,
    };

    let mut repairs = Vec::with_capacity(sources.len());
    for source in sources {
        let result = repair(&RepairRequest {
            sql: source.content,
            dialect,
            source_name: Some(source.name.clone()),
            options: Some(options.clone()),
        })
        .with_context(|| format!("Failed to repair {}", source.name))?;

        repairs.push(FileRepair {
            name: source.name,
            result,
        });
    }

    let has_edits = repairs.iter().any(|f| !f.result.edits.is_empty());
    let colored = args.output.is_none() && io::stdout().is_terminal();

    let output_str = match args.format {
        OutputFormat::Json => format_json(&repairs, args.compact),
        OutputFormat::Table => format_table(&repairs, args.quiet, colored),
    };

    write_output(&args.output, &output_str)?;

    if !args.quiet && args.format != OutputFormat::Json {
        print_timeouts_to_stderr(&repairs);
    }

    Ok(has_edits)
}

fn write_output(path: &Option<std::path::PathBuf>, content: &str) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, content)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    } else {
        io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        // Ensure newline at end for terminal output
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

fn print_timeouts_to_stderr(repairs: &[FileRepair]) {
    for file in repairs {
        if file.result.timed_out {
            eprintln!(
                "sqltriage: warning: {}: time limit exceeded, reported edits may not be minimal",
                file.name
            );
        }
    }
}
