//! Input handling for file reading and stdin support.

use anyhow::{Context, Result};
use sqltriage_core::FileSource;
use std::io::{self, Read};
use std::path::PathBuf;

/// Read SQL input from files or stdin.
///
/// If no files are provided, reads from stdin.
/// Returns a vector of FileSource, one repair run per entry.
pub fn read_input(files: &[PathBuf]) -> Result<Vec<FileSource>> {
    if files.is_empty() {
        read_from_stdin()
    } else {
        read_from_files(files)
    }
}

/// Read SQL from stdin
fn read_from_stdin() -> Result<Vec<FileSource>> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;

    Ok(vec![FileSource {
        name: "<stdin>".to_string(),
        content,
    }])
}

/// Read SQL from multiple files
fn read_from_files(files: &[PathBuf]) -> Result<Vec<FileSource>> {
    files
        .iter()
        .map(|path| {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;

            Ok(FileSource {
                name: path.display().to_string(),
                content,
            })
        })
        .collect()
}
