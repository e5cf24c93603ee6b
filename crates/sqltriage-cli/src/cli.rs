//! CLI argument parsing using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// SQLTriage - SQL query repair
#[derive(Parser, Debug)]
#[command(name = "sqltriage")]
#[command(about = "Localize and repair unparseable SQL components", long_about = None)]
#[command(version)]
pub struct Args {
    /// SQL files to repair (reads from stdin if none provided)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// SQL dialect
    #[arg(short, long, default_value = "generic", value_enum)]
    pub dialect: DialectArg,

    /// Output format
    #[arg(short, long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum number of substitute tokens tried per error site
    #[arg(short = 'l', long = "limit", default_value = "3", value_name = "N")]
    pub limit: usize,

    /// Wall-clock budget per input, in milliseconds
    #[arg(long = "time-limit", default_value = "5000", value_name = "MS")]
    pub time_limit: u64,

    /// Seed for the replacement-candidate sampler (reproducible runs)
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Suppress per-edit detail and warnings on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Compact JSON output (no pretty-printing)
    #[arg(short, long)]
    pub compact: bool,
}

/// SQL dialect options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    Generic,
    Ansi,
    Bigquery,
    Clickhouse,
    Databricks,
    Duckdb,
    Hive,
    Mssql,
    Mysql,
    Postgres,
    Redshift,
    Snowflake,
    Sqlite,
}

impl From<DialectArg> for sqltriage_core::Dialect {
    fn from(d: DialectArg) -> Self {
        match d {
            DialectArg::Generic => sqltriage_core::Dialect::Generic,
            DialectArg::Ansi => sqltriage_core::Dialect::Ansi,
            DialectArg::Bigquery => sqltriage_core::Dialect::Bigquery,
            DialectArg::Clickhouse => sqltriage_core::Dialect::Clickhouse,
            DialectArg::Databricks => sqltriage_core::Dialect::Databricks,
            DialectArg::Duckdb => sqltriage_core::Dialect::Duckdb,
            DialectArg::Hive => sqltriage_core::Dialect::Hive,
            DialectArg::Mssql => sqltriage_core::Dialect::Mssql,
            DialectArg::Mysql => sqltriage_core::Dialect::Mysql,
            DialectArg::Postgres => sqltriage_core::Dialect::Postgres,
            DialectArg::Redshift => sqltriage_core::Dialect::Redshift,
            DialectArg::Snowflake => sqltriage_core::Dialect::Snowflake,
            DialectArg::Sqlite => sqltriage_core::Dialect::Sqlite,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_conversion() {
        let dialect: sqltriage_core::Dialect = DialectArg::Postgres.into();
        assert_eq!(dialect, sqltriage_core::Dialect::Postgres);
    }

    #[test]
    fn test_parse_minimal_args() {
        let args = Args::parse_from(["sqltriage", "test.sql"]);
        assert_eq!(args.files.len(), 1);
        assert_eq!(args.dialect, DialectArg::Generic);
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.limit, 3);
        assert_eq!(args.time_limit, 5000);
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_parse_full_args() {
        let args = Args::parse_from([
            "sqltriage",
            "-d",
            "postgres",
            "-f",
            "json",
            "-o",
            "output.json",
            "-l",
            "5",
            "--time-limit",
            "200",
            "--seed",
            "42",
            "--quiet",
            "--compact",
            "file1.sql",
            "file2.sql",
        ]);
        assert_eq!(args.dialect, DialectArg::Postgres);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.output.unwrap().to_str().unwrap(), "output.json");
        assert_eq!(args.limit, 5);
        assert_eq!(args.time_limit, 200);
        assert_eq!(args.seed, Some(42));
        assert!(args.quiet);
        assert!(args.compact);
        assert_eq!(args.files.len(), 2);
    }
}
