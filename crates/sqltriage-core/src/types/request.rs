//! Request types for the repair API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A request to repair a SQL query.
///
/// This is the main entry point for the repair API. It accepts SQL code along
/// with a dialect and optional search limits.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepairRequest {
    /// The SQL query to repair (UTF-8 string, single statement or script)
    pub sql: String,

    /// SQL dialect
    pub dialect: Dialect,

    /// Optional source name (file path or script identifier) for reporting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,

    /// Optional search limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RepairOptions>,
}

/// Limits applied to one repair run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepairOptions {
    /// Wall-clock budget for the search, in milliseconds
    #[serde(default = "default_time_limit_ms")]
    pub time_limit_ms: u64,

    /// Maximum number of substitute tokens tried per error site
    #[serde(default = "default_replacement_limit")]
    pub replacement_limit: usize,

    /// Seed for the replacement-candidate sampler. Unseeded runs sample
    /// non-deterministically when an error site expects more tokens than the
    /// replacement limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_time_limit_ms() -> u64 {
    5000
}

fn default_replacement_limit() -> usize {
    3
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            time_limit_ms: default_time_limit_ms(),
            replacement_limit: default_replacement_limit(),
            seed: None,
        }
    }
}

/// A single input file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileSource {
    /// Source name (file path or synthetic identifier like `<stdin>`)
    pub name: String,
    /// File content (SQL text)
    pub content: String,
}

/// SQL dialect used by the parse probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
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

impl Dialect {
    pub fn to_sqlparser_dialect(&self) -> Box<dyn sqlparser::dialect::Dialect> {
        use sqlparser::dialect::{
            AnsiDialect, BigQueryDialect, ClickHouseDialect, DatabricksDialect, DuckDbDialect,
            GenericDialect, HiveDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect,
            RedshiftSqlDialect, SQLiteDialect, SnowflakeDialect,
        };
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::Ansi => Box::new(AnsiDialect {}),
            Self::Bigquery => Box::new(BigQueryDialect {}),
            Self::Clickhouse => Box::new(ClickHouseDialect {}),
            Self::Databricks => Box::new(DatabricksDialect {}),
            Self::Duckdb => Box::new(DuckDbDialect {}),
            Self::Hive => Box::new(HiveDialect {}),
            Self::Mssql => Box::new(MsSqlDialect {}),
            Self::Mysql => Box::new(MySqlDialect {}),
            Self::Postgres => Box::new(PostgreSqlDialect {}),
            Self::Redshift => Box::new(RedshiftSqlDialect {}),
            Self::Snowflake => Box::new(SnowflakeDialect {}),
            Self::Sqlite => Box::new(SQLiteDialect {}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = RepairOptions::default();
        assert_eq!(options.time_limit_ms, 5000);
        assert_eq!(options.replacement_limit, 3);
        assert!(options.seed.is_none());
    }

    #[test]
    fn test_options_deserialize_partial() {
        let options: RepairOptions = serde_json::from_str(r#"{"replacementLimit":5}"#).unwrap();
        assert_eq!(options.replacement_limit, 5);
        assert_eq!(options.time_limit_ms, 5000);
    }

    #[test]
    fn test_dialect_serde_lowercase() {
        let dialect: Dialect = serde_json::from_str(r#""bigquery""#).unwrap();
        assert_eq!(dialect, Dialect::Bigquery);
    }
}
