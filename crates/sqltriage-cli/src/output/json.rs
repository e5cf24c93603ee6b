//! JSON output formatting.

use crate::output::FileRepair;

/// Format the repair outcome as JSON.
///
/// A single input serializes to its bare result object; multiple inputs
/// serialize to an array of per-file entries. If `compact` is true, outputs
/// minified JSON without whitespace.
pub fn format_json(repairs: &[FileRepair], compact: bool) -> String {
    match repairs {
        [single] if compact => {
            serde_json::to_string(&single.result).expect("serialization cannot fail")
        }
        [single] => {
            serde_json::to_string_pretty(&single.result).expect("serialization cannot fail")
        }
        many if compact => serde_json::to_string(many).expect("serialization cannot fail"),
        many => serde_json::to_string_pretty(many).expect("serialization cannot fail"),
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
    fn test_json_single_file_is_bare_result() {
        let json = format_json(&[repair_of("SELECT * FROM users")], false);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["edits"].as_array().unwrap().is_empty());
        assert_eq!(value["repairedSql"], "SELECT * FROM users");
        assert_eq!(value["timedOut"], false);
    }

    #[test]
    fn test_json_multiple_files_is_array() {
        let repairs = vec![repair_of("SELECT 1"), repair_of("SELECT 2")];
        let json = format_json(&repairs, true);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["name"], "test.sql");
    }

    #[test]
    fn test_json_compact() {
        let json = format_json(&[repair_of("SELECT 1")], true);
        assert!(!json.starts_with("{\n"));
    }
}
