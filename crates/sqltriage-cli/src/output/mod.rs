//! Output formatting modules.

use serde::Serialize;
use sqltriage_core::RepairResult;

pub mod json;
pub mod table;

pub use json::format_json;
pub use table::format_table;

/// The repair outcome for one input file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRepair {
    pub name: String,
    pub result: RepairResult,
}
