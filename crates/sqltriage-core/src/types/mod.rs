//! Types for the SQL repair API.
//!
//! This module defines the request and response types for the SQLTriage
//! repair API. The API accepts a SQL query and returns the ordered list of
//! edits (deletions and replacements) that made the remainder parse.

mod request;
mod response;

pub use request::{Dialect, FileSource, RepairOptions, RepairRequest};
pub use response::{EditDescriptor, EditKind, RepairResult, SourceSpan, Summary};
