pub mod candidates;
pub mod edit;
pub mod engine;
pub mod error;
pub mod parser;
pub mod search;
pub mod tracker;
pub mod types;

// Re-export main types and functions
pub use engine::{repair, repair_with_probe};
pub use error::RepairError;
pub use parser::{ParseProbe, ProbeError, SqlparserProbe, SyntaxIssue};
pub use tracker::PositionTracker;

// Re-export types explicitly
pub use types::{
    // Request types
    Dialect,
    // Response types
    EditDescriptor,
    EditKind,
    FileSource,
    RepairOptions,
    RepairRequest,
    RepairResult,
    SourceSpan,
    Summary,
};
