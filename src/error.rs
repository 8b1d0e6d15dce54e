//! Error types for the Docsplit wrapper

use thiserror::Error;

/// Result type alias for Docsplit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Docsplit wrapper
#[derive(Error, Debug)]
pub enum Error {
    /// The external tool exited with a nonzero status
    #[error("extraction failed: `{command}`\n{output}")]
    Extraction { command: String, output: String },

    /// The runtime binary could not be spawned
    #[error("external tool not found: {program}")]
    ToolNotFound { program: String },

    /// The subprocess exceeded its time budget
    #[error("external tool timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// A file the external tool should have produced is missing
    #[error("expected output file not found: {path}")]
    OutputMissing { path: String },

    /// Metadata field name outside the closed set
    #[error("unknown metadata field: {field}")]
    UnknownMetadataField { field: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
