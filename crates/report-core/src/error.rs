use std::path::PathBuf;
use thiserror::Error;

/// Process exit status for a generic processing failure.
pub const EXIT_PROCESSING_ERROR: u8 = 1;
/// Process exit status for usage errors, including an unknown report kind.
pub const EXIT_USAGE_ERROR: u8 = 2;
/// Process exit status when an input file does not exist.
pub const EXIT_FILE_NOT_FOUND: u8 = 3;
/// Process exit status when input data cannot be parsed.
pub const EXIT_MALFORMED_DATA: u8 = 4;

/// All errors produced by the report pipeline.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A requested input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// The requested report name is not in the registry.
    #[error("Unknown report type: {0}")]
    UnknownReportKind(String),

    /// A numeric field could not be parsed. Rows carrying one are dropped
    /// by the aggregator; this variant never leaves it.
    #[error("Malformed value in field '{field}': {value:?}")]
    MalformedValue { field: String, value: String },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A delimited file is structurally broken (bad quoting, invalid UTF-8).
    #[error("Failed to parse {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A result could not be serialised to JSON.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReportError {
    /// Exit status the binary terminates with when this error reaches `main`.
    pub fn exit_code(&self) -> u8 {
        match self {
            ReportError::MissingFile(_) => EXIT_FILE_NOT_FOUND,
            ReportError::UnknownReportKind(_) => EXIT_USAGE_ERROR,
            ReportError::MalformedValue { .. } | ReportError::Csv { .. } => EXIT_MALFORMED_DATA,
            ReportError::FileRead { .. }
            | ReportError::Json(_)
            | ReportError::Io(_)
            | ReportError::Other(_) => EXIT_PROCESSING_ERROR,
        }
    }
}

/// Convenience alias used throughout the report crates.
pub type Result<T> = std::result::Result<T, ReportError>;
