use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the history grouper.
#[derive(Error, Debug)]
pub enum GrouperError {
    /// The history file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The grouped output could not be written to disk.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or serialized.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A line decoded to valid JSON that is not an object.
    #[error("Expected a JSON object, found {0}")]
    NotAnObject(String),
}

/// Convenience alias used throughout the grouper crates.
pub type Result<T> = std::result::Result<T, GrouperError>;
