//! Error types for calllog-core

use thiserror::Error;

/// Main error type for the calllog-core library
///
/// Upload failures are not errors: a finished upload always yields an
/// [`UploadOutcome`](crate::upload::UploadOutcome).
#[derive(Error, Debug)]
pub enum Error {
    /// Call-log database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The record source could not produce a record sequence
    #[error("failed to read call log: {0}")]
    SourceRead(String),

    /// A record could not be rendered into the wire format
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Result type alias for calllog-core
pub type Result<T> = std::result::Result<T, Error>;
