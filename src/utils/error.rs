//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs.
//!
//! A malformed trace entry is deliberately absent here: `collect` treats it
//! as a silent abort and records it on the collector status instead.

use thiserror::Error;

/// Errors that can occur while loading a raw trace
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),

    #[error("Failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when restoring a serialized snapshot
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot must be a JSON object")]
    NotAnObject,

    #[error("Snapshot is missing field: {0}")]
    MissingField(&'static str),
}

/// Errors that can occur while loading collector configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during profile output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Failed to decode profile: {0}")]
    Decode(#[from] DecodeError),
}
