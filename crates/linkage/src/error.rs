//! Error types for linkage CLI operations.

use linkage_engine::EdgeId;
use std::io;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.linkage` directory was found in the directory tree.
    #[error("not inside a linkage diagram (run `linkage init` first)")]
    NotInitialized,

    /// The configuration file could not be parsed or holds invalid values.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Snapshot storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The snapshot file is not valid JSONL.
    #[error("invalid snapshot format: {0}")]
    InvalidFormat(String),

    /// A record could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(serde_json::Error),
}

/// The error type for linkage CLI operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Connector not found in the snapshot.
    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// Edge id generation failed.
    #[error("id generation failed: {0}")]
    IdGeneration(#[from] crate::id_generation::IdGenerationError),
}

/// A specialized Result type for linkage operations.
pub type Result<T> = std::result::Result<T, Error>;
