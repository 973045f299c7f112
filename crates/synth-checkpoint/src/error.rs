//! Error types for the checkpoint crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reading or writing a checkpoint file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CheckpointError {
    /// The checkpoint file could not be read.
    #[error("failed to read checkpoint at {path:?}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The checkpoint file could not be written (including the atomic
    /// rename step).
    #[error("failed to write checkpoint at {path:?}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The checkpoint file existed and was readable but did not contain a
    /// valid blob.
    #[error("checkpoint at {path:?} is corrupt: {source}")]
    Corrupt {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for checkpoint operations.
pub type CheckpointResult<T> = Result<T, CheckpointError>;
