//! Error types for the transfer engine.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal engine errors; these abort the whole batch.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Destination root directory could not be created
    #[error("cannot create destination directory {path}: {source}")]
    CreateDest {
        /// Destination root
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Per-file recoverable failures, accumulated across the batch.
#[derive(Debug, Error)]
pub enum FileError {
    /// Open/read/create/write failed while copying one file
    #[error("copy of {path} failed: {source}")]
    Copy {
        /// Source path of the failed file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading back a file for verification failed
    #[error("hashing {path} failed: {source}")]
    Hash {
        /// Path that could not be hashed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Source and destination hashes differ; destination kept for inspection
    #[error("hash mismatch copying {from} to {to}")]
    HashMismatch {
        /// Source path
        from: PathBuf,
        /// Destination path, left in place
        to: PathBuf,
    },
}
