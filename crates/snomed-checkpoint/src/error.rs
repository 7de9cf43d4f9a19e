//! Checkpoint I/O and serialization errors.
//!
//! These never escape [`crate::store::CheckpointStore`]'s public
//! methods as hard failures; they are logged and the store falls back
//! to "no checkpoint" (on read) or keeps the in-memory view
//! authoritative (on write), per the checkpoint lifecycle contract.

use thiserror::Error;

/// Errors from loading or saving the checkpoint file.
#[derive(Error, Debug)]
pub enum CheckpointError {
    /// Failure reading or writing the checkpoint file.
    #[error("checkpoint I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure (de)serializing the checkpoint JSON.
    #[error("checkpoint serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for internal checkpoint I/O.
pub type CheckpointResult<T> = Result<T, CheckpointError>;
