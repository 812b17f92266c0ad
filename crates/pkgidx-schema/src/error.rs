//! Errors raised while reading, merging, or validating index documents.

use std::path::PathBuf;

/// Errors that can occur when handling a [`PackageIndex`](crate::PackageIndex).
#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    /// The document is not valid JSON at all.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is JSON but lacks the minimal index shape.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A constructed document failed structural validation.
    #[error("Invalid output: {0}")]
    InvalidOutput(String),

    /// The document could not be read from disk.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

impl IndexError {
    /// Shorthand for [`IndexError::MalformedInput`].
    pub fn malformed(msg: impl std::fmt::Display) -> Self {
        Self::MalformedInput(msg.to_string())
    }

    /// Shorthand for [`IndexError::InvalidOutput`].
    pub fn invalid_output(msg: impl std::fmt::Display) -> Self {
        Self::InvalidOutput(msg.to_string())
    }
}
