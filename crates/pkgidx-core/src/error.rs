//! Errors for the merge pipeline.

use pkgidx_schema::IndexError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a merge run. All variants are fatal.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A feed root, version directory, or expected index file is missing.
    #[error("Missing input: {what} not found at {}", .path.display())]
    MissingInputFile {
        /// What was being looked for.
        what: String,
        /// Where it was expected.
        path: PathBuf,
    },

    /// The canonical aggregate does not exist yet; it is never synthesized.
    #[error("Base index {} does not exist", .path.display())]
    MissingBase {
        /// Expected location of the aggregate.
        path: PathBuf,
    },

    /// The run configuration is unreadable or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An input document failed to load or parse.
    #[error("{}: {source}", .path.display())]
    Index {
        /// Document that failed.
        path: PathBuf,
        /// What was wrong with it.
        source: IndexError,
    },

    /// The merge itself or output validation failed.
    #[error(transparent)]
    Merge(#[from] IndexError),

    /// Filesystem failure outside document parsing.
    #[error("{context}: {source}")]
    Io {
        /// Operation that failed.
        context: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Create an I/O error with context for better debugging.
    pub fn io(context: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::Io {
            context: context.to_string(),
            source,
        }
    }

    /// Create a [`PipelineError::MissingInputFile`].
    pub fn missing(what: impl std::fmt::Display, path: impl Into<PathBuf>) -> Self {
        Self::MissingInputFile {
            what: what.to_string(),
            path: path.into(),
        }
    }
}
