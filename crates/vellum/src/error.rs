//! Error types for the editing engine.

use std::path::PathBuf;

use thiserror::Error;
use vellum_core::DocumentError;

/// Errors surfaced by session commands and file handling.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Reading or writing a document file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A user-supplied value could not be applied.
    #[error("invalid input {input:?}: {reason}")]
    InvalidInput { input: String, reason: String },

    /// A position or range fell outside the document.
    #[error(transparent)]
    OutOfRange(#[from] DocumentError),
}

impl EditorError {
    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_input(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias for fallible editor operations.
pub type EditResult<T> = Result<T, EditorError>;
