//! Error types for the document model.

use thiserror::Error;

/// Errors raised by document operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// A byte offset fell outside the document or inside a multi-byte
    /// character.
    #[error("byte offset {offset} is not a valid position in a document of {len} bytes")]
    OutOfRange { offset: usize, len: usize },
}

/// Result alias for fallible document operations.
pub type CoreResult<T> = Result<T, DocumentError>;
