//! One-shot file helpers for loading and saving documents.

use std::fs;
use std::path::Path;

use crate::error::{EditResult, EditorError};

/// Read a whole file as UTF-8 text.
pub fn read_text(path: impl AsRef<Path>) -> EditResult<String> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| EditorError::io(e, path))?;
    tracing::debug!(
        target: "vellum::io",
        path = %path.display(),
        bytes = text.len(),
        "read document"
    );
    Ok(text)
}

/// Write text to a file, replacing any existing content.
pub fn write_text(path: impl AsRef<Path>, text: &str) -> EditResult<()> {
    let path = path.as_ref();
    fs::write(path, text).map_err(|e| EditorError::io(e, path))?;
    tracing::debug!(
        target: "vellum::io",
        path = %path.display(),
        bytes = text.len(),
        "wrote document"
    );
    Ok(())
}
