//! Caret position and document statistics for status displays.

use std::fmt;

use vellum_core::Document;

/// Snapshot of the caret position and document size.
///
/// Row and column are one-based, the way status bars display them; the
/// column counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub row: usize,
    pub column: usize,
    pub characters: usize,
}

impl Status {
    /// Compute the status for a caret position in a document.
    pub fn compute(document: &Document, caret: usize) -> Self {
        let (line, col) = document.line_col_at(caret);
        Self {
            row: line + 1,
            column: col + 1,
            characters: document.char_count(),
        }
    }

    /// Text for the caret cell, e.g. `Cursor: 2:14`.
    pub fn cursor_text(&self) -> String {
        format!("Cursor: {}:{}", self.row, self.column)
    }

    /// Text for the size cell, e.g. `Characters: 128`.
    pub fn character_text(&self) -> String {
        format!("Characters: {}", self.characters)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.cursor_text(), self.character_text())
    }
}
