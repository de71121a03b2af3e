//! Editor configuration, persisted as TOML.
//!
//! Missing keys fall back to their defaults, so old config files keep
//! working as fields are added.

use std::path::Path;

use serde::{Deserialize, Serialize};
use vellum_core::DEFAULT_EDIT_LIMIT;

use crate::error::{EditResult, EditorError};
use crate::io;

/// Tunable behavior for an editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Point size reported for text with no explicit size attribute.
    pub default_font_size: u32,
    /// Maximum number of edits retained for undo.
    pub undo_limit: usize,
    /// Coalesce consecutive single-character typing into one edit.
    pub merge_typing: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_font_size: 12,
            undo_limit: DEFAULT_EDIT_LIMIT,
            merge_typing: true,
        }
    }
}

impl EditorConfig {
    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> EditResult<Self> {
        let path = path.as_ref();
        let text = io::read_text(path)?;
        let config = toml::from_str(&text)
            .map_err(|e| EditorError::invalid_input(path.display().to_string(), e.to_string()))?;
        tracing::debug!(target: "vellum::config", path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Write this configuration to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> EditResult<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| EditorError::invalid_input("config", e.to_string()))?;
        io::write_text(path, &text)
    }
}
