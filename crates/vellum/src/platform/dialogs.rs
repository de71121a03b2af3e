//! Host-supplied dialogs.
//!
//! Session commands that need a file path or a typed answer ask a
//! [`DialogProvider`] rather than opening windows themselves. A GUI host
//! implements the trait with native choosers; tests script the answers.

use std::path::PathBuf;

// ============================================================================
// FileFilter
// ============================================================================

/// A file filter for restricting visible files in a chooser.
///
/// # Example
///
/// ```
/// use vellum::FileFilter;
///
/// let filter = FileFilter::new("Markdown", &["*.md", "*.markdown"]);
/// assert!(filter.matches("notes.md"));
/// assert!(!filter.matches("notes.rs"));
/// ```
#[derive(Debug, Clone)]
pub struct FileFilter {
    /// Display name for the filter (e.g., "Text Files").
    pub name: String,

    /// Glob patterns for matching files (e.g., ["*.txt"]).
    pub patterns: Vec<String>,
}

impl FileFilter {
    /// Create a new file filter with a name and patterns.
    pub fn new(name: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Create an "All Files" filter that matches everything.
    pub fn all_files() -> Self {
        Self::new("All Files", &["*"])
    }

    /// Create a filter for plain text files.
    pub fn text_files() -> Self {
        Self::new("Text Files", &["*.txt"])
    }

    /// Check if a filename matches this filter.
    pub fn matches(&self, filename: &str) -> bool {
        let filename_lower = filename.to_lowercase();

        for pattern in &self.patterns {
            if pattern == "*" {
                return true;
            }

            // Handle simple extension patterns like "*.txt"
            if let Some(ext_pattern) = pattern.strip_prefix("*.")
                && filename_lower.ends_with(&format!(".{}", ext_pattern.to_lowercase()))
            {
                return true;
            }
        }

        false
    }

    /// Get the display text for this filter (name + patterns).
    pub fn display_text(&self) -> String {
        format!("{} ({})", self.name, self.patterns.join(", "))
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::all_files()
    }
}

// ============================================================================
// DialogProvider
// ============================================================================

/// Dialogs a host makes available to the editing session.
///
/// Every method returns `None` when the user cancels.
pub trait DialogProvider {
    /// Choose an existing file to open.
    fn open_path(&mut self, filter: &FileFilter) -> Option<PathBuf>;

    /// Choose a destination file for saving.
    fn save_path(&mut self, filter: &FileFilter) -> Option<PathBuf>;

    /// Ask the user for a line of text.
    fn input_line(&mut self, prompt: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_extension_case_insensitively() {
        let filter = FileFilter::text_files();
        assert!(filter.matches("readme.txt"));
        assert!(filter.matches("README.TXT"));
        assert!(!filter.matches("readme.md"));
    }

    #[test]
    fn test_all_files_matches_everything() {
        let filter = FileFilter::all_files();
        assert!(filter.matches("anything.xyz"));
        assert!(filter.matches("no_extension"));
    }

    #[test]
    fn test_display_text() {
        let filter = FileFilter::new("Docs", &["*.txt", "*.md"]);
        assert_eq!(filter.display_text(), "Docs (*.txt, *.md)");
    }
}
