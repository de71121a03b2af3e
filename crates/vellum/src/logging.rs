//! Logging and debugging facilities for Vellum.
//!
//! This module provides:
//! - Integration with the `tracing` crate for structured logging
//! - Debug visualization for view trees
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! Vellum uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in the host application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! # Debug Visualization
//!
//! Use [`ViewTreeDebug`] to dump the layout tree a document produced:
//!
//! ```
//! use vellum::{Document, ViewFactory, ViewTreeDebug};
//!
//! let document = Document::from_text("hello\nworld");
//! let tree = ViewFactory::new().build(&document);
//! println!("{}", ViewTreeDebug::new().format_view(&tree));
//! ```

use std::fmt::Write as FmtWrite;

use crate::view::View;

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Document model target.
    pub const DOCUMENT: &str = "vellum_core::document";
    /// Undo history target.
    pub const HISTORY: &str = "vellum_core::history";
    /// Signal dispatch target.
    pub const SIGNAL: &str = "vellum_core::signal";
    /// Editing session target.
    pub const SESSION: &str = "vellum::session";
    /// View construction and layout target.
    pub const VIEW: &str = "vellum::view";
    /// File reading and writing target.
    pub const IO: &str = "vellum::io";
    /// Configuration loading target.
    pub const CONFIG: &str = "vellum::config";
    /// Clipboard bridge target.
    pub const CLIPBOARD: &str = "vellum::platform::clipboard";
}

/// Style options for view tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for view tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show preferred and minimum widths.
    pub show_widths: bool,
    /// Whether to show style attributes on text nodes.
    pub show_styles: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_widths: true,
            show_styles: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_styles: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_widths: false,
            show_styles: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing view trees.
///
/// Renders the section/paragraph/run hierarchy produced by
/// [`crate::ViewFactory`] in a human-readable format.
#[derive(Debug, Clone, Default)]
pub struct ViewTreeDebug {
    options: TreeFormatOptions,
}

impl ViewTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format a view and everything below it.
    pub fn format_view(&self, view: &View) -> String {
        let mut output = String::new();
        self.format_into(view, 0, true, &mut output);
        output
    }

    fn format_into(&self, view: &View, depth: usize, is_last: bool, output: &mut String) {
        if let Some(max) = self.options.max_depth
            && depth > max
        {
            return;
        }

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(&self.describe(view));
        output.push('\n');

        let children: &[View] = match view {
            View::Paragraph { children } | View::Section { children } => children,
            _ => &[],
        };
        let child_count = children.len();
        for (i, child) in children.iter().enumerate() {
            self.format_into(child, depth + 1, i + 1 == child_count, output);
        }
    }

    /// One line describing a node: its kind, a text excerpt, and the
    /// optional width and style annotations.
    fn describe(&self, view: &View) -> String {
        let mut line = match view {
            View::TextRun { text, .. } => format!("run {}", excerpt(text)),
            View::Label { text, .. } => format!("label {}", excerpt(text)),
            View::Paragraph { .. } => "paragraph".to_string(),
            View::Section { .. } => "section".to_string(),
            View::Component { .. } => "component".to_string(),
            View::Icon { .. } => "icon".to_string(),
        };
        if self.options.show_widths {
            write!(line, " (w {}, min {})", view.preferred_width(), view.min_width())
                .expect("write to String");
        }
        if self.options.show_styles
            && let (View::TextRun { style, .. } | View::Label { style, .. }) = view
            && style.is_styled()
        {
            let mut attrs = Vec::new();
            if style.bold {
                attrs.push("bold".to_string());
            }
            if style.italic {
                attrs.push("italic".to_string());
            }
            if style.underline {
                attrs.push("underline".to_string());
            }
            if let Some(size) = style.font_size {
                attrs.push(format!("{size}pt"));
            }
            write!(line, " [{}]", attrs.join("+")).expect("write to String");
        }
        line
    }

    /// Build the prefix string for a tree node.
    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.options.indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }
}

/// A short quoted preview of a node's text, with newlines escaped.
fn excerpt(text: &str) -> String {
    const MAX_CHARS: usize = 24;
    let flat: String = text
        .chars()
        .take(MAX_CHARS + 1)
        .map(|c| if c == '\n' { '\u{23ce}' } else { c })
        .collect();
    if flat.chars().count() > MAX_CHARS {
        let kept: String = flat.chars().take(MAX_CHARS).collect();
        format!("{kept:?}\u{2026}")
    } else {
        format!("{flat:?}")
    }
}

/// A guard that emits a tracing span when dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "vellum::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use vellum_core::Document;

    use crate::view::ViewFactory;

    fn two_line_tree() -> View {
        let document = Document::from_text("hello world\nsecond");
        ViewFactory::new().build(&document)
    }

    #[test]
    fn test_tree_format_lists_all_nodes() {
        let tree = two_line_tree();
        let output = ViewTreeDebug::new().format_view(&tree);
        assert!(output.starts_with("section"));
        assert_eq!(output.matches("paragraph").count(), 2);
        assert!(output.contains("\"hello world\""));
        assert!(output.contains("\"second\""));
    }

    #[test]
    fn test_tree_format_shows_widths() {
        let tree = two_line_tree();
        let output = ViewTreeDebug::new().format_view(&tree);
        // "hello world" is eleven columns and never breaks internally
        assert!(output.contains("(w 11, min 11)"));
    }

    #[test]
    fn test_tree_format_ascii_style() {
        let tree = two_line_tree();
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..Default::default()
        };
        let output = ViewTreeDebug::with_options(options).format_view(&tree);
        assert!(output.contains("+--"));
        assert!(output.contains("`--"));
        assert!(!output.contains('\u{251c}'));
    }

    #[test]
    fn test_tree_format_max_depth() {
        let tree = two_line_tree();
        let options = TreeFormatOptions {
            max_depth: Some(0),
            ..Default::default()
        };
        let output = ViewTreeDebug::with_options(options).format_view(&tree);
        assert_eq!(output.trim_end().lines().count(), 1);
        assert!(!output.contains("paragraph"));
    }

    #[test]
    fn test_tree_format_styles_annotated() {
        use vellum_core::TextStyle;

        let mut document = Document::from_text("bold move");
        document
            .set_style(0..4, TextStyle::bold().with_font_size(18))
            .unwrap();
        let tree = ViewFactory::new().build(&document);
        let output = ViewTreeDebug::with_options(TreeFormatOptions::detailed()).format_view(&tree);
        assert!(output.contains("[bold+18pt]"));
    }

    #[test]
    fn test_excerpt_truncates_and_escapes() {
        let long = "a".repeat(40);
        assert!(excerpt(&long).ends_with('\u{2026}'));
        assert!(excerpt("a\nb").contains('\u{23ce}'));
    }
}
