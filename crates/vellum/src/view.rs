//! Headless view construction for styled documents.
//!
//! A view tree mirrors the document structure: a section stacks paragraphs
//! vertically, a paragraph flows its child views into rows, and each text
//! run renders as one unbreakable unit. Widths are measured in grapheme
//! columns so layout math stays font-free.
//!
//! The factory dispatches on element kind, and unrecognized kinds fall back
//! to a plain label, which wraps between words like ordinary flowed text.
//! Text runs report their minimum width equal to their natural width, so a
//! row can never split one mid-word; line breaks happen between runs and at
//! paragraph boundaries instead.

use unicode_segmentation::UnicodeSegmentation;
use vellum_core::{Document, TextStyle};

/// Placeholder occupying an embedded box's position in text flow.
pub const OBJECT_REPLACEMENT: &str = "\u{FFFC}";

/// Number of grapheme clusters in `text`.
pub fn grapheme_width(text: &str) -> usize {
    text.graphemes(true).count()
}

// ============================================================================
// ElementKind
// ============================================================================

/// The kinds of document elements a view can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// A styled run of characters.
    TextRun,
    /// A line of content, wrapped into rows.
    Paragraph,
    /// A vertical stack of paragraphs.
    Section,
    /// An embedded interactive widget.
    EmbeddedComponent,
    /// An embedded image.
    EmbeddedIcon,
}

impl ElementKind {
    /// Resolve an element name as produced by document models.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "content" => Some(Self::TextRun),
            "paragraph" => Some(Self::Paragraph),
            "section" => Some(Self::Section),
            "component" => Some(Self::EmbeddedComponent),
            "icon" => Some(Self::EmbeddedIcon),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TextRun => "content",
            Self::Paragraph => "paragraph",
            Self::Section => "section",
            Self::EmbeddedComponent => "component",
            Self::EmbeddedIcon => "icon",
        }
    }
}

// ============================================================================
// View
// ============================================================================

/// How a view may be divided across rows during paragraph layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapPolicy {
    /// Never broken internally; the whole view moves to the next row.
    NoBreak,
    /// May break between words, never inside one.
    WordBoundaries,
}

/// A laid-out piece of a row: one unbreakable unit of text flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub width: usize,
}

impl Segment {
    fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let width = grapheme_width(&text);
        Self { text, width }
    }

    fn is_blank(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// A node in the view tree.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Styled run of characters, kept whole during layout.
    TextRun { text: String, style: TextStyle },
    /// Fallback for unrecognized element kinds.
    Label { text: String, style: TextStyle },
    /// Horizontal flow of child views, wrapped into rows.
    Paragraph { children: Vec<View> },
    /// Vertical stack of child views.
    Section { children: Vec<View> },
    /// Opaque embedded widget box.
    Component { width: usize, height: usize },
    /// Opaque embedded image box.
    Icon { width: usize, height: usize },
}

impl View {
    pub fn wrap_policy(&self) -> WrapPolicy {
        match self {
            View::Label { .. } | View::Paragraph { .. } => WrapPolicy::WordBoundaries,
            _ => WrapPolicy::NoBreak,
        }
    }

    /// Width the view wants when nothing constrains it.
    pub fn preferred_width(&self) -> usize {
        match self {
            View::TextRun { text, .. } | View::Label { text, .. } => grapheme_width(text),
            View::Paragraph { children } => children.iter().map(View::preferred_width).sum(),
            View::Section { children } => {
                children.iter().map(View::preferred_width).max().unwrap_or(0)
            }
            View::Component { width, .. } | View::Icon { width, .. } => *width,
        }
    }

    /// Narrowest width the view can be laid out in without clipping.
    ///
    /// For a text run this equals the preferred width, which is what keeps
    /// rows from breaking inside one.
    pub fn min_width(&self) -> usize {
        match self {
            View::TextRun { text, .. } => grapheme_width(text),
            View::Label { text, .. } => text
                .split_whitespace()
                .map(grapheme_width)
                .max()
                .unwrap_or(0),
            View::Paragraph { children } | View::Section { children } => {
                children.iter().map(View::min_width).max().unwrap_or(0)
            }
            View::Component { width, .. } | View::Icon { width, .. } => *width,
        }
    }

    /// Number of rows the view occupies at the given width.
    pub fn height_for_width(&self, available: usize) -> usize {
        match self {
            View::TextRun { .. } => 1,
            View::Label { .. } | View::Paragraph { .. } => {
                self.wrap_rows(available).len().max(1)
            }
            View::Section { children } => {
                children.iter().map(|c| c.height_for_width(available)).sum()
            }
            View::Component { height, .. } | View::Icon { height, .. } => *height,
        }
    }

    /// Break this view's flow into rows no wider than `available`.
    ///
    /// Each row is a list of segments. A segment wider than `available`
    /// overflows its own row rather than splitting; a break consumes the
    /// whitespace it lands on.
    pub fn wrap_rows(&self, available: usize) -> Vec<Vec<Segment>> {
        let mut rows: Vec<Vec<Segment>> = Vec::new();
        let mut row: Vec<Segment> = Vec::new();
        let mut width = 0;
        for seg in self.segments() {
            if width + seg.width > available && !row.is_empty() {
                while row.last().is_some_and(Segment::is_blank) {
                    row.pop();
                }
                rows.push(std::mem::take(&mut row));
                width = 0;
                if seg.is_blank() {
                    continue;
                }
            }
            if seg.is_blank() && row.is_empty() {
                continue;
            }
            width += seg.width;
            row.push(seg);
        }
        if !row.is_empty() {
            rows.push(row);
        }
        rows
    }

    /// The atomic units this view contributes to a text flow.
    fn segments(&self) -> Vec<Segment> {
        match self {
            View::TextRun { text, .. } => {
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![Segment::new(text.clone())]
                }
            }
            View::Label { text, .. } => text.split_word_bounds().map(Segment::new).collect(),
            View::Paragraph { children } => {
                children.iter().flat_map(View::segments).collect()
            }
            View::Section { .. } => Vec::new(),
            View::Component { width, .. } | View::Icon { width, .. } => {
                vec![Segment {
                    text: OBJECT_REPLACEMENT.to_string(),
                    width: *width,
                }]
            }
        }
    }
}

// ============================================================================
// ViewFactory
// ============================================================================

/// Builds views for elements and whole documents.
#[derive(Debug, Default)]
pub struct ViewFactory;

impl ViewFactory {
    pub fn new() -> Self {
        Self
    }

    /// Map an element kind to its view strategy.
    ///
    /// Container kinds start with no children; [`ViewFactory::build`]
    /// attaches them when assembling a document tree. Embedded boxes get a
    /// one-cell placeholder extent.
    pub fn create(&self, kind: ElementKind, text: &str, style: TextStyle) -> View {
        match kind {
            ElementKind::TextRun => View::TextRun {
                text: text.to_string(),
                style,
            },
            ElementKind::Paragraph => View::Paragraph {
                children: Vec::new(),
            },
            ElementKind::Section => View::Section {
                children: Vec::new(),
            },
            ElementKind::EmbeddedComponent => View::Component {
                width: 1,
                height: 1,
            },
            ElementKind::EmbeddedIcon => View::Icon {
                width: 1,
                height: 1,
            },
        }
    }

    /// Resolve an element by name. Unrecognized names get a plain label so
    /// foreign content still renders as text.
    pub fn create_named(&self, name: &str, text: &str, style: TextStyle) -> View {
        match ElementKind::from_name(name) {
            Some(kind) => self.create(kind, text, style),
            None => {
                tracing::debug!(
                    target: "vellum::view",
                    name,
                    "unknown element kind, using label"
                );
                View::Label {
                    text: text.to_string(),
                    style,
                }
            }
        }
    }

    /// Build the view tree for a document: a section holding one paragraph
    /// per line, each carrying its styled runs in order.
    pub fn build(&self, document: &Document) -> View {
        let mut paragraphs = Vec::new();
        let mut current: Vec<View> = Vec::new();
        for (text, style) in document.styled_spans() {
            let mut first = true;
            for piece in text.split('\n') {
                if !first {
                    paragraphs.push(View::Paragraph {
                        children: std::mem::take(&mut current),
                    });
                }
                if !piece.is_empty() {
                    current.push(View::TextRun {
                        text: piece.to_string(),
                        style,
                    });
                }
                first = false;
            }
        }
        paragraphs.push(View::Paragraph { children: current });
        View::Section {
            children: paragraphs,
        }
    }
}
