//! Styled document model.
//!
//! A [`Document`] stores plain UTF-8 text plus a sorted list of attribute
//! runs. Each run covers a byte range and carries a [`TextStyle`]; text not
//! covered by any run renders with the default style. Positions and ranges
//! are byte offsets into the text and must land on `char` boundaries.
//!
//! The run list is kept canonical after every mutation: sorted by start,
//! non-overlapping, non-empty, adjacent runs with equal styles merged, and
//! runs with the default style dropped.
//!
//! # Example
//!
//! ```
//! use vellum_core::{Document, TextStyle};
//!
//! let mut doc = Document::new();
//! doc.insert(0, "hello world", TextStyle::default()).unwrap();
//! doc.set_style(0..5, TextStyle::bold()).unwrap();
//!
//! assert!(doc.style_at(2).bold);
//! assert!(!doc.style_at(7).bold);
//! ```

use std::ops::Range;

use crate::error::{CoreResult, DocumentError};

// ============================================================================
// TextStyle
// ============================================================================

/// Character-level attributes: weight, slant, underline, and point size.
///
/// A `None` font size means the run inherits whatever default the host
/// renders with. [`TextStyle::is_styled`] reports whether any attribute
/// deviates from the default; unstyled runs are never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font_size: Option<u32>,
}

impl TextStyle {
    /// Create a default (unstyled) style.
    pub fn new() -> Self {
        Self::default()
    }

    /// A style with only the bold flag set.
    pub fn bold() -> Self {
        Self::new().with_bold(true)
    }

    /// A style with only the italic flag set.
    pub fn italic() -> Self {
        Self::new().with_italic(true)
    }

    /// A style with only the underline flag set.
    pub fn underline() -> Self {
        Self::new().with_underline(true)
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Whether any attribute differs from the default.
    pub fn is_styled(&self) -> bool {
        self.bold || self.italic || self.underline || self.font_size.is_some()
    }
}

// ============================================================================
// StyleRun
// ============================================================================

/// A contiguous byte range sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRun {
    pub range: Range<usize>,
    pub style: TextStyle,
}

impl StyleRun {
    pub fn new(range: Range<usize>, style: TextStyle) -> Self {
        Self { range, style }
    }

    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    pub fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }

    /// Whether this run overlaps the given range.
    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        self.range.start < range.end && range.start < self.range.end
    }

    /// Whether the position falls inside this run.
    pub fn contains(&self, pos: usize) -> bool {
        self.range.contains(&pos)
    }
}

// ============================================================================
// Fragment
// ============================================================================

/// A detached piece of styled text.
///
/// Fragments are what [`Document::delete`] returns and what
/// [`Document::insert_fragment`] splices back in. Their runs are relative
/// to the fragment start, so a fragment round-trips through delete and
/// re-insert with its styling intact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    runs: Vec<StyleRun>,
}

impl Fragment {
    /// A fragment with no styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            runs: Vec::new(),
        }
    }

    /// A fragment covered by a single uniform style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        let text = text.into();
        let runs = if style.is_styled() && !text.is_empty() {
            vec![StyleRun::new(0..text.len(), style)]
        } else {
            Vec::new()
        };
        Self { text, runs }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The single style covering the whole fragment, if there is one.
    /// Returns `None` for mixed styling.
    pub fn uniform_style(&self) -> Option<TextStyle> {
        match self.runs.as_slice() {
            [] => Some(TextStyle::default()),
            [run] if run.range.start == 0 && run.range.end == self.text.len() => Some(run.style),
            _ => None,
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// UTF-8 text with attribute runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    runs: Vec<StyleRun>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document holding unstyled text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            runs: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of `char`s in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of lines. An empty document has one line.
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// The current attribute runs, sorted and non-overlapping.
    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    /// Replace the entire content with unstyled text, discarding all runs.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.runs.clear();
    }

    /// Remove all text and styling.
    pub fn clear(&mut self) {
        self.set_content(String::new());
    }

    /// Validate that `offset` lies inside the document on a `char` boundary.
    pub fn check_offset(&self, offset: usize) -> CoreResult<()> {
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return Err(DocumentError::OutOfRange {
                offset,
                len: self.text.len(),
            });
        }
        Ok(())
    }

    /// Validate both ends of a range.
    pub fn check_range(&self, range: &Range<usize>) -> CoreResult<()> {
        if range.start > range.end {
            return Err(DocumentError::OutOfRange {
                offset: range.start,
                len: self.text.len(),
            });
        }
        self.check_offset(range.start)?;
        self.check_offset(range.end)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Style of the character at `pos`, or the default style when no run
    /// covers it. Positions at or past the end report the default style.
    pub fn style_at(&self, pos: usize) -> TextStyle {
        for run in &self.runs {
            if run.contains(pos) {
                return run.style;
            }
            if run.range.start > pos {
                break;
            }
        }
        TextStyle::default()
    }

    /// Style shared by every character in `range`, or `None` when the range
    /// mixes styles. An empty range reports the style at its start.
    pub fn style_over(&self, range: Range<usize>) -> Option<TextStyle> {
        if range.is_empty() {
            return Some(self.style_at(range.start));
        }
        let mut styles = Vec::new();
        let mut pos = range.start;
        for run in &self.runs {
            if run.range.end <= range.start {
                continue;
            }
            if run.range.start >= range.end {
                break;
            }
            if run.range.start > pos {
                // unstyled gap before this run
                styles.push(TextStyle::default());
            }
            styles.push(run.style);
            pos = run.range.end;
        }
        if pos < range.end {
            styles.push(TextStyle::default());
        }
        let first = styles.first().copied().unwrap_or_default();
        styles.iter().all(|s| *s == first).then_some(first)
    }

    /// The runs overlapping `range`, clipped to it and rebased so offsets
    /// are relative to `range.start`.
    pub fn runs_in(&self, range: Range<usize>) -> Vec<StyleRun> {
        let mut out = Vec::new();
        for run in &self.runs {
            if !run.overlaps(&range) {
                continue;
            }
            let start = run.range.start.max(range.start) - range.start;
            let end = run.range.end.min(range.end) - range.start;
            if start < end {
                out.push(StyleRun::new(start..end, run.style));
            }
        }
        out
    }

    /// Copy a range out as a fragment without mutating the document.
    pub fn fragment(&self, range: Range<usize>) -> CoreResult<Fragment> {
        self.check_range(&range)?;
        Ok(Fragment {
            text: self.text[range.clone()].to_string(),
            runs: self.runs_in(range),
        })
    }

    /// Flatten the document into `(text, style)` spans covering every byte
    /// exactly once, in order. Gaps between runs appear with the default
    /// style.
    pub fn styled_spans(&self) -> Vec<(&str, TextStyle)> {
        let mut spans = Vec::new();
        let mut pos = 0;
        for run in &self.runs {
            if run.range.start > pos {
                spans.push((&self.text[pos..run.range.start], TextStyle::default()));
            }
            spans.push((&self.text[run.range.clone()], run.style));
            pos = run.range.end;
        }
        if pos < self.text.len() {
            spans.push((&self.text[pos..], TextStyle::default()));
        }
        spans
    }

    /// Zero-based line and column of a byte position. Columns count `char`s,
    /// not bytes. Positions past the end report the final line and column.
    pub fn line_col_at(&self, pos: usize) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for (idx, ch) in self.text.char_indices() {
            if idx >= pos {
                break;
            }
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Insert text at `pos` with the given style.
    ///
    /// The inserted range resolves to exactly `style`, even when it is the
    /// default: surrounding runs never bleed into freshly typed text.
    #[tracing::instrument(skip_all, target = "vellum_core::document", level = "trace")]
    pub fn insert(&mut self, pos: usize, text: &str, style: TextStyle) -> CoreResult<()> {
        self.check_offset(pos)?;
        if text.is_empty() {
            return Ok(());
        }
        let len = text.len();
        self.text.insert_str(pos, text);
        for run in &mut self.runs {
            if run.range.start >= pos {
                run.range.start += len;
                run.range.end += len;
            } else if run.range.end > pos {
                run.range.end += len;
            }
        }
        self.set_style(pos..pos + len, style)
    }

    /// Splice a fragment back in at `pos`, reproducing its styling.
    pub fn insert_fragment(&mut self, pos: usize, fragment: &Fragment) -> CoreResult<()> {
        self.check_offset(pos)?;
        if fragment.is_empty() {
            return Ok(());
        }
        let len = fragment.text.len();
        self.text.insert_str(pos, &fragment.text);
        for run in &mut self.runs {
            if run.range.start >= pos {
                run.range.start += len;
                run.range.end += len;
            } else if run.range.end > pos {
                run.range.end += len;
            }
        }
        self.set_style(pos..pos + len, TextStyle::default())?;
        for run in &fragment.runs {
            self.set_style(
                pos + run.range.start..pos + run.range.end,
                run.style,
            )?;
        }
        Ok(())
    }

    /// Delete a range, returning the removed text with its styling.
    #[tracing::instrument(skip_all, target = "vellum_core::document", level = "trace")]
    pub fn delete(&mut self, range: Range<usize>) -> CoreResult<Fragment> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(Fragment::default());
        }
        let removed = Fragment {
            text: self.text[range.clone()].to_string(),
            runs: self.runs_in(range.clone()),
        };
        let len = range.end - range.start;
        self.text.replace_range(range.clone(), "");
        let mut kept = Vec::with_capacity(self.runs.len());
        for mut run in self.runs.drain(..) {
            if run.range.end <= range.start {
                kept.push(run);
                continue;
            }
            if run.range.start >= range.end {
                run.range.start -= len;
                run.range.end -= len;
                kept.push(run);
                continue;
            }
            // Run overlaps the deleted range: keep whatever sticks out.
            let start = run.range.start.min(range.start);
            let end = if run.range.end > range.end {
                run.range.end - len
            } else {
                range.start
            };
            if start < end {
                run.range = start..end;
                kept.push(run);
            }
        }
        self.runs = kept;
        self.normalize_runs();
        Ok(removed)
    }

    /// Apply a style to a range, replacing whatever was there.
    ///
    /// Setting the default style removes styling from the range. Runs
    /// partially covered by the range are split so text outside it keeps
    /// its attributes.
    pub fn set_style(&mut self, range: Range<usize>, style: TextStyle) -> CoreResult<()> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }
        let mut kept = Vec::with_capacity(self.runs.len() + 1);
        for run in self.runs.drain(..) {
            if !run.overlaps(&range) {
                kept.push(run);
                continue;
            }
            if run.range.start < range.start {
                kept.push(StyleRun::new(run.range.start..range.start, run.style));
            }
            if run.range.end > range.end {
                kept.push(StyleRun::new(range.end..run.range.end, run.style));
            }
        }
        if style.is_styled() {
            kept.push(StyleRun::new(range, style));
        }
        self.runs = kept;
        self.normalize_runs();
        Ok(())
    }

    /// Toggle the attributes set in `toggle` over a range.
    ///
    /// When every character in the range already carries all of the toggled
    /// attributes they are removed; otherwise they are applied everywhere.
    /// Returns the value the attributes were set to. Attributes not set in
    /// `toggle` are left alone.
    pub fn toggle_style(&mut self, range: Range<usize>, toggle: TextStyle) -> CoreResult<bool> {
        self.check_range(&range)?;
        let enable = !self.range_has_style(&range, &toggle);
        self.apply_style_change(range, &toggle, enable)?;
        Ok(enable)
    }

    /// Set the font size over a range, preserving the other attributes of
    /// each covered section. Size validation is the caller's concern.
    pub fn apply_font_size(&mut self, range: Range<usize>, size: u32) -> CoreResult<()> {
        self.check_range(&range)?;
        self.apply_style_change(range, &TextStyle::new().with_font_size(size), true)
    }

    /// Reinstate a previously captured run snapshot over a range. The runs
    /// are relative to `range.start`, as produced by [`Document::runs_in`].
    pub fn restore_runs(&mut self, range: Range<usize>, runs: &[StyleRun]) -> CoreResult<()> {
        self.check_range(&range)?;
        self.set_style(range.clone(), TextStyle::default())?;
        for run in runs {
            self.set_style(
                range.start + run.range.start..range.start + run.range.end,
                run.style,
            )?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Next position within `(pos, end]` where the resolved style changes.
    fn next_style_change(&self, pos: usize, end: usize) -> usize {
        let mut next = end;
        for run in &self.runs {
            if run.range.start > pos && run.range.start < next {
                next = run.range.start;
            }
            if run.range.end > pos && run.range.end < next {
                next = run.range.end;
            }
        }
        next
    }

    /// Whether every character in `range` carries all attributes set in
    /// `probe`.
    fn range_has_style(&self, range: &Range<usize>, probe: &TextStyle) -> bool {
        let mut pos = range.start;
        while pos < range.end {
            let style = self.style_at(pos);
            if probe.bold && !style.bold {
                return false;
            }
            if probe.italic && !style.italic {
                return false;
            }
            if probe.underline && !style.underline {
                return false;
            }
            if let Some(size) = probe.font_size
                && style.font_size != Some(size)
            {
                return false;
            }
            pos = self.next_style_change(pos, range.end);
        }
        true
    }

    /// Walk the uniform sections of `range` and set the attributes named by
    /// `change` to `enable` on each, keeping the rest of the section style.
    fn apply_style_change(
        &mut self,
        range: Range<usize>,
        change: &TextStyle,
        enable: bool,
    ) -> CoreResult<()> {
        let mut pos = range.start;
        while pos < range.end {
            let section_end = self.next_style_change(pos, range.end);
            let mut style = self.style_at(pos);
            if change.bold {
                style.bold = enable;
            }
            if change.italic {
                style.italic = enable;
            }
            if change.underline {
                style.underline = enable;
            }
            if let Some(size) = change.font_size {
                style.font_size = enable.then_some(size);
            }
            self.set_style(pos..section_end, style)?;
            pos = section_end;
        }
        Ok(())
    }

    /// Restore the canonical run form: sorted, merged, non-empty, styled.
    fn normalize_runs(&mut self) {
        self.runs.sort_by_key(|run| run.range.start);
        let mut merged: Vec<StyleRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if let Some(last) = merged.last_mut()
                && last.style == run.style
                && last.range.end == run.range.start
            {
                last.range.end = run.range.end;
                continue;
            }
            merged.push(run);
        }
        merged.retain(|run| !run.is_empty() && run.style.is_styled());
        self.runs = merged;
    }
}
