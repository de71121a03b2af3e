//! The editing session: commands, selection, and signals.
//!
//! [`EditorSession`] owns a document and its undo history and exposes the
//! command surface a host wires to menus and key bindings: file handling,
//! clipboard editing, find and replace, style toggles, and status queries.
//! After every state change it emits the matching signals so the host can
//! refresh its text area, status bar, and window title.
//!
//! The session is headless. Anything that needs a window goes through the
//! seams in [`crate::platform`]: clipboard calls take a
//! [`Clipboard`] implementation and file prompts take a
//! [`DialogProvider`].
//!
//! # Example
//!
//! ```
//! use vellum::EditorSession;
//!
//! let mut session = EditorSession::new();
//! session.text_changed.connect(|()| println!("refresh the text area"));
//!
//! session.insert_text("hello");
//! assert_eq!(session.text(), "hello");
//! assert!(session.undo());
//! assert_eq!(session.text(), "");
//! ```

use std::ops::Range;
use std::path::{Path, PathBuf};

use vellum_core::{
    Document, Edit, EditOp, FindOptions, Fragment, History, Signal, StyleRun, TextStyle, search,
};

use crate::config::EditorConfig;
use crate::error::{EditResult, EditorError};
use crate::io;
use crate::platform::{Clipboard, DialogProvider, FileFilter};
use crate::status::Status;

/// Base window title, shown alone while the document is unbound.
const TITLE_BASE: &str = "Vellum";

/// A complete editing session over one document.
#[derive(Debug, Default)]
pub struct EditorSession {
    document: Document,
    history: History,
    /// Style applied to newly typed text.
    input_style: TextStyle,
    caret: usize,
    selection_anchor: Option<usize>,
    /// File the document is bound to, once opened or saved.
    bound_path: Option<PathBuf>,
    find_options: FindOptions,
    config: EditorConfig,

    /// Emitted after any content change.
    pub text_changed: Signal<()>,
    /// Emitted with the effective `(start, end)` selection whenever it
    /// moves. The ends are equal when nothing is selected.
    pub selection_changed: Signal<(usize, usize)>,
    /// Emitted with a fresh [`Status`] after every mutation or caret move.
    pub status_changed: Signal<Status>,
    /// Emitted with the current style whenever a toggle or size change
    /// lands.
    pub style_changed: Signal<TextStyle>,
    /// Emitted with the new window title when the file binding changes.
    pub title_changed: Signal<String>,
    /// Emitted when the exit command runs. The host decides what closing
    /// means.
    pub exit_requested: Signal<()>,
}

impl EditorSession {
    /// A session with default configuration and an empty document.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// A session using the given configuration.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            history: History::with_limit(config.undo_limit),
            config,
            ..Self::default()
        }
    }

    /// A session starting from existing text, with empty history.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            document: Document::from_text(text),
            ..Self::new()
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// The file this document is bound to, if any.
    pub fn bound_path(&self) -> Option<&Path> {
        self.bound_path.as_deref()
    }

    /// Title for the host window: the application name, plus the bound
    /// path when there is one.
    pub fn window_title(&self) -> String {
        match &self.bound_path {
            Some(path) => format!("{} - {}", TITLE_BASE, path.display()),
            None => TITLE_BASE.to_string(),
        }
    }

    /// Current caret row, column, and character count.
    pub fn status(&self) -> Status {
        Status::compute(&self.document, self.caret)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn find_options(&self) -> &FindOptions {
        &self.find_options
    }

    pub fn set_find_options(&mut self, options: FindOptions) {
        self.find_options = options;
    }

    // ------------------------------------------------------------------
    // Caret and selection
    // ------------------------------------------------------------------

    /// Move the caret, clearing any selection.
    pub fn set_caret(&mut self, pos: usize) -> EditResult<()> {
        self.document.check_offset(pos)?;
        self.caret = pos;
        self.selection_anchor = None;
        self.emit_selection();
        self.emit_status();
        Ok(())
    }

    /// Select from `anchor` to `caret`.
    pub fn set_selection(&mut self, anchor: usize, caret: usize) -> EditResult<()> {
        self.document.check_offset(anchor)?;
        self.document.check_offset(caret)?;
        self.selection_anchor = Some(anchor);
        self.caret = caret;
        self.emit_selection();
        self.emit_status();
        Ok(())
    }

    /// Select the whole document.
    pub fn select_all(&mut self) {
        self.selection_anchor = Some(0);
        self.caret = self.document.len();
        self.emit_selection();
        self.emit_status();
    }

    pub fn clear_selection(&mut self) {
        if self.selection_anchor.take().is_some() {
            self.emit_selection();
        }
    }

    pub fn has_selection(&self) -> bool {
        self.active_selection().is_some()
    }

    /// The ordered selection range, if one exists and is non-empty.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.active_selection()
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.active_selection()
            .map(|(start, end)| &self.document.text()[start..end])
    }

    fn active_selection(&self) -> Option<(usize, usize)> {
        let anchor = self.selection_anchor?;
        let (start, end) = (anchor.min(self.caret), anchor.max(self.caret));
        (start != end).then_some((start, end))
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Type text at the caret with the current input style, replacing the
    /// selection if one exists. Typing over a selection records a single
    /// edit, so one undo restores both the removed and the inserted text.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let style = self.input_style;
        let edit = if let Some((start, end)) = self.active_selection() {
            let removed = self.doc_delete(start..end);
            self.doc_insert(start, text, style);
            self.caret = start;
            Edit::compound(vec![
                EditOp::Remove {
                    at: start,
                    fragment: removed,
                },
                EditOp::Insert {
                    at: start,
                    fragment: Fragment::styled(text, style),
                },
            ])
        } else {
            let at = self.caret;
            self.doc_insert(at, text, style);
            Edit::insert(at, Fragment::styled(text, style))
        };
        self.caret += text.len();
        self.selection_anchor = None;
        self.record(edit);
        self.emit_content_changed();
        self.emit_selection();
    }

    /// Remove a range, e.g. for backspace or delete key handling.
    /// Consecutive single-character removals coalesce into one edit.
    pub fn delete_range(&mut self, range: Range<usize>) -> EditResult<()> {
        self.document.check_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }
        let at = range.start;
        let fragment = self.doc_delete(range);
        self.caret = at;
        self.selection_anchor = None;
        self.record(Edit::remove(at, fragment));
        self.emit_content_changed();
        self.emit_selection();
        Ok(())
    }

    /// Remove the selected text. Returns whether anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.active_selection() else {
            return false;
        };
        let fragment = self.doc_delete(start..end);
        self.caret = start;
        self.selection_anchor = None;
        self.record(Edit::remove(start, fragment));
        self.emit_content_changed();
        self.emit_selection();
        true
    }

    /// Stop the next typed character from coalescing with the previous
    /// edit. Hosts call this when a caret jump should delimit undo steps.
    pub fn break_undo_merge(&mut self) {
        self.history.break_merge();
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    /// Copy the selection. Returns false with no selection or when the
    /// clipboard rejects the text.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> bool {
        let Some((start, end)) = self.active_selection() else {
            return false;
        };
        match clipboard.set_text(&self.document.text()[start..end]) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    target: "vellum::platform::clipboard",
                    error = %e,
                    "copy failed"
                );
                false
            }
        }
    }

    /// Copy the selection, then remove it.
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if !self.copy(clipboard) {
            return false;
        }
        self.delete_selection()
    }

    /// Insert the clipboard text at the caret. Returns whether anything
    /// was inserted.
    pub fn paste(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        match clipboard.text() {
            Ok(text) if !text.is_empty() => {
                self.insert_text(&text);
                true
            }
            Ok(_) => false,
            Err(e) => {
                tracing::debug!(
                    target: "vellum::platform::clipboard",
                    error = %e,
                    "paste skipped"
                );
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Undo / redo
    // ------------------------------------------------------------------

    /// Revert the most recent edit. Returns whether anything changed.
    #[tracing::instrument(skip_all, target = "vellum::session", level = "trace")]
    pub fn undo(&mut self) -> bool {
        let edit = match self.history.undo() {
            Some(edit) => edit.clone(),
            None => return false,
        };
        self.apply_reverse(&edit);
        self.selection_anchor = None;
        self.after_history_step(&edit);
        true
    }

    /// Re-apply the most recently undone edit. Returns whether anything
    /// changed.
    #[tracing::instrument(skip_all, target = "vellum::session", level = "trace")]
    pub fn redo(&mut self) -> bool {
        let edit = match self.history.redo() {
            Some(edit) => edit.clone(),
            None => return false,
        };
        self.apply_forward(&edit);
        self.selection_anchor = None;
        self.after_history_step(&edit);
        true
    }

    fn apply_reverse(&mut self, edit: &Edit) {
        for op in edit.ops().iter().rev() {
            match op {
                EditOp::Insert { at, fragment } => {
                    self.doc_delete(*at..*at + fragment.len());
                    self.caret = *at;
                }
                EditOp::Remove { at, fragment } => {
                    self.doc_insert_fragment(*at, fragment);
                    self.caret = *at + fragment.len();
                }
                EditOp::Restyle { range, before, .. } => {
                    self.doc_restore(range.clone(), before);
                    self.caret = range.end;
                }
            }
        }
    }

    fn apply_forward(&mut self, edit: &Edit) {
        for op in edit.ops() {
            match op {
                EditOp::Insert { at, fragment } => {
                    self.doc_insert_fragment(*at, fragment);
                    self.caret = *at + fragment.len();
                }
                EditOp::Remove { at, fragment } => {
                    self.doc_delete(*at..*at + fragment.len());
                    self.caret = *at;
                }
                EditOp::Restyle { range, after, .. } => {
                    self.doc_restore(range.clone(), after);
                    self.caret = range.end;
                }
            }
        }
    }

    fn after_history_step(&mut self, edit: &Edit) {
        if edit.changes_content() {
            self.emit_content_changed();
            self.emit_selection();
        } else {
            self.emit_status();
        }
        self.emit_style();
    }

    // ------------------------------------------------------------------
    // Styling
    // ------------------------------------------------------------------

    /// Toggle bold over the selection, or flip the input style when
    /// nothing is selected.
    pub fn toggle_bold(&mut self) {
        let applied = self.toggle_selection_style(TextStyle::new().with_bold(true));
        self.input_style.bold = applied.unwrap_or(!self.input_style.bold);
        self.emit_style();
    }

    /// Toggle italic over the selection, or flip the input style when
    /// nothing is selected.
    pub fn toggle_italic(&mut self) {
        let applied = self.toggle_selection_style(TextStyle::new().with_italic(true));
        self.input_style.italic = applied.unwrap_or(!self.input_style.italic);
        self.emit_style();
    }

    /// Toggle underline over the selection, or flip the input style when
    /// nothing is selected.
    pub fn toggle_underline(&mut self) {
        let applied = self.toggle_selection_style(TextStyle::new().with_underline(true));
        self.input_style.underline = applied.unwrap_or(!self.input_style.underline);
        self.emit_style();
    }

    /// Apply a font size taken from user input, e.g. a size field.
    /// The text is trimmed and must parse as a positive integer; nothing
    /// changes otherwise.
    pub fn set_font_size(&mut self, input: &str) -> EditResult<()> {
        let trimmed = input.trim();
        let size: u32 = trimmed
            .parse()
            .map_err(|_| EditorError::invalid_input(trimmed, "font size must be a positive integer"))?;
        self.apply_font_size(size)
    }

    /// Set the input style's font size and apply it to the selection.
    pub fn apply_font_size(&mut self, size: u32) -> EditResult<()> {
        if size == 0 {
            return Err(EditorError::invalid_input(
                "0",
                "font size must be at least 1",
            ));
        }
        self.input_style.font_size = Some(size);
        if let Some((start, end)) = self.active_selection() {
            let before = self.document.runs_in(start..end);
            self.document.apply_font_size(start..end, size)?;
            let after = self.document.runs_in(start..end);
            self.record(Edit::restyle(start..end, before, after));
            self.emit_status();
        }
        self.emit_style();
        Ok(())
    }

    /// The style a toolbar should display: the uniform selection style, or
    /// the input style, or the style under the caret.
    pub fn current_style(&self) -> TextStyle {
        if let Some((start, end)) = self.active_selection() {
            self.document.style_over(start..end).unwrap_or(self.input_style)
        } else if self.input_style.is_styled() {
            self.input_style
        } else {
            self.document.style_at(self.caret)
        }
    }

    pub fn is_bold(&self) -> bool {
        self.current_style().bold
    }

    pub fn is_italic(&self) -> bool {
        self.current_style().italic
    }

    pub fn is_underline(&self) -> bool {
        self.current_style().underline
    }

    /// The displayed font size: the current style's, or the configured
    /// default when none is set.
    pub fn effective_font_size(&self) -> u32 {
        self.current_style()
            .font_size
            .unwrap_or(self.config.default_font_size)
    }

    fn toggle_selection_style(&mut self, toggle: TextStyle) -> Option<bool> {
        let (start, end) = self.active_selection()?;
        let before = self.document.runs_in(start..end);
        let applied = match self.document.toggle_style(start..end, toggle) {
            Ok(applied) => applied,
            Err(e) => {
                tracing::error!(
                    target: "vellum::session",
                    error = %e,
                    "selection out of sync with document"
                );
                return None;
            }
        };
        let after = self.document.runs_in(start..end);
        self.record(Edit::restyle(start..end, before, after));
        self.emit_status();
        Some(applied)
    }

    // ------------------------------------------------------------------
    // Find / replace
    // ------------------------------------------------------------------

    /// Select the first occurrence of `query`, scanning from the top of
    /// the document. The selection is left untouched on a miss.
    pub fn find(&mut self, query: &str) -> bool {
        if query.is_empty() {
            return false;
        }
        match search::find_first(self.document.text(), query, &self.find_options) {
            Some(m) => {
                self.selection_anchor = Some(m.start);
                self.caret = m.end;
                self.emit_selection();
                self.emit_status();
                true
            }
            None => {
                tracing::debug!(target: "vellum::session", query, "no match");
                false
            }
        }
    }

    /// Prompt for a query, then find it.
    pub fn find_with(&mut self, dialogs: &mut dyn DialogProvider) -> bool {
        match dialogs.input_line("Enter text to find:") {
            Some(query) => self.find(&query),
            None => false,
        }
    }

    /// Replace every occurrence of `query` with `replacement`, treating
    /// both as literal text. Returns the number of replacements. All of
    /// them form one edit, so a single undo restores the document; zero
    /// matches record nothing.
    #[tracing::instrument(skip_all, target = "vellum::session", level = "trace")]
    pub fn replace_all(&mut self, query: &str, replacement: &str) -> usize {
        if query.is_empty() {
            return 0;
        }
        let matches = search::find_all(self.document.text(), query, &self.find_options);
        if matches.is_empty() {
            return 0;
        }
        let mut ops = Vec::with_capacity(matches.len() * 2);
        // applied right to left so earlier offsets stay valid
        for m in matches.iter().rev() {
            let style = self.document.style_at(m.start);
            let removed = self.doc_delete(m.range());
            ops.push(EditOp::Remove {
                at: m.start,
                fragment: removed,
            });
            if !replacement.is_empty() {
                self.doc_insert(m.start, replacement, style);
                ops.push(EditOp::Insert {
                    at: m.start,
                    fragment: Fragment::styled(replacement, style),
                });
            }
        }
        let count = matches.len();
        self.selection_anchor = None;
        self.clamp_caret();
        self.record(Edit::compound(ops));
        tracing::debug!(target: "vellum::session", count, "replaced occurrences");
        self.emit_content_changed();
        self.emit_selection();
        count
    }

    /// Prompt for a query and a replacement, then replace every
    /// occurrence.
    pub fn replace_all_with(&mut self, dialogs: &mut dyn DialogProvider) -> usize {
        let Some(query) = dialogs.input_line("Enter text to find:") else {
            return 0;
        };
        if query.is_empty() {
            return 0;
        }
        let Some(replacement) = dialogs.input_line("Enter replacement text:") else {
            return 0;
        };
        self.replace_all(&query, &replacement)
    }

    /// Prompt for a font size, then apply it.
    pub fn set_font_size_with(&mut self, dialogs: &mut dyn DialogProvider) -> EditResult<bool> {
        match dialogs.input_line("Enter size (e.g., 12):") {
            Some(input) => {
                self.set_font_size(&input)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ------------------------------------------------------------------
    // File handling
    // ------------------------------------------------------------------

    /// Replace the document with an empty, unbound one. The replacement
    /// is a single undoable edit.
    pub fn new_document(&mut self) {
        self.replace_document(String::new());
        self.bound_path = None;
        self.title_changed.emit(self.window_title());
        tracing::info!(target: "vellum::session", "new document");
    }

    /// Load a file, replacing the document wholesale and binding to the
    /// path. The session is untouched when reading fails.
    #[tracing::instrument(skip_all, target = "vellum::session", level = "trace")]
    pub fn open(&mut self, path: impl AsRef<Path>) -> EditResult<()> {
        let path = path.as_ref();
        let text = io::read_text(path)?;
        self.replace_document(text);
        self.bound_path = Some(path.to_path_buf());
        self.title_changed.emit(self.window_title());
        tracing::info!(target: "vellum::session", path = %path.display(), "opened");
        Ok(())
    }

    /// Prompt for a file and open it. `Ok(false)` means the user
    /// canceled.
    pub fn open_with(&mut self, dialogs: &mut dyn DialogProvider) -> EditResult<bool> {
        match dialogs.open_path(&FileFilter::text_files()) {
            Some(path) => {
                self.open(path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Save to the bound path, prompting for one first if the document is
    /// unbound. `Ok(false)` means the user canceled the prompt; a bound
    /// document never prompts again.
    pub fn save(&mut self, dialogs: &mut dyn DialogProvider) -> EditResult<bool> {
        match self.bound_path.clone() {
            Some(path) => {
                self.write_document(&path)?;
                Ok(true)
            }
            None => match dialogs.save_path(&FileFilter::text_files()) {
                Some(path) => {
                    self.save_as(path)?;
                    Ok(true)
                }
                None => {
                    tracing::debug!(target: "vellum::session", "save canceled");
                    Ok(false)
                }
            },
        }
    }

    /// Save to a specific path and bind to it. The binding only changes
    /// when the write succeeds.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> EditResult<()> {
        let path = path.as_ref();
        self.write_document(path)?;
        self.bound_path = Some(path.to_path_buf());
        self.title_changed.emit(self.window_title());
        Ok(())
    }

    fn write_document(&self, path: &Path) -> EditResult<()> {
        io::write_text(path, self.document.text())?;
        tracing::info!(
            target: "vellum::session",
            path = %path.display(),
            bytes = self.document.len(),
            "saved"
        );
        Ok(())
    }

    /// Replace the whole document as one edit: remove the old content,
    /// insert the new. Emits a single content notification.
    fn replace_document(&mut self, text: String) {
        let mut ops = Vec::new();
        if !self.document.is_empty() {
            let old = self.doc_fragment(0..self.document.len());
            ops.push(EditOp::Remove {
                at: 0,
                fragment: old,
            });
        }
        if !text.is_empty() {
            ops.push(EditOp::Insert {
                at: 0,
                fragment: Fragment::plain(text.clone()),
            });
        }
        self.document.set_content(text);
        self.caret = 0;
        self.selection_anchor = None;
        if !ops.is_empty() {
            self.record(Edit::compound(ops));
            // typing after a wholesale swap must start its own edit
            self.history.break_merge();
        }
        self.emit_content_changed();
        self.emit_selection();
    }

    // ------------------------------------------------------------------
    // Exit
    // ------------------------------------------------------------------

    /// Announce that the user asked to leave.
    pub fn request_exit(&self) {
        tracing::info!(target: "vellum::session", "exit requested");
        self.exit_requested.emit(());
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn record(&mut self, edit: Edit) {
        self.history.push(edit);
        if !self.config.merge_typing {
            self.history.break_merge();
        }
    }

    fn clamp_caret(&mut self) {
        self.caret = self.caret.min(self.document.len());
        while !self.document.text().is_char_boundary(self.caret) {
            self.caret -= 1;
        }
    }

    fn emit_content_changed(&self) {
        self.text_changed.emit(());
        self.emit_status();
    }

    fn emit_status(&self) {
        self.status_changed.emit(self.status());
    }

    fn emit_selection(&self) {
        let (start, end) = self
            .active_selection()
            .unwrap_or((self.caret, self.caret));
        self.selection_changed.emit((start, end));
    }

    fn emit_style(&self) {
        self.style_changed.emit(self.current_style());
    }

    // Wrappers for document calls whose ranges the session itself
    // maintains. Failures here mean the caret or selection drifted off the
    // document, which is a bug; they are logged and the call becomes a
    // no-op rather than poisoning the session.

    fn doc_insert(&mut self, at: usize, text: &str, style: TextStyle) {
        if let Err(e) = self.document.insert(at, text, style) {
            tracing::error!(target: "vellum::session", error = %e, "insert out of sync");
        }
    }

    fn doc_insert_fragment(&mut self, at: usize, fragment: &Fragment) {
        if let Err(e) = self.document.insert_fragment(at, fragment) {
            tracing::error!(target: "vellum::session", error = %e, "insert out of sync");
        }
    }

    fn doc_delete(&mut self, range: Range<usize>) -> Fragment {
        match self.document.delete(range) {
            Ok(fragment) => fragment,
            Err(e) => {
                tracing::error!(target: "vellum::session", error = %e, "delete out of sync");
                Fragment::default()
            }
        }
    }

    fn doc_fragment(&self, range: Range<usize>) -> Fragment {
        match self.document.fragment(range) {
            Ok(fragment) => fragment,
            Err(e) => {
                tracing::error!(target: "vellum::session", error = %e, "snapshot out of sync");
                Fragment::default()
            }
        }
    }

    fn doc_restore(&mut self, range: Range<usize>, runs: &[StyleRun]) {
        if let Err(e) = self.document.restore_runs(range, runs) {
            tracing::error!(target: "vellum::session", error = %e, "restyle out of sync");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    use crate::platform::MemoryClipboard;

    #[derive(Default)]
    struct ScriptedDialogs {
        open_paths: VecDeque<Option<PathBuf>>,
        save_paths: VecDeque<Option<PathBuf>>,
        inputs: VecDeque<Option<String>>,
        open_prompts: usize,
        save_prompts: usize,
    }

    impl ScriptedDialogs {
        fn new() -> Self {
            Self::default()
        }

        fn with_open(mut self, path: impl Into<PathBuf>) -> Self {
            self.open_paths.push_back(Some(path.into()));
            self
        }

        fn with_save(mut self, path: impl Into<PathBuf>) -> Self {
            self.save_paths.push_back(Some(path.into()));
            self
        }

        fn with_save_cancel(mut self) -> Self {
            self.save_paths.push_back(None);
            self
        }

        fn with_input(mut self, text: &str) -> Self {
            self.inputs.push_back(Some(text.to_string()));
            self
        }

        fn with_input_cancel(mut self) -> Self {
            self.inputs.push_back(None);
            self
        }
    }

    impl DialogProvider for ScriptedDialogs {
        fn open_path(&mut self, _filter: &FileFilter) -> Option<PathBuf> {
            self.open_prompts += 1;
            self.open_paths.pop_front().flatten()
        }

        fn save_path(&mut self, _filter: &FileFilter) -> Option<PathBuf> {
            self.save_prompts += 1;
            self.save_paths.pop_front().flatten()
        }

        fn input_line(&mut self, _prompt: &str) -> Option<String> {
            self.inputs.pop_front().flatten()
        }
    }

    fn count_emissions(signal: &Signal<()>) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&count);
        signal.connect(move |()| {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = EditorSession::new();
        assert_eq!(session.text(), "");
        assert_eq!(session.window_title(), "Vellum");
        assert_eq!(session.status(), Status {
            row: 1,
            column: 1,
            characters: 0,
        });
        assert!(!session.can_undo());
        assert!(session.bound_path().is_none());
    }

    #[test]
    fn test_insert_text_moves_caret_and_notifies() {
        let mut session = EditorSession::new();
        let changes = count_emissions(&session.text_changed);
        let statuses = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&statuses);
        session.status_changed.connect(move |status| sink.lock().push(*status));

        session.insert_text("hi");
        assert_eq!(session.text(), "hi");
        assert_eq!(session.caret(), 2);
        assert_eq!(changes.load(Ordering::SeqCst), 1);
        assert_eq!(statuses.lock().last().map(|s| s.characters), Some(2));
    }

    #[test]
    fn test_typing_coalesces_into_one_edit() {
        let mut session = EditorSession::new();
        session.insert_text("h");
        session.insert_text("i");
        assert!(session.undo());
        assert_eq!(session.text(), "");
        assert!(!session.can_undo());
    }

    #[test]
    fn test_merge_typing_disabled_by_config() {
        let mut session = EditorSession::with_config(EditorConfig {
            merge_typing: false,
            ..EditorConfig::default()
        });
        session.insert_text("a");
        session.insert_text("b");
        assert!(session.undo());
        assert_eq!(session.text(), "a");
        assert!(session.undo());
        assert_eq!(session.text(), "");
    }

    #[test]
    fn test_redo_discarded_by_new_edit() {
        let mut session = EditorSession::new();
        session.insert_text("a");
        session.break_undo_merge();
        session.insert_text("b");
        assert!(session.undo());
        assert_eq!(session.text(), "a");

        session.insert_text("c");
        assert_eq!(session.text(), "ac");
        // the undone "b" is unrecoverable
        assert!(!session.redo());
        assert_eq!(session.text(), "ac");
    }

    #[test]
    fn test_undo_exhausted_returns_false() {
        let mut session = EditorSession::new();
        assert!(!session.undo());
        session.insert_text("x");
        assert!(session.undo());
        assert!(!session.undo());
    }

    #[test]
    fn test_undo_redo_round_trip_with_styles() {
        let mut session = EditorSession::new();
        session.insert_text("hello world");
        session.set_selection(0, 5).unwrap();
        session.toggle_bold();
        let styled_runs = session.document().runs().to_vec();
        assert_eq!(styled_runs, vec![StyleRun::new(0..5, TextStyle::bold())]);

        assert!(session.undo());
        assert!(session.document().runs().is_empty());
        assert_eq!(session.text(), "hello world");
        assert!(session.undo());
        assert_eq!(session.text(), "");

        assert!(session.redo());
        assert_eq!(session.text(), "hello world");
        assert!(session.redo());
        assert_eq!(session.document().runs(), styled_runs.as_slice());
    }

    #[test]
    fn test_delete_range_backspace_coalesces() {
        let mut session = EditorSession::from_text("abc");
        session.set_caret(3).unwrap();
        session.delete_range(2..3).unwrap();
        session.delete_range(1..2).unwrap();
        session.delete_range(0..1).unwrap();
        assert_eq!(session.text(), "");
        assert!(session.undo());
        assert_eq!(session.text(), "abc");
        assert!(!session.can_undo());
    }

    #[test]
    fn test_delete_selection_restores_styles_on_undo() {
        let mut session = EditorSession::new();
        session.insert_text("hello world");
        session.set_selection(0, 5).unwrap();
        session.toggle_bold();
        session.set_selection(3, 8).unwrap();
        assert!(session.delete_selection());
        assert_eq!(session.text(), "helorld");

        assert!(session.undo());
        assert_eq!(session.text(), "hello world");
        assert_eq!(
            session.document().runs(),
            &[StyleRun::new(0..5, TextStyle::bold())]
        );
    }

    #[test]
    fn test_typing_over_selection_is_one_undo_step() {
        let mut session = EditorSession::from_text("hello world");
        session.set_selection(6, 11).unwrap();
        session.insert_text("there");
        assert_eq!(session.text(), "hello there");
        assert_eq!(session.caret(), 11);

        assert!(session.undo());
        assert_eq!(session.text(), "hello world");
    }

    #[test]
    fn test_selection_rejects_out_of_range() {
        let mut session = EditorSession::from_text("short");
        let err = session.set_selection(0, 99).unwrap_err();
        assert!(matches!(err, EditorError::OutOfRange(_)));
        assert!(!session.has_selection());
    }

    #[test]
    fn test_set_caret_rejects_mid_char_position() {
        let mut session = EditorSession::from_text("é");
        assert!(session.set_caret(1).is_err());
        assert_eq!(session.caret(), 0);
    }

    #[test]
    fn test_select_all() {
        let mut session = EditorSession::from_text("abc");
        session.select_all();
        assert_eq!(session.selection_range(), Some((0, 3)));
        assert_eq!(session.selected_text(), Some("abc"));
    }

    #[test]
    fn test_copy_without_selection_is_refused() {
        let session = EditorSession::from_text("abc");
        let mut clipboard = MemoryClipboard::new();
        assert!(!session.copy(&mut clipboard));
        assert!(clipboard.text().is_err());
    }

    #[test]
    fn test_cut_copy_paste_round_trip() {
        let mut session = EditorSession::from_text("hello world");
        let mut clipboard = MemoryClipboard::new();

        session.set_selection(0, 5).unwrap();
        assert!(session.cut(&mut clipboard));
        assert_eq!(session.text(), " world");
        assert_eq!(clipboard.text().unwrap(), "hello");

        session.set_caret(6).unwrap();
        assert!(session.paste(&mut clipboard));
        assert_eq!(session.text(), " worldhello");

        session.set_selection(0, 6).unwrap();
        assert!(session.copy(&mut clipboard));
        assert_eq!(clipboard.text().unwrap(), " world");
        assert_eq!(session.text(), " worldhello");
    }

    #[test]
    fn test_paste_empty_clipboard_is_noop() {
        let mut session = EditorSession::from_text("abc");
        let mut clipboard = MemoryClipboard::new();
        assert!(!session.paste(&mut clipboard));
        assert_eq!(session.text(), "abc");
    }

    #[test]
    fn test_paste_uses_input_style() {
        let mut session = EditorSession::new();
        session.toggle_bold();
        let mut clipboard = MemoryClipboard::new();
        clipboard.set_text("hi").unwrap();
        assert!(session.paste(&mut clipboard));
        assert_eq!(
            session.document().runs(),
            &[StyleRun::new(0..2, TextStyle::bold())]
        );
    }

    #[test]
    fn test_toggle_bold_applies_range_rule() {
        let mut session = EditorSession::from_text("abcdef");
        session.set_selection(0, 3).unwrap();
        session.toggle_bold();
        // mixed selection: first toggle makes everything bold
        session.set_selection(0, 6).unwrap();
        session.toggle_bold();
        assert_eq!(
            session.document().runs(),
            &[StyleRun::new(0..6, TextStyle::bold())]
        );
        assert!(session.is_bold());

        // uniform selection: second toggle removes it
        session.toggle_bold();
        assert!(session.document().runs().is_empty());
        assert!(!session.is_bold());
    }

    #[test]
    fn test_toggle_without_selection_flips_input_style() {
        let mut session = EditorSession::new();
        session.toggle_italic();
        assert!(session.is_italic());
        session.insert_text("x");
        assert_eq!(
            session.document().runs(),
            &[StyleRun::new(0..1, TextStyle::italic())]
        );
        session.toggle_italic();
        session.insert_text("y");
        assert_eq!(session.document().style_at(1), TextStyle::default());
    }

    #[test]
    fn test_restyle_is_undoable() {
        let mut session = EditorSession::from_text("abcdef");
        session.set_selection(1, 4).unwrap();
        session.toggle_underline();
        assert_eq!(
            session.document().runs(),
            &[StyleRun::new(1..4, TextStyle::underline())]
        );
        assert!(session.undo());
        assert!(session.document().runs().is_empty());
        assert_eq!(session.text(), "abcdef");
        assert!(session.redo());
        assert_eq!(
            session.document().runs(),
            &[StyleRun::new(1..4, TextStyle::underline())]
        );
    }

    #[test]
    fn test_set_font_size_rejects_bad_input() {
        let mut session = EditorSession::from_text("abc");
        session.select_all();
        for input in ["-3", "abc", "", "  ", "0", "4.5"] {
            let err = session.set_font_size(input).unwrap_err();
            assert!(
                matches!(err, EditorError::InvalidInput { .. }),
                "input {input:?} should be rejected"
            );
        }
        assert!(!session.can_undo());
        assert_eq!(session.current_style().font_size, None);
    }

    #[test]
    fn test_set_font_size_applies_to_selection() {
        let mut session = EditorSession::from_text("hello");
        session.select_all();
        session.set_font_size(" 18 ").unwrap();
        assert_eq!(
            session.document().style_over(0..5),
            Some(TextStyle::new().with_font_size(18))
        );
        assert_eq!(session.effective_font_size(), 18);

        assert!(session.undo());
        assert!(session.document().runs().is_empty());
    }

    #[test]
    fn test_effective_font_size_falls_back_to_config() {
        let session = EditorSession::new();
        assert_eq!(session.effective_font_size(), 12);
    }

    #[test]
    fn test_find_selects_first_match_from_top() {
        let mut session = EditorSession::from_text("one two one");
        session.set_caret(11).unwrap();
        assert!(session.find("one"));
        assert_eq!(session.selection_range(), Some((0, 3)));
        assert_eq!(session.status().column, 4);
    }

    #[test]
    fn test_find_miss_keeps_selection() {
        let mut session = EditorSession::from_text("one two");
        session.set_selection(0, 3).unwrap();
        assert!(!session.find("zebra"));
        assert_eq!(session.selection_range(), Some((0, 3)));
    }

    #[test]
    fn test_find_empty_query_is_refused() {
        let mut session = EditorSession::from_text("abc");
        assert!(!session.find(""));
    }

    #[test]
    fn test_find_with_prompts_for_query() {
        let mut session = EditorSession::from_text("alpha beta");
        let mut dialogs = ScriptedDialogs::new().with_input("beta");
        assert!(session.find_with(&mut dialogs));
        assert_eq!(session.selected_text(), Some("beta"));

        let mut canceled = ScriptedDialogs::new().with_input_cancel();
        assert!(!session.find_with(&mut canceled));
    }

    #[test]
    fn test_replace_all_is_one_undo_step() {
        let mut session = EditorSession::from_text("one two one");
        let count = session.replace_all("one", "1");
        assert_eq!(count, 2);
        assert_eq!(session.text(), "1 two 1");

        assert!(session.undo());
        assert_eq!(session.text(), "one two one");
        assert!(!session.can_undo());
    }

    #[test]
    fn test_replace_all_treats_pattern_literally() {
        let mut session = EditorSession::from_text("a.c abc");
        assert_eq!(session.replace_all("a.c", "X"), 1);
        assert_eq!(session.text(), "X abc");
    }

    #[test]
    fn test_replace_all_without_match_records_nothing() {
        let mut session = EditorSession::from_text("abc");
        assert_eq!(session.replace_all("zzz", "x"), 0);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_replace_all_preserves_styles() {
        let mut session = EditorSession::from_text("one two one");
        session.set_selection(4, 7).unwrap();
        session.toggle_bold();
        session.clear_selection();
        session.replace_all("one", "1");
        assert_eq!(session.text(), "1 two 1");
        assert_eq!(session.document().style_over(2..5), Some(TextStyle::bold()));

        assert!(session.undo());
        assert_eq!(session.text(), "one two one");
        assert_eq!(
            session.document().runs(),
            &[StyleRun::new(4..7, TextStyle::bold())]
        );
    }

    #[test]
    fn test_replace_all_inherits_style_at_match() {
        let mut session = EditorSession::from_text("abc");
        session.select_all();
        session.toggle_bold();
        session.clear_selection();
        session.replace_all("b", "XY");
        assert_eq!(session.text(), "aXYc");
        assert_eq!(session.document().style_over(0..4), Some(TextStyle::bold()));
    }

    #[test]
    fn test_replace_all_clamps_caret_and_clears_selection() {
        let mut session = EditorSession::from_text("aaaa");
        session.select_all();
        assert_eq!(session.replace_all("aa", "b"), 2);
        assert_eq!(session.text(), "bb");
        assert!(!session.has_selection());
        assert!(session.caret() <= session.text().len());
    }

    #[test]
    fn test_replace_all_with_prompts_for_both_strings() {
        let mut session = EditorSession::from_text("x y x");
        let mut dialogs = ScriptedDialogs::new().with_input("x").with_input("z");
        assert_eq!(session.replace_all_with(&mut dialogs), 2);
        assert_eq!(session.text(), "z y z");

        let mut canceled = ScriptedDialogs::new().with_input("y").with_input_cancel();
        assert_eq!(session.replace_all_with(&mut canceled), 0);
        assert_eq!(session.text(), "z y z");
    }

    #[test]
    fn test_set_font_size_with_prompt() {
        let mut session = EditorSession::new();
        let mut dialogs = ScriptedDialogs::new().with_input("18");
        assert!(session.set_font_size_with(&mut dialogs).unwrap());
        assert_eq!(session.effective_font_size(), 18);

        let mut canceled = ScriptedDialogs::new().with_input_cancel();
        assert!(!session.set_font_size_with(&mut canceled).unwrap());
    }

    #[test]
    fn test_status_row_and_column_are_one_based() {
        let mut session = EditorSession::from_text("ab\ncd");
        session.set_caret(4).unwrap();
        let status = session.status();
        assert_eq!(status.cursor_text(), "Cursor: 2:2");
        assert_eq!(status.character_text(), "Characters: 5");
    }

    #[test]
    fn test_save_prompts_once_then_reuses_binding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.txt");
        let mut session = EditorSession::new();
        session.insert_text("draft");

        let mut dialogs = ScriptedDialogs::new().with_save(&path);
        assert!(session.save(&mut dialogs).unwrap());
        assert_eq!(dialogs.save_prompts, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "draft");
        assert_eq!(session.bound_path(), Some(path.as_path()));

        session.insert_text(" two");
        // a fresh provider would answer any prompt with cancel, so a
        // successful save proves no prompt happened
        let mut silent = ScriptedDialogs::new();
        assert!(session.save(&mut silent).unwrap());
        assert_eq!(silent.save_prompts, 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "draft two");
    }

    #[test]
    fn test_save_canceled_keeps_document_unbound() {
        let mut session = EditorSession::new();
        session.insert_text("draft");
        let mut dialogs = ScriptedDialogs::new().with_save_cancel();
        assert!(!session.save(&mut dialogs).unwrap());
        assert!(session.bound_path().is_none());
        assert_eq!(session.window_title(), "Vellum");
    }

    #[test]
    fn test_save_as_binds_only_on_successful_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = EditorSession::new();
        session.insert_text("draft");
        // writing over a directory fails
        let err = session.save_as(dir.path()).unwrap_err();
        assert!(matches!(err, EditorError::Io { .. }));
        assert!(session.bound_path().is_none());
        assert_eq!(session.window_title(), "Vellum");
    }

    #[test]
    fn test_open_loads_file_and_notifies_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "x\ny").unwrap();

        let mut session = EditorSession::new();
        let changes = count_emissions(&session.text_changed);
        session.open(&path).unwrap();

        assert_eq!(session.text(), "x\ny");
        assert_eq!(changes.load(Ordering::SeqCst), 1);
        assert_eq!(session.caret(), 0);
        assert_eq!(
            session.window_title(),
            format!("Vellum - {}", path.display())
        );
        assert_eq!(session.status().characters, 3);
    }

    #[test]
    fn test_open_failure_leaves_session_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = EditorSession::new();
        session.insert_text("keep me");

        let err = session.open(dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, EditorError::Io { .. }));
        assert_eq!(session.text(), "keep me");
        assert!(session.bound_path().is_none());
    }

    #[test]
    fn test_open_is_one_undoable_edit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "new contents").unwrap();

        let mut session = EditorSession::new();
        session.insert_text("old");
        session.open(&path).unwrap();
        assert_eq!(session.text(), "new contents");

        assert!(session.undo());
        assert_eq!(session.text(), "old");
        // the binding itself is not part of the edit
        assert_eq!(session.bound_path(), Some(path.as_path()));
    }

    #[test]
    fn test_typing_after_open_is_a_separate_edit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "ab").unwrap();

        let mut session = EditorSession::new();
        session.open(&path).unwrap();
        session.set_caret(2).unwrap();
        session.insert_text("c");

        assert!(session.undo());
        assert_eq!(session.text(), "ab");
    }

    #[test]
    fn test_open_with_uses_dialog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "picked").unwrap();

        let mut session = EditorSession::new();
        let mut dialogs = ScriptedDialogs::new().with_open(&path);
        assert!(session.open_with(&mut dialogs).unwrap());
        assert_eq!(session.text(), "picked");
        assert_eq!(dialogs.open_prompts, 1);

        let mut canceled = ScriptedDialogs::new();
        assert!(!session.open_with(&mut canceled).unwrap());
    }

    #[test]
    fn test_new_document_clears_and_unbinds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.txt");
        let mut session = EditorSession::new();
        session.insert_text("draft");
        session.save_as(&path).unwrap();
        assert_ne!(session.window_title(), "Vellum");

        session.new_document();
        assert_eq!(session.text(), "");
        assert_eq!(session.window_title(), "Vellum");

        // the cleared content comes back with undo, the binding does not
        assert!(session.undo());
        assert_eq!(session.text(), "draft");
        assert_eq!(session.window_title(), "Vellum");
    }

    #[test]
    fn test_exit_request_emits_signal() {
        let session = EditorSession::new();
        let exits = count_emissions(&session.exit_requested);
        session.request_exit();
        assert_eq!(exits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_title_changed_signal_carries_new_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        let mut session = EditorSession::new();
        let titles = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&titles);
        session
            .title_changed
            .connect(move |title| sink.lock().push(title.clone()));

        session.save_as(&path).unwrap();
        session.new_document();
        let seen = titles.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], format!("Vellum - {}", path.display()));
        assert_eq!(seen[1], "Vellum");
    }
}
