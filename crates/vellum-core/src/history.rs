//! Linear undo history.
//!
//! Every document mutation is recorded as an [`Edit`] holding one or more
//! [`EditOp`]s. Undo walks the list backward applying inverses, redo walks
//! it forward. Recording a new edit while undone discards the redo branch,
//! so history stays a straight line.
//!
//! Consecutive single-character typing coalesces into one edit, as do
//! consecutive single-character deletions in either direction. Coalescing
//! stops at newlines, at style changes, whenever the positions are not
//! contiguous, and after an undo or redo.

use std::ops::Range;

use crate::document::{Fragment, StyleRun, TextStyle};

/// Default number of edits retained before the oldest are dropped.
pub const DEFAULT_EDIT_LIMIT: usize = 100;

// ============================================================================
// EditOp / Edit
// ============================================================================

/// One reversible step against a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Text was spliced in at `at`.
    Insert { at: usize, fragment: Fragment },
    /// Text was removed starting at `at`.
    Remove { at: usize, fragment: Fragment },
    /// Styling over `range` changed from the `before` runs to the `after`
    /// runs. Both snapshots are relative to `range.start`.
    Restyle {
        range: Range<usize>,
        before: Vec<StyleRun>,
        after: Vec<StyleRun>,
    },
}

/// A recorded user action: one or more ops applied in order.
///
/// Multi-op edits (replace-all, wholesale content replacement, typing over
/// a selection) undo and redo as a single step and never merge with
/// neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    ops: Vec<EditOp>,
}

impl Edit {
    /// An edit inserting one fragment.
    pub fn insert(at: usize, fragment: Fragment) -> Self {
        Self {
            ops: vec![EditOp::Insert { at, fragment }],
        }
    }

    /// An edit removing one fragment.
    pub fn remove(at: usize, fragment: Fragment) -> Self {
        Self {
            ops: vec![EditOp::Remove { at, fragment }],
        }
    }

    /// An edit changing styling over a range.
    pub fn restyle(range: Range<usize>, before: Vec<StyleRun>, after: Vec<StyleRun>) -> Self {
        Self {
            ops: vec![EditOp::Restyle {
                range,
                before,
                after,
            }],
        }
    }

    /// An edit made of several ops, applied in order.
    pub fn compound(ops: Vec<EditOp>) -> Self {
        Self { ops }
    }

    /// The ops in application order.
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    /// Whether the edit touches document content rather than only styling.
    pub fn changes_content(&self) -> bool {
        self.ops
            .iter()
            .any(|op| !matches!(op, EditOp::Restyle { .. }))
    }

    /// Try to absorb `other` into this edit.
    ///
    /// Only single-op insert pairs and single-op remove pairs merge, and
    /// only when contiguous, newline-free, and uniformly styled with the
    /// same style.
    fn try_merge(&mut self, other: &Edit) -> bool {
        if self.ops.len() != 1 || other.ops.len() != 1 {
            return false;
        }
        match (&mut self.ops[0], &other.ops[0]) {
            (
                EditOp::Insert { at, fragment },
                EditOp::Insert {
                    at: other_at,
                    fragment: other_fragment,
                },
            ) => {
                if other_fragment.text().contains('\n') {
                    return false;
                }
                if *at + fragment.len() != *other_at {
                    return false;
                }
                let Some(style) = uniform_pair(fragment, other_fragment) else {
                    return false;
                };
                let mut text = String::with_capacity(fragment.len() + other_fragment.len());
                text.push_str(fragment.text());
                text.push_str(other_fragment.text());
                *fragment = Fragment::styled(text, style);
                true
            }
            (
                EditOp::Remove { at, fragment },
                EditOp::Remove {
                    at: other_at,
                    fragment: other_fragment,
                },
            ) => {
                if fragment.text().contains('\n') || other_fragment.text().contains('\n') {
                    return false;
                }
                let Some(style) = uniform_pair(fragment, other_fragment) else {
                    return false;
                };
                if *other_at + other_fragment.len() == *at {
                    // backspace: the new removal sits immediately before
                    let mut text = String::with_capacity(fragment.len() + other_fragment.len());
                    text.push_str(other_fragment.text());
                    text.push_str(fragment.text());
                    *fragment = Fragment::styled(text, style);
                    *at = *other_at;
                    true
                } else if *other_at == *at {
                    // forward delete at the same position
                    let mut text = String::with_capacity(fragment.len() + other_fragment.len());
                    text.push_str(fragment.text());
                    text.push_str(other_fragment.text());
                    *fragment = Fragment::styled(text, style);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }
}

/// The shared uniform style of two fragments, if both have one and they
/// match.
fn uniform_pair(a: &Fragment, b: &Fragment) -> Option<TextStyle> {
    let style = a.uniform_style()?;
    (b.uniform_style()? == style).then_some(style)
}

// ============================================================================
// History
// ============================================================================

/// Bounded linear edit history with a cursor between undo and redo halves.
///
/// Edits below `index` are undoable, edits at and above it are redoable.
#[derive(Debug, Clone)]
pub struct History {
    edits: Vec<Edit>,
    index: usize,
    limit: usize,
    merge_enabled: bool,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// A history retaining [`DEFAULT_EDIT_LIMIT`] edits.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_EDIT_LIMIT)
    }

    /// A history retaining at most `limit` edits.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            edits: Vec::new(),
            index: 0,
            limit: limit.max(1),
            merge_enabled: true,
        }
    }

    /// Record an edit, discarding any redoable branch first.
    pub fn push(&mut self, edit: Edit) {
        if self.index < self.edits.len() {
            let discarded = self.edits.len() - self.index;
            self.edits.truncate(self.index);
            tracing::trace!(
                target: "vellum_core::history",
                discarded,
                "dropped redo branch"
            );
        }
        if self.merge_enabled
            && let Some(last) = self.edits.last_mut()
            && last.try_merge(&edit)
        {
            return;
        }
        self.edits.push(edit);
        if self.edits.len() > self.limit {
            let excess = self.edits.len() - self.limit;
            self.edits.drain(..excess);
        }
        self.index = self.edits.len();
        self.merge_enabled = true;
    }

    /// Step back one edit. The caller applies the ops in reverse with their
    /// inverses.
    pub fn undo(&mut self) -> Option<&Edit> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.merge_enabled = false;
        Some(&self.edits[self.index])
    }

    /// Step forward one edit. The caller re-applies the ops in order.
    pub fn redo(&mut self) -> Option<&Edit> {
        if self.index >= self.edits.len() {
            return None;
        }
        let edit = &self.edits[self.index];
        self.index += 1;
        self.merge_enabled = false;
        Some(edit)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.edits.len()
    }

    /// Number of recorded edits.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.edits.clear();
        self.index = 0;
        self.merge_enabled = true;
    }

    /// Stop the next push from merging into the previous edit.
    pub fn break_merge(&mut self) {
        self.merge_enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextStyle;

    fn insert(at: usize, text: &str) -> Edit {
        Edit::insert(at, Fragment::plain(text))
    }

    fn remove(at: usize, text: &str) -> Edit {
        Edit::remove(at, Fragment::plain(text))
    }

    fn op_text(edit: &Edit) -> &str {
        match &edit.ops()[0] {
            EditOp::Insert { fragment, .. } | EditOp::Remove { fragment, .. } => fragment.text(),
            EditOp::Restyle { .. } => panic!("restyle op has no text"),
        }
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_undo_then_redo_returns_same_edit() {
        let mut history = History::new();
        history.push(insert(0, "hello"));
        let undone = history.undo().cloned();
        assert_eq!(undone, Some(insert(0, "hello")));
        assert!(history.can_redo());
        let redone = history.redo().cloned();
        assert_eq!(redone, undone);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_discards_redo_branch() {
        let mut history = History::new();
        history.push(insert(0, "a"));
        history.break_merge();
        history.push(insert(1, "b"));
        history.undo();
        history.push(insert(1, "c"));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(op_text(history.undo().unwrap()), "c");
        assert_eq!(op_text(history.undo().unwrap()), "a");
    }

    #[test]
    fn test_consecutive_inserts_merge() {
        let mut history = History::new();
        history.push(insert(0, "h"));
        history.push(insert(1, "i"));
        assert_eq!(history.len(), 1);
        assert_eq!(op_text(history.undo().unwrap()), "hi");
    }

    #[test]
    fn test_merge_stops_at_newline() {
        let mut history = History::new();
        history.push(insert(0, "a"));
        history.push(insert(1, "\n"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_merge_requires_contiguity() {
        let mut history = History::new();
        history.push(insert(0, "a"));
        history.push(insert(5, "b"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_merge_requires_matching_style() {
        let mut history = History::new();
        history.push(Edit::insert(0, Fragment::styled("a", TextStyle::bold())));
        history.push(Edit::insert(1, Fragment::styled("b", TextStyle::bold())));
        assert_eq!(history.len(), 1);
        history.push(Edit::insert(2, Fragment::plain("c")));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_backspace_removals_merge() {
        let mut history = History::new();
        // deleting "c" at 2, then "b" at 1, then "a" at 0
        history.push(remove(2, "c"));
        history.push(remove(1, "b"));
        history.push(remove(0, "a"));
        assert_eq!(history.len(), 1);
        let edit = history.undo().unwrap();
        assert_eq!(edit.ops()[0], EditOp::Remove {
            at: 0,
            fragment: Fragment::plain("abc"),
        });
    }

    #[test]
    fn test_forward_deletes_merge() {
        let mut history = History::new();
        history.push(remove(3, "a"));
        history.push(remove(3, "b"));
        assert_eq!(history.len(), 1);
        assert_eq!(op_text(history.undo().unwrap()), "ab");
    }

    #[test]
    fn test_insert_and_remove_never_merge() {
        let mut history = History::new();
        history.push(insert(0, "a"));
        history.push(remove(0, "a"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_undo_disarms_merging() {
        let mut history = History::new();
        history.push(insert(0, "a"));
        history.undo();
        history.push(insert(0, "b"));
        // "b" replaced the branch rather than merging into "a"
        assert_eq!(history.len(), 1);
        // merging re-arms after the fresh push
        history.push(insert(1, "c"));
        assert_eq!(history.len(), 1);
        assert_eq!(op_text(history.undo().unwrap()), "bc");
    }

    #[test]
    fn test_break_merge_prevents_coalescing() {
        let mut history = History::new();
        history.push(insert(0, "a"));
        history.break_merge();
        history.push(insert(1, "b"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_compound_edits_never_merge() {
        let mut history = History::new();
        history.push(Edit::compound(vec![
            EditOp::Remove {
                at: 0,
                fragment: Fragment::plain("x"),
            },
            EditOp::Insert {
                at: 0,
                fragment: Fragment::plain("y"),
            },
        ]));
        history.push(insert(1, "z"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_restyles_never_merge() {
        let mut history = History::new();
        history.push(Edit::restyle(0..3, vec![], vec![
            StyleRun::new(0..3, TextStyle::bold()),
        ]));
        history.push(Edit::restyle(0..3, vec![
            StyleRun::new(0..3, TextStyle::bold()),
        ], vec![]));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(3);
        for i in 0..5 {
            history.push(insert(i * 2, "x"));
        }
        assert_eq!(history.len(), 3);
        // undoing to the bottom reaches the third-from-last edit
        history.undo();
        history.undo();
        let last = history.undo().cloned();
        assert_eq!(last, Some(insert(4, "x")));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.push(insert(0, "a"));
        history.clear();
        assert!(history.is_empty());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_changes_content() {
        assert!(insert(0, "a").changes_content());
        assert!(!Edit::restyle(0..1, vec![], vec![]).changes_content());
    }
}
