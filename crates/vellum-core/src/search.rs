//! Literal text search.
//!
//! Queries are plain strings, never patterns: `.` matches only a dot.
//! Matches are reported as byte ranges and never overlap, so a match list
//! can be applied right to left as replacements without collisions.

use std::ops::Range;

/// Options controlling how matches are found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOptions {
    /// Compare characters exactly. When false, ASCII letters are folded;
    /// byte offsets still refer to the original text.
    pub case_sensitive: bool,
    /// Only accept matches bounded by non-word characters.
    pub whole_word: bool,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
        }
    }
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = whole_word;
        self
    }
}

/// A single match, as byte offsets into the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub start: usize,
    pub end: usize,
}

impl SearchMatch {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Find every non-overlapping occurrence of `pattern` in `text`, scanning
/// from the start. An empty pattern matches nothing.
pub fn find_all(text: &str, pattern: &str, options: &FindOptions) -> Vec<SearchMatch> {
    if pattern.is_empty() {
        return Vec::new();
    }
    let folded_text;
    let folded_pattern;
    let (hay, needle) = if options.case_sensitive {
        (text, pattern)
    } else {
        folded_text = text.to_ascii_lowercase();
        folded_pattern = pattern.to_ascii_lowercase();
        (folded_text.as_str(), folded_pattern.as_str())
    };

    let mut matches = Vec::new();
    let mut start = 0;
    while let Some(pos) = hay[start..].find(needle) {
        let abs = start + pos;
        let end = abs + needle.len();
        if !options.whole_word || is_word_bounded(text, abs, end) {
            matches.push(SearchMatch::new(abs, end));
            start = end;
        } else {
            // step past one character and keep scanning
            start = abs + hay[abs..].chars().next().map_or(1, char::len_utf8);
        }
    }
    matches
}

/// First match of `pattern` in `text`, scanning from the start.
pub fn find_first(text: &str, pattern: &str, options: &FindOptions) -> Option<SearchMatch> {
    find_all(text, pattern, options).into_iter().next()
}

/// Whether the characters adjacent to `[start, end)` are non-word
/// characters (or text edges).
fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
