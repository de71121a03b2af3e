//! Clipboard access for cross-platform copy/paste operations.
//!
//! [`SystemClipboard`] is a thin wrapper around the `arboard` crate and
//! supports text on all major platforms (Windows, macOS, Linux).
//! [`MemoryClipboard`] implements the same trait against a plain string,
//! for tests and environments without a display server.

use std::fmt;

/// Error type for clipboard operations.
#[derive(Debug)]
pub struct ClipboardError {
    message: String,
}

impl ClipboardError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clipboard error: {}", self.message)
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Text transfer between the editor and a clipboard.
pub trait Clipboard {
    /// Replace the clipboard content with `text`.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// The current text content. Errors when the clipboard is empty or
    /// holds non-text data.
    fn text(&mut self) -> Result<String, ClipboardError>;
}

/// The system clipboard.
///
/// Create the instance when needed and drop it after use; keeping one
/// alive for the whole application lifetime is also fine.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    /// Connect to the system clipboard.
    ///
    /// # Errors
    ///
    /// Fails when the clipboard is unavailable, for example with no
    /// display server or when another process holds it locked.
    pub fn new() -> Result<Self, ClipboardError> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        tracing::trace!(
            target: "vellum::platform::clipboard",
            bytes = text.len(),
            "set text"
        );
        self.inner.set_text(text).map_err(Into::into)
    }

    fn text(&mut self) -> Result<String, ClipboardError> {
        self.inner.get_text().map_err(Into::into)
    }
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

/// In-memory clipboard for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }

    fn text(&mut self) -> Result<String, ClipboardError> {
        self.contents
            .clone()
            .ok_or_else(|| ClipboardError::new("clipboard is empty"))
    }
}
