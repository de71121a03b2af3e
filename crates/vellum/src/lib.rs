//! Vellum - a headless rich text editing core.
//!
//! This is the main crate. It re-exports the document model, undo history,
//! search, and signals from `vellum-core`, and layers the pieces a desktop
//! editor host needs on top of them:
//!
//! - **Session**: the command surface for typing, clipboard editing, undo,
//!   find and replace, styling, and file handling
//! - **Views**: element-to-view mapping and word-wrap layout measurement
//! - **Status**: caret position and character count reporting
//! - **Platform**: clipboard and file dialog seams a host implements
//! - **Config**: editor settings loaded from TOML
//! - **Logging**: `tracing` integration and view tree dumps
//!
//! # Example
//!
//! ```
//! use vellum::{Clipboard, EditorSession, MemoryClipboard};
//!
//! let mut session = EditorSession::new();
//! session.insert_text("hello world");
//! session.select_all();
//!
//! let mut clipboard = MemoryClipboard::new();
//! session.copy(&mut clipboard);
//! assert_eq!(clipboard.text().unwrap(), "hello world");
//!
//! assert_eq!(session.replace_all("world", "there"), 1);
//! assert_eq!(session.text(), "hello there");
//! assert!(session.undo());
//! assert_eq!(session.text(), "hello world");
//! ```
//!
//! # Signals
//!
//! Hosts connect to the session's signals to keep their widgets current:
//!
//! ```
//! use vellum::EditorSession;
//!
//! let mut session = EditorSession::new();
//! session.status_changed.connect(|status| {
//!     println!("{status}");
//! });
//! session.insert_text("x");
//! ```

pub use vellum_core::*;

pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod platform;
pub mod session;
pub mod status;
pub mod view;

pub use config::EditorConfig;
pub use error::{EditResult, EditorError};
pub use logging::{PerfSpan, TreeFormatOptions, TreeStyle, ViewTreeDebug};
pub use platform::{
    Clipboard, ClipboardError, DialogProvider, FileFilter, MemoryClipboard, SystemClipboard,
};
pub use session::EditorSession;
pub use status::Status;
pub use view::{
    ElementKind, OBJECT_REPLACEMENT, Segment, View, ViewFactory, WrapPolicy, grapheme_width,
};
