//! Platform services: system clipboard and host-supplied dialogs.
//!
//! The engine never talks to a windowing system directly. Clipboard access
//! goes through the [`Clipboard`] trait, with [`SystemClipboard`] wrapping
//! the real platform clipboard and [`MemoryClipboard`] standing in for
//! tests and headless runs. File choosers and input prompts come from a
//! host-implemented [`DialogProvider`].

mod clipboard;
mod dialogs;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};
pub use dialogs::{DialogProvider, FileFilter};
