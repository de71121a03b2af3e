//! Core systems for Vellum.
//!
//! This crate provides the foundational components of the Vellum editing
//! engine:
//!
//! - **Document Model**: UTF-8 text with character attribute runs
//! - **Undo History**: Linear, bounded, with typing coalescing
//! - **Search**: Literal, non-overlapping match scanning
//! - **Signal/Slot System**: Type-safe notification of state changes
//!
//! Everything here is headless and toolkit-free. The `vellum` crate builds
//! the editing session, view construction, and platform seams on top.
//!
//! # Document Example
//!
//! ```
//! use vellum_core::{Document, TextStyle};
//!
//! let mut doc = Document::from_text("hello world");
//! doc.set_style(0..5, TextStyle::bold()).unwrap();
//!
//! assert_eq!(doc.style_at(0), TextStyle::bold());
//! assert_eq!(doc.char_count(), 11);
//! ```
//!
//! # History Example
//!
//! ```
//! use vellum_core::{Edit, Fragment, History};
//!
//! let mut history = History::new();
//! history.push(Edit::insert(0, Fragment::plain("h")));
//! history.push(Edit::insert(1, Fragment::plain("i")));
//!
//! // consecutive typing coalesced into one edit
//! assert_eq!(history.len(), 1);
//! assert!(history.can_undo());
//! ```

pub mod document;
pub mod error;
pub mod history;
pub mod search;
pub mod signal;

pub use document::{Document, Fragment, StyleRun, TextStyle};
pub use error::{CoreResult, DocumentError};
pub use history::{DEFAULT_EDIT_LIMIT, Edit, EditOp, History};
pub use search::{FindOptions, SearchMatch, find_all, find_first};
pub use signal::{ConnectionId, Signal};
