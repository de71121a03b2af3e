//! Signal/slot connections.
//!
//! Signals let the editing engine announce state changes without knowing
//! who listens. Hosts connect closures; [`Signal::emit`] invokes every
//! connected slot immediately, on the calling thread, in connection order.
//!
//! # Example
//!
//! ```
//! use vellum_core::Signal;
//!
//! let changed = Signal::<String>::new();
//! let id = changed.connect(|title| println!("title is now {title}"));
//!
//! changed.emit("Untitled".to_string());
//! changed.disconnect(id);
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Identifier for a single signal connection.
    pub struct ConnectionId;
}

struct Connection<Args> {
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A typed broadcast point with any number of connected slots.
///
/// Slots receive the emitted value by reference. Emission is suppressed
/// while the signal is blocked.
pub struct Signal<Args = ()> {
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Create a signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot. Returns an id usable with [`Signal::disconnect`].
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Connection {
            slot: Arc::new(slot),
        })
    }

    /// Remove a connection. Returns whether it existed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Remove every connection.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block or unblock emission. Returns the previous state.
    pub fn set_blocked(&self, blocked: bool) -> bool {
        self.blocked.swap(blocked, Ordering::SeqCst)
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Invoke every connected slot with `args`.
    ///
    /// Slots run outside the connection lock, so a slot may connect or
    /// disconnect without deadlocking. Slots added during emission are not
    /// called until the next emit.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            return;
        }
        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = self
            .connections
            .lock()
            .values()
            .map(|c| Arc::clone(&c.slot))
            .collect();
        tracing::trace!(
            target: "vellum_core::signal",
            slots = slots.len(),
            "emit"
        );
        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}
