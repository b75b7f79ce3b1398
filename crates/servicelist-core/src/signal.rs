//! Change notification signals.
//!
//! A trimmed-down signal/slot mechanism: every slot is invoked directly on the
//! emitting control flow. The service list engine is single-threaded and
//! cooperative, so queued or cross-thread delivery is never needed; the
//! owning widget connects slots to learn about inserted, removed, changed and
//! reset rows.
//!
//! # Example
//!
//! ```
//! use servicelist_core::Signal;
//!
//! let entry_added = Signal::<usize>::new();
//! let id = entry_added.connect(|row| println!("row {row} added"));
//! entry_added.emit(3);
//! entry_added.disconnect(id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Identifies one slot connected to a [`Signal`].
    ///
    /// Returned by [`Signal::connect`], consumed by [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal with any number of connected slots.
///
/// Every connected slot is called once per emit, in no guaranteed order:
/// slots disconnected earlier leave gaps that later connections reuse.
/// Emission snapshots the slot list before invoking anything, so a slot may
/// connect or disconnect on the same signal without deadlocking.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Disconnect a slot by its connection ID.
    ///
    /// Returns `true` if the connection existed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Disconnect every slot.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Temporarily suppress emission.
    ///
    /// The list never blocks its own signals. A host filling a list with
    /// `append_service` can block the per-row signal and rely on the reset
    /// emitted by `fill_finished` instead.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether emission is currently suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Invoke every connected slot with `args`.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");
        for slot in slots {
            slot(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<usize>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_all_slots() {
        let signal = Signal::<usize>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let a = seen.clone();
        signal.connect(move |row| a.lock().push(("a", *row)));
        let b = seen.clone();
        signal.connect(move |row| b.lock().push(("b", *row)));

        signal.emit(7);

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&("a", 7)));
        assert!(seen.contains(&("b", 7)));
    }

    #[test]
    fn test_disconnect() {
        let signal = Signal::<()>::new();
        let hits = Arc::new(Mutex::new(0));

        let h = hits.clone();
        let id = signal.connect(move |_| *h.lock() += 1);
        signal.emit(());
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(());

        assert_eq!(*hits.lock(), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_blocked_signal_is_silent() {
        let signal = Signal::<bool>::new();
        let hits = Arc::new(Mutex::new(0));

        let h = hits.clone();
        signal.connect(move |_| *h.lock() += 1);

        signal.set_blocked(true);
        signal.emit(true);
        assert_eq!(*hits.lock(), 0);

        signal.set_blocked(false);
        signal.emit(true);
        assert_eq!(*hits.lock(), 1);
    }

    #[test]
    fn test_reconnect_after_disconnect_fires_once() {
        let signal = Signal::<u8>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let seen = seen.clone();
            signal.connect(move |_| seen.lock().push("first"))
        };
        let s = seen.clone();
        signal.connect(move |_| s.lock().push("second"));
        signal.disconnect(first);
        let s = seen.clone();
        signal.connect(move |_| s.lock().push("third"));

        signal.emit(1);

        let mut seen = seen.lock().clone();
        seen.sort_unstable();
        assert_eq!(seen, ["second", "third"]);
        assert_eq!(signal.connection_count(), 2);
    }

    #[test]
    fn test_slot_may_disconnect_all_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let inner = signal.clone();
        signal.connect(move |_| inner.disconnect_all());

        signal.emit(());
        assert_eq!(signal.connection_count(), 0);
    }
}
