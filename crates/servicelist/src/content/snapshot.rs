//! Keyed cursor snapshots.
//!
//! The one-level save/restore and the per-view line table are the same
//! thing: a snapshot stored under a key. The unkeyed save uses
//! [`SnapshotKey::Default`], which is consumed on restore; line snapshots
//! persist until overwritten or the root changes.

use std::collections::HashMap;

use crate::reference::ServiceReference;

/// Where a snapshot is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    /// The single-level save slot.
    Default,
    /// A view/line id supplied by the owner.
    Line(i32),
}

/// A remembered cursor position.
///
/// Both the ordinal and the element are kept so a restore can follow the
/// element when the list was edited in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSnapshot {
    pub ordinal: usize,
    /// `None` when the cursor was at the end sentinel.
    pub reference: Option<ServiceReference>,
}

impl CursorSnapshot {
    /// Where this snapshot lands in `list`.
    ///
    /// Prefers the saved ordinal while it still holds the saved element,
    /// then the element wherever it moved to, then the ordinal clamped to
    /// the end sentinel.
    pub fn resolve(&self, list: &[ServiceReference]) -> usize {
        match &self.reference {
            Some(reference) if list.get(self.ordinal) == Some(reference) => self.ordinal,
            Some(reference) => list
                .iter()
                .position(|entry| entry == reference)
                .unwrap_or_else(|| self.ordinal.min(list.len())),
            None => list.len(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct SnapshotStore {
    slots: HashMap<SnapshotKey, CursorSnapshot>,
}

impl SnapshotStore {
    pub(crate) fn save(&mut self, key: SnapshotKey, snapshot: CursorSnapshot) {
        self.slots.insert(key, snapshot);
    }

    /// Fetch the snapshot under `key`. The default slot is emptied.
    pub(crate) fn take(&mut self, key: SnapshotKey) -> Option<CursorSnapshot> {
        match key {
            SnapshotKey::Default => self.slots.remove(&key),
            SnapshotKey::Line(_) => self.slots.get(&key).cloned(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
