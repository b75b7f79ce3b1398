//! The ordered list store behind a service list widget.
//!
//! [`ServiceListContent`] owns the children of the active root, the cursor
//! over them, the cursor snapshots, the marked set and the visual
//! configuration. The widget drives it from its UI control flow:
//!
//! ```
//! use std::sync::Arc;
//! use servicelist::{Providers, ServiceListContent, ServiceListProvider, ServiceReference};
//!
//! struct Bouquet(Vec<ServiceReference>);
//!
//! impl ServiceListProvider for Bouquet {
//!     fn list(&self, _root: &ServiceReference) -> Option<Vec<ServiceReference>> {
//!         Some(self.0.clone())
//!     }
//! }
//!
//! let bouquet = Bouquet(vec![
//!     ServiceReference::service("1:0:1:6D66", "Das Erste HD"),
//!     ServiceReference::service("1:0:1:6D67", "ZDF HD"),
//! ]);
//! let mut content = ServiceListContent::new(Providers::new(Arc::new(bouquet)));
//! content.set_root(ServiceReference::folder("1:7:1:", "Favourites"), false);
//!
//! assert_eq!(content.size(), 2);
//! assert_eq!(content.cursor_move(1), 1);
//! assert_eq!(content.get_current().map(|s| s.name()), Some("ZDF HD"));
//! ```
//!
//! # Cursor
//!
//! The cursor is an ordinal into the list. `cursor == size()` is the end
//! sentinel; every other value sits on a visible element. Ordinals returned by the
//! search operations are raw list positions and can be passed straight to
//! [`cursor_set`](ServiceListContent::cursor_set). Relative moves count only
//! visible entries, and the row numbers carried by [`ContentSignals`] are
//! visible rows (see [`cursor_resolve`](ServiceListContent::cursor_resolve)).
//! Positioning on an invisible entry moves on to the next visible one.

mod config;
mod cursor;
mod snapshot;

pub use snapshot::{CursorSnapshot, SnapshotKey};

use servicelist_core::logging::{span_names, targets};
use servicelist_core::{PerfSpan, Signal, servicelist_debug, servicelist_trace, servicelist_warn};

use crate::marked::MarkedSet;
use crate::picon::PiconCache;
use crate::provider::{Providers, RecordType};
use crate::reference::ServiceReference;
use crate::visual::VisualConfig;

use snapshot::SnapshotStore;

/// Notifications emitted as the list changes.
///
/// Row arguments are visible rows.
#[derive(Default)]
pub struct ContentSignals {
    /// A row was inserted.
    pub entry_added: Signal<usize>,
    /// A row was removed.
    pub entry_removed: Signal<usize>,
    /// A row must be repainted (move-mode swap, mark toggle).
    pub entry_changed: Signal<usize>,
    /// The whole list changed. The argument asks the view to select the
    /// first row.
    pub entry_reset: Signal<bool>,
}

/// List store, cursor, marked set and visual configuration of one widget.
pub struct ServiceListContent {
    pub(crate) providers: Providers,
    pub(crate) root: ServiceReference,
    pub(crate) list: Vec<ServiceReference>,
    pub(crate) cursor: usize,
    pub(crate) snapshots: SnapshotStore,
    pub(crate) marked: MarkedSet,
    pub(crate) move_mode: bool,
    pub(crate) ignore: Option<ServiceReference>,
    pub(crate) visual: VisualConfig,
    pub(crate) picons: PiconCache,
    signals: ContentSignals,
}

static_assertions::assert_impl_all!(ContentSignals: Send, Sync);

impl ServiceListContent {
    /// An empty list with no root.
    pub fn new(providers: Providers) -> Self {
        Self {
            providers,
            root: ServiceReference::default(),
            list: Vec::new(),
            cursor: 0,
            snapshots: SnapshotStore::default(),
            marked: MarkedSet::new(),
            move_mode: false,
            ignore: None,
            visual: VisualConfig::default(),
            picons: PiconCache::new(),
            signals: ContentSignals::default(),
        }
    }

    pub fn signals(&self) -> &ContentSignals {
        &self.signals
    }

    pub fn providers(&self) -> &Providers {
        &self.providers
    }

    pub fn root(&self) -> &ServiceReference {
        &self.root
    }

    /// Switch to a new root.
    ///
    /// Unless `just_set`, the children of `root` are fetched from the
    /// service list provider, replacing the list; the cursor goes home and
    /// every snapshot is dropped. With `just_set` only the stored root
    /// changes, for callers that already synchronized the contents.
    pub fn set_root(&mut self, root: ServiceReference, just_set: bool) {
        self.root = root;
        if just_set {
            servicelist_trace!(root = %self.root, "root set without reload");
            return;
        }

        let _span = PerfSpan::new(span_names::SET_ROOT);
        self.list = match self.providers.services.list(&self.root) {
            Some(list) => list,
            None => {
                servicelist_warn!(root = %self.root, "root cannot be listed");
                Vec::new()
            }
        };
        self.move_mode = false;
        self.snapshots.clear();
        self.cursor_home();
        servicelist_debug!(root = %self.root, size = self.list.len(), "root loaded");
        self.signals.entry_reset.emit(true);
    }

    /// Insert `service` next to the cursor without moving it.
    ///
    /// The cursor keeps pointing at the same element (or the end sentinel).
    /// On an empty list the cursor lands on the new element.
    pub fn add_service(&mut self, service: ServiceReference, before_current: bool) {
        let was_empty = self.list.is_empty();
        let at = if before_current || self.cursor >= self.list.len() {
            self.cursor.min(self.list.len())
        } else {
            self.cursor + 1
        };
        if !before_current && at == self.list.len() {
            self.list.push(service);
        } else {
            self.list.insert(at, service);
        }

        if was_empty {
            self.cursor = 0;
        } else if at <= self.cursor {
            self.cursor += 1;
        }

        let row = self.cursor_resolve(at);
        servicelist_trace!(ordinal = at, before_current, "service added");
        self.signals.entry_added.emit(row);
    }

    /// Append `service` at the end. A cursor at the end sentinel stays
    /// there.
    ///
    /// Used to fill the list in bulk; finish with
    /// [`fill_finished`](Self::fill_finished).
    pub fn append_service(&mut self, service: ServiceReference) {
        let at_end = self.cursor >= self.list.len();
        self.list.push(service);
        if at_end {
            self.cursor = self.list.len();
        }
        let row = self.cursor_resolve(self.list.len() - 1);
        self.signals.entry_added.emit(row);
    }

    /// Home the cursor after a bulk fill and reset the view.
    pub fn fill_finished(&mut self) {
        self.cursor_home();
        servicelist_debug!(size = self.list.len(), "fill finished");
        self.signals.entry_reset.emit(true);
    }

    /// Erase the element at the cursor.
    ///
    /// The cursor moves on to the next visible element, or the end sentinel.
    /// Returns `false` when the cursor was not on an element.
    pub fn remove_current(&mut self) -> bool {
        if !self.cursor_valid() {
            return false;
        }
        let row = self.cursor_resolve(self.cursor);
        let removed = self.list.remove(self.cursor);
        self.move_mode = false;
        self.cursor = self.first_visible_from(self.cursor);
        servicelist_trace!(service = %removed, "service removed");
        self.signals.entry_removed.emit(row);
        true
    }

    /// Stable sort by the provider's comparison.
    ///
    /// The cursor follows the element it was on.
    pub fn sort(&mut self) {
        let _span = PerfSpan::new(span_names::SORT);
        let services = self.providers.services.clone();
        let mut entries: Vec<(usize, ServiceReference)> =
            std::mem::take(&mut self.list).into_iter().enumerate().collect();
        entries.sort_by(|(_, a), (_, b)| services.compare(a, b));

        let old_cursor = self.cursor;
        let mut cursor = entries.len();
        self.list = entries
            .into_iter()
            .enumerate()
            .map(|(ordinal, (previous, service))| {
                if previous == old_cursor {
                    cursor = ordinal;
                }
                service
            })
            .collect();
        self.cursor = cursor;

        servicelist_debug!(size = self.list.len(), "list sorted");
        self.signals.entry_reset.emit(false);
    }

    /// Number of entries, invisible ones included.
    #[inline]
    pub fn size(&self) -> usize {
        self.list.len()
    }

    /// Copy of every entry in list order.
    pub fn get_list(&self) -> Vec<ServiceReference> {
        self.list.clone()
    }

    /// Entries in list order.
    pub fn entries(&self) -> &[ServiceReference] {
        &self.list
    }

    /// The reference never colored as unavailable, typically the service
    /// currently playing.
    pub fn set_ignore_service(&mut self, service: Option<ServiceReference>) {
        self.ignore = service;
    }

    pub fn ignore_service(&self) -> Option<&ServiceReference> {
        self.ignore.as_ref()
    }

    // -------------------------------------------------------------------------
    // Marked set
    // -------------------------------------------------------------------------

    /// Clear the marked set.
    pub fn init_marked(&mut self) {
        self.marked.clear();
        tracing::trace!(target: targets::MARKED, "marked set cleared");
    }

    /// Mark `service`. Marking twice is a no-op.
    pub fn add_marked(&mut self, service: ServiceReference) {
        tracing::trace!(target: targets::MARKED, service = %service, "mark");
        self.marked.insert(service);
    }

    /// Unmark `service`. Unmarking an unmarked reference is a no-op.
    pub fn remove_marked(&mut self, service: &ServiceReference) {
        tracing::trace!(target: targets::MARKED, service = %service, "unmark");
        self.marked.remove(service);
    }

    pub fn is_marked(&self, service: &ServiceReference) -> bool {
        self.marked.contains(service)
    }

    /// Begin a snapshot pass over the marked set.
    ///
    /// The pass reflects the set as of this call. Finish or abandon it
    /// before mutating the set or the list.
    pub fn marked_query_start(&mut self) {
        self.marked.query_start();
    }

    /// Next member of the current pass, `None` once exhausted.
    pub fn marked_query_next(&mut self) -> Option<ServiceReference> {
        self.marked.query_next()
    }

    /// The marked set, for read-only inspection.
    pub fn marked(&self) -> &MarkedSet {
        &self.marked
    }

    // -------------------------------------------------------------------------
    // Recording state
    // -------------------------------------------------------------------------

    /// Whether `service` is being recorded under `filter`.
    ///
    /// A group counts as recorded when any of its member services is.
    pub fn check_service_is_recorded(&self, service: &ServiceReference, filter: RecordType) -> bool {
        let recorded = self.providers.recordings.recorded_services(filter);
        if recorded.is_empty() {
            return false;
        }
        if service.is_group() {
            return self
                .providers
                .services
                .list(service)
                .unwrap_or_default()
                .iter()
                .any(|member| recorded.contains(member));
        }
        recorded.contains(service)
    }
}

impl std::fmt::Debug for ServiceListContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceListContent")
            .field("root", &self.root)
            .field("size", &self.list.len())
            .field("cursor", &self.cursor)
            .field("move_mode", &self.move_mode)
            .field("marked", &self.marked.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::provider::{NullProvider, RecordingProvider, ServiceListProvider};

    struct Bouquet(Vec<ServiceReference>);

    impl ServiceListProvider for Bouquet {
        fn list(&self, root: &ServiceReference) -> Option<Vec<ServiceReference>> {
            if root.is_group() {
                return Some(vec![svc("Member")]);
            }
            Some(self.0.clone())
        }
    }

    struct Recording(Vec<ServiceReference>);

    impl RecordingProvider for Recording {
        fn recorded_services(&self, filter: RecordType) -> Vec<ServiceReference> {
            if filter.intersects(RecordType::REAL) {
                self.0.clone()
            } else {
                Vec::new()
            }
        }
    }

    fn svc(name: &str) -> ServiceReference {
        ServiceReference::service(format!("1:0:1:{name}"), name)
    }

    fn content(names: &[&str]) -> ServiceListContent {
        let bouquet = Bouquet(names.iter().map(|name| svc(name)).collect());
        let mut content = ServiceListContent::new(Providers::new(Arc::new(bouquet)));
        content.set_root(ServiceReference::folder("1:7:1:", "Favourites"), false);
        content
    }

    #[test]
    fn test_set_root_loads_and_homes() {
        let content = content(&["A", "B"]);
        assert_eq!(content.size(), 2);
        assert_eq!(content.cursor_get(), 0);
        assert!(content.cursor_valid());
    }

    #[test]
    fn test_set_root_just_set_keeps_list() {
        let mut content = content(&["A", "B"]);
        content.cursor_move(1);
        content.set_root(ServiceReference::folder("1:7:2:", "Radio"), true);
        assert_eq!(content.size(), 2);
        assert_eq!(content.cursor_get(), 1);
        assert_eq!(content.root().name(), "Radio");
    }

    #[test]
    fn test_unlistable_root_is_empty() {
        let mut content = ServiceListContent::new(Providers::new(Arc::new(NullProvider)));
        content.set_root(ServiceReference::folder("1:7:1:", "Favourites"), false);
        assert_eq!(content.size(), 0);
        assert!(!content.cursor_valid());
    }

    #[test]
    fn test_add_before_keeps_cursor_on_element() {
        let mut content = content(&["A", "B"]);
        content.cursor_move(1);
        content.add_service(svc("X"), true);
        assert_eq!(content.get_current(), Some(&svc("B")));
        assert_eq!(content.get_list()[1], svc("X"));
    }

    #[test]
    fn test_add_after_inserts_behind_cursor() {
        let mut content = content(&["A", "B"]);
        content.add_service(svc("X"), false);
        assert_eq!(content.get_current(), Some(&svc("A")));
        assert_eq!(content.get_list(), vec![svc("A"), svc("X"), svc("B")]);
    }

    #[test]
    fn test_add_to_empty_list_selects_it() {
        let mut content = content(&[]);
        content.add_service(svc("A"), false);
        assert_eq!(content.get_current(), Some(&svc("A")));
    }

    #[test]
    fn test_append_keeps_end_sentinel() {
        let mut content = content(&["A"]);
        content.cursor_end();
        content.append_service(svc("B"));
        assert!(!content.cursor_valid());
        assert_eq!(content.size(), 2);

        content.fill_finished();
        assert_eq!(content.get_current(), Some(&svc("A")));
    }

    #[test]
    fn test_remove_moves_to_next() {
        let mut content = content(&["A", "B", "C"]);
        content.cursor_move(1);
        assert!(content.remove_current());
        assert_eq!(content.get_current(), Some(&svc("C")));

        assert!(content.remove_current());
        assert!(!content.cursor_valid());
        assert!(!content.remove_current());
        assert_eq!(content.size(), 1);
    }

    #[test]
    fn test_remove_only_element() {
        let mut content = content(&["A"]);
        assert!(content.remove_current());
        assert!(!content.cursor_valid());
        assert_eq!(content.size(), 0);
    }

    #[test]
    fn test_sort_follows_cursor_element() {
        let mut content = content(&["delta", "Alpha", "charlie", "Bravo"]);
        content.cursor_move(2);
        content.sort();

        let names: Vec<_> = content.entries().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, ["Alpha", "Bravo", "charlie", "delta"]);
        assert_eq!(content.get_current(), Some(&svc("charlie")));
    }

    #[test]
    fn test_signals_report_rows() {
        let mut content = content(&["A", "B"]);
        let added = Arc::new(AtomicUsize::new(usize::MAX));
        let removed = Arc::new(AtomicUsize::new(usize::MAX));
        {
            let added = added.clone();
            content.signals().entry_added.connect(move |row| added.store(*row, Ordering::SeqCst));
            let removed = removed.clone();
            content.signals().entry_removed.connect(move |row| removed.store(*row, Ordering::SeqCst));
        }

        content.add_service(svc("X"), false);
        assert_eq!(added.load(Ordering::SeqCst), 1);

        content.cursor_move(2);
        content.remove_current();
        assert_eq!(removed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_marked_set_survives_root_change() {
        let mut content = content(&["A"]);
        content.add_marked(svc("A"));
        content.set_root(ServiceReference::folder("1:7:2:", "Radio"), false);
        assert!(content.is_marked(&svc("A")));

        content.init_marked();
        assert!(!content.is_marked(&svc("A")));
    }

    #[test]
    fn test_group_recorded_through_member() {
        let bouquet = Bouquet(vec![svc("A")]);
        let providers = Providers::new(Arc::new(bouquet))
            .with_recordings(Arc::new(Recording(vec![svc("Member")])));
        let content = ServiceListContent::new(providers);

        let group = ServiceReference::group("1:134:1:", "Alternatives");
        assert!(content.check_service_is_recorded(&group, RecordType::ANY));
        assert!(content.check_service_is_recorded(&svc("Member"), RecordType::REAL));
        assert!(!content.check_service_is_recorded(&svc("Member"), RecordType::STREAMING));
        assert!(!content.check_service_is_recorded(&svc("A"), RecordType::ANY));
    }
}
