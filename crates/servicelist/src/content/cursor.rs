//! Cursor movement, snapshots and searches.

use servicelist_core::logging::targets;

use super::snapshot::{CursorSnapshot, SnapshotKey};
use super::ServiceListContent;
use crate::reference::{ServiceKind, ServiceReference};

impl ServiceListContent {
    /// First visible ordinal at or after `from`, or the end sentinel.
    pub(crate) fn first_visible_from(&self, from: usize) -> usize {
        (from..self.list.len())
            .find(|&i| !self.list[i].is_invisible())
            .unwrap_or(self.list.len())
    }

    fn next_visible(&self, from: usize) -> Option<usize> {
        (from + 1..self.list.len()).find(|&i| !self.list[i].is_invisible())
    }

    fn prev_visible(&self, from: usize) -> Option<usize> {
        (0..from.min(self.list.len()))
            .rev()
            .find(|&i| !self.list[i].is_invisible())
    }

    /// Move to the first visible element.
    pub fn cursor_home(&mut self) {
        self.cursor = self.first_visible_from(0);
    }

    /// Move to the end sentinel.
    pub fn cursor_end(&mut self) {
        self.cursor = self.list.len();
    }

    /// Move by `count` visible entries, negative meaning backward.
    ///
    /// Stops at the first element and at the end sentinel instead of
    /// wrapping, and returns how many steps were taken. In move mode every
    /// step swaps the current element with its neighbour instead, so the
    /// element travels with the cursor and never reaches the end sentinel.
    pub fn cursor_move(&mut self, count: isize) -> isize {
        let mut moved = 0isize;
        while moved != count {
            let forward = count > 0;
            let target = if forward {
                if self.cursor >= self.list.len() {
                    break;
                }
                match self.next_visible(self.cursor) {
                    Some(next) => next,
                    None if self.move_mode => break,
                    None => self.list.len(),
                }
            } else {
                match self.prev_visible(self.cursor) {
                    Some(prev) => prev,
                    None => break,
                }
            };

            if self.move_mode && self.cursor < self.list.len() {
                self.swap_entries(self.cursor, target);
            }
            self.cursor = target;
            moved += if forward { 1 } else { -1 };
        }
        tracing::trace!(target: targets::CURSOR, requested = count, moved, cursor = self.cursor, "cursor moved");
        moved
    }

    fn swap_entries(&mut self, from: usize, to: usize) {
        self.list.swap(from, to);
        let rows = (self.cursor_resolve(from), self.cursor_resolve(to));
        self.signals.entry_changed.emit(rows.0);
        self.signals.entry_changed.emit(rows.1);
    }

    /// Put the cursor on `ordinal`, or the end sentinel when out of range.
    ///
    /// An invisible entry is never current; the cursor lands on the next
    /// visible one instead.
    pub fn cursor_set(&mut self, ordinal: usize) {
        self.cursor = self.first_visible_from(ordinal);
    }

    /// Visible row of the raw `ordinal`: the number of visible entries
    /// before it.
    pub fn cursor_resolve(&self, ordinal: usize) -> usize {
        self.list[..ordinal.min(self.list.len())]
            .iter()
            .filter(|entry| !entry.is_invisible())
            .count()
    }

    /// Current ordinal; equals [`size`](Self::size) at the end sentinel.
    #[inline]
    pub fn cursor_get(&self) -> usize {
        self.cursor
    }

    /// Whether the cursor is on an element.
    #[inline]
    pub fn cursor_valid(&self) -> bool {
        self.cursor < self.list.len()
    }

    /// Whether the element at the cursor may be selected by the user.
    ///
    /// Groups and invisible entries never are. Markers only are while the
    /// marked set is non-empty, so they can be edited.
    pub fn current_cursor_selectable(&self) -> bool {
        let Some(current) = self.list.get(self.cursor) else {
            return false;
        };
        if current.is_invisible() {
            return false;
        }
        match current.kind() {
            ServiceKind::Marker => !self.marked.is_empty(),
            ServiceKind::Group => false,
            _ => true,
        }
    }

    fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            ordinal: self.cursor,
            reference: self.list.get(self.cursor).cloned(),
        }
    }

    fn restore_from(&mut self, key: SnapshotKey) -> bool {
        match self.snapshots.take(key) {
            Some(snapshot) => {
                self.cursor = snapshot.resolve(&self.list);
                tracing::trace!(target: targets::CURSOR, ?key, cursor = self.cursor, "cursor restored");
                true
            }
            None => false,
        }
    }

    /// Remember the cursor for one [`cursor_restore`](Self::cursor_restore).
    pub fn cursor_save(&mut self) {
        let snapshot = self.snapshot();
        self.snapshots.save(SnapshotKey::Default, snapshot);
    }

    /// Return to the position of the last [`cursor_save`](Self::cursor_save).
    ///
    /// No-op when nothing was saved.
    pub fn cursor_restore(&mut self) {
        self.restore_from(SnapshotKey::Default);
    }

    /// Remember the cursor under a view id.
    pub fn cursor_save_line(&mut self, line: i32) {
        let snapshot = self.snapshot();
        self.snapshots.save(SnapshotKey::Line(line), snapshot);
    }

    /// Return to the position saved under `line`.
    ///
    /// Returns `false`, leaving the cursor alone, for an unknown id.
    pub fn cursor_restore_line(&mut self, line: i32) -> bool {
        self.restore_from(SnapshotKey::Line(line))
    }

    /// Display name of `service`, as the info provider knows it.
    pub(crate) fn display_name(&self, service: &ServiceReference) -> String {
        self.providers
            .info
            .info(service)
            .map(|info| info.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| service.name().to_string())
    }

    /// Ordinals of the whole list in circular order, starting right after
    /// the cursor and ending on it. From the end sentinel the scan starts
    /// at the first element.
    fn circular_forward(&self) -> impl Iterator<Item = usize> + use<> {
        let len = self.list.len();
        let start = if self.cursor < len { self.cursor } else { len.saturating_sub(1) };
        (1..=len).map(move |k| (start + k) % len)
    }

    /// Like [`circular_forward`](Self::circular_forward), backward. From
    /// the end sentinel the scan starts at the last element.
    fn circular_backward(&self) -> impl Iterator<Item = usize> + use<> {
        let len = self.list.len();
        let start = self.cursor.min(len);
        (1..=len).map(move |k| (start + 2 * len - k) % len)
    }

    /// Next visible entry whose display name starts with `c`, ignoring case
    /// and leading blanks or control characters.
    ///
    /// The scan starts after the cursor and wraps once around the list. The
    /// cursor does not move.
    pub fn get_next_beginning_with_char(&self, c: char) -> Option<usize> {
        let found = self.circular_forward().find(|&ordinal| {
            let entry = &self.list[ordinal];
            if entry.is_invisible() {
                return false;
            }
            let name = self.display_name(entry);
            name.chars()
                .find(|ch| !ch.is_whitespace() && !ch.is_control())
                .is_some_and(|first| first.to_lowercase().eq(c.to_lowercase()))
        });
        tracing::trace!(target: targets::CURSOR, %c, ?found, "char search");
        found
    }

    /// Nearest marker before the cursor, wrapping.
    pub fn get_prev_marker_pos(&self) -> Option<usize> {
        self.circular_backward().find(|&i| self.is_visible_marker(i))
    }

    /// Nearest marker after the cursor, wrapping.
    pub fn get_next_marker_pos(&self) -> Option<usize> {
        self.circular_forward().find(|&i| self.is_visible_marker(i))
    }

    fn is_visible_marker(&self, ordinal: usize) -> bool {
        let entry = &self.list[ordinal];
        entry.is_marker() && !entry.is_invisible()
    }

    /// The visible entry before the cursor.
    pub fn get_prev(&self) -> Option<&ServiceReference> {
        self.prev_visible(self.cursor).map(|i| &self.list[i])
    }

    /// The visible entry after the cursor.
    pub fn get_next(&self) -> Option<&ServiceReference> {
        if !self.cursor_valid() {
            return None;
        }
        self.next_visible(self.cursor).map(|i| &self.list[i])
    }

    /// The entry at the cursor.
    pub fn get_current(&self) -> Option<&ServiceReference> {
        self.list.get(self.cursor)
    }

    /// Ordinal of `service`, independent of the cursor.
    pub fn lookup_service(&self, service: &ServiceReference) -> Option<usize> {
        self.list.iter().position(|entry| entry == service)
    }

    /// Put the cursor on `service`. Returns `false` if it is not listed.
    ///
    /// Like [`cursor_set`](Self::cursor_set), an invisible match moves on to
    /// the next visible entry.
    pub fn set_current(&mut self, service: &ServiceReference) -> bool {
        match self.lookup_service(service) {
            Some(ordinal) => {
                self.cursor_set(ordinal);
                true
            }
            None => {
                tracing::debug!(target: targets::CURSOR, service = %service, "set_current: not listed");
                false
            }
        }
    }

    /// Enter or leave move mode for the element at the cursor.
    ///
    /// While in move mode [`cursor_move`](Self::cursor_move) drags the
    /// element along. Leaving asks the service list provider to persist the
    /// new position; a provider that declines keeps the in-memory order.
    /// Returns `false` when the cursor is not on an element.
    pub fn set_current_marked(&mut self, state: bool) -> bool {
        let Some(current) = self.list.get(self.cursor).cloned() else {
            return false;
        };
        let was = std::mem::replace(&mut self.move_mode, state);
        if was && !state {
            let persisted = self
                .providers
                .services
                .move_service(&self.root, &current, self.cursor);
            tracing::debug!(
                target: targets::MARKED,
                service = %current,
                position = self.cursor,
                persisted,
                "move mode left"
            );
        } else if !was && state {
            tracing::debug!(target: targets::MARKED, service = %current, "move mode entered");
        }
        self.signals.entry_changed.emit(self.cursor_resolve(self.cursor));
        true
    }

    /// Whether move mode is active.
    #[inline]
    pub fn is_current_marked(&self) -> bool {
        self.move_mode
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::content::ServiceListContent;
    use crate::provider::{Providers, ServiceListProvider};
    use crate::reference::ServiceReference;

    #[derive(Default)]
    struct Editable {
        entries: Vec<ServiceReference>,
        moves: Mutex<Vec<(String, usize)>>,
    }

    impl ServiceListProvider for Editable {
        fn list(&self, _root: &ServiceReference) -> Option<Vec<ServiceReference>> {
            Some(self.entries.clone())
        }

        fn move_service(&self, _root: &ServiceReference, service: &ServiceReference, position: usize) -> bool {
            self.moves.lock().push((service.name().to_string(), position));
            true
        }
    }

    fn svc(name: &str) -> ServiceReference {
        ServiceReference::service(format!("1:0:1:{name}"), name)
    }

    fn build(entries: Vec<ServiceReference>) -> (ServiceListContent, Arc<Editable>) {
        let provider = Arc::new(Editable {
            entries,
            ..Default::default()
        });
        let mut content = ServiceListContent::new(Providers::new(provider.clone()));
        content.set_root(ServiceReference::folder("1:7:1:", "Favourites"), false);
        (content, provider)
    }

    fn names(content: &ServiceListContent) -> Vec<&str> {
        content.entries().iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_move_clamps_at_bounds() {
        let (mut content, _) = build(vec![svc("A"), svc("B"), svc("C")]);
        assert_eq!(content.cursor_move(-1), 0);
        assert_eq!(content.cursor_move(10), 3);
        assert!(!content.cursor_valid());
        assert_eq!(content.cursor_move(1), 0);
        assert_eq!(content.cursor_move(-2), -2);
        assert_eq!(content.get_current(), Some(&svc("B")));
    }

    #[test]
    fn test_move_on_empty_list() {
        let (mut content, _) = build(Vec::new());
        assert_eq!(content.cursor_move(1), 0);
        assert_eq!(content.cursor_move(-1), 0);
    }

    #[test]
    fn test_move_skips_invisible() {
        let (mut content, _) = build(vec![svc("A"), svc("hidden").invisible(), svc("B")]);
        assert_eq!(content.cursor_move(1), 1);
        assert_eq!(content.get_current(), Some(&svc("B")));
        assert_eq!(content.cursor_resolve(content.cursor_get()), 1);
        assert_eq!(content.get_prev(), Some(&svc("A")));
    }

    #[test]
    fn test_home_skips_leading_invisible() {
        let (content, _) = build(vec![svc("hidden").invisible(), svc("A")]);
        assert_eq!(content.cursor_get(), 1);
    }

    #[test]
    fn test_cursor_set_skips_invisible() {
        let hidden = svc("hidden").invisible();
        let (mut content, _) = build(vec![svc("A"), hidden.clone(), svc("B"), svc("tail").invisible()]);

        content.cursor_set(1);
        assert_eq!(content.get_current(), Some(&svc("B")));
        assert_eq!(content.cursor_resolve(content.cursor_get()), 1);

        assert!(content.set_current(&hidden));
        assert_eq!(content.cursor_get(), 2);
        assert_eq!(content.cursor_move(-1), -1);
        assert_eq!(content.get_current(), Some(&svc("A")));

        content.cursor_set(3);
        assert!(!content.cursor_valid());
    }

    #[test]
    fn test_cursor_set_out_of_range_is_end() {
        let (mut content, _) = build(vec![svc("A"), svc("B")]);
        content.cursor_set(1);
        assert_eq!(content.get_current(), Some(&svc("B")));
        content.cursor_set(5);
        assert!(!content.cursor_valid());
        assert_eq!(content.cursor_get(), 2);
    }

    #[test]
    fn test_save_restore_line() {
        let (mut content, _) = build(vec![svc("A"), svc("B"), svc("C")]);
        content.cursor_move(2);
        content.cursor_save_line(4);
        content.cursor_home();

        assert!(content.cursor_restore_line(4));
        assert_eq!(content.cursor_get(), 2);
        content.cursor_home();
        assert!(content.cursor_restore_line(4));
        assert_eq!(content.cursor_get(), 2);

        content.cursor_home();
        assert!(!content.cursor_restore_line(5));
        assert_eq!(content.cursor_get(), 0);
    }

    #[test]
    fn test_restore_without_save_is_noop() {
        let (mut content, _) = build(vec![svc("A"), svc("B")]);
        content.cursor_move(1);
        content.cursor_restore();
        assert_eq!(content.cursor_get(), 1);
    }

    #[test]
    fn test_restore_follows_element_after_sort() {
        let (mut content, _) = build(vec![svc("C"), svc("A"), svc("B")]);
        content.cursor_save();
        content.sort();
        content.cursor_home();
        content.cursor_restore();
        assert_eq!(content.get_current(), Some(&svc("C")));
    }

    #[test]
    fn test_char_search_from_end_sentinel() {
        let (mut content, _) = build(vec![svc("beta"), svc("Alpha"), svc("Bravo")]);
        content.cursor_end();
        assert_eq!(content.get_next_beginning_with_char('B'), Some(0));
        assert_eq!(content.get_next_beginning_with_char('z'), None);
    }

    #[test]
    fn test_char_search_skips_leading_blanks() {
        let (mut content, _) = build(vec![svc("A"), svc("  \u{86}news")]);
        assert_eq!(content.get_next_beginning_with_char('N'), Some(1));
        content.cursor_set(1);
        assert_eq!(content.get_next_beginning_with_char('n'), Some(1));
    }

    #[test]
    fn test_marker_search_wraps() {
        let (mut content, _) = build(vec![
            svc("A"),
            ServiceReference::marker("News"),
            svc("B"),
        ]);
        content.cursor_set(2);
        assert_eq!(content.get_next_marker_pos(), Some(1));
        content.cursor_set(0);
        assert_eq!(content.get_prev_marker_pos(), Some(1));
    }

    #[test]
    fn test_marker_search_without_markers() {
        let (content, _) = build(vec![svc("A"), svc("B")]);
        assert_eq!(content.get_next_marker_pos(), None);
        assert_eq!(content.get_prev_marker_pos(), None);
    }

    #[test]
    fn test_neighbours_at_bounds() {
        let (mut content, _) = build(vec![svc("A"), svc("B")]);
        assert_eq!(content.get_prev(), None);
        assert_eq!(content.get_next(), Some(&svc("B")));
        content.cursor_end();
        assert_eq!(content.get_current(), None);
        assert_eq!(content.get_next(), None);
        assert_eq!(content.get_prev(), Some(&svc("B")));
    }

    #[test]
    fn test_set_current() {
        let (mut content, _) = build(vec![svc("A"), svc("B")]);
        assert!(content.set_current(&svc("B")));
        assert_eq!(content.cursor_get(), 1);
        assert!(!content.set_current(&svc("Z")));
        assert_eq!(content.cursor_get(), 1);
    }

    #[test]
    fn test_selectable_kinds() {
        let marker = ServiceReference::marker("News");
        let (mut content, _) = build(vec![
            marker.clone(),
            ServiceReference::group("1:134:1:", "Alternatives"),
            svc("A"),
        ]);
        assert!(!content.current_cursor_selectable());
        content.add_marked(svc("A"));
        assert!(content.current_cursor_selectable());

        content.cursor_set(1);
        assert!(!content.current_cursor_selectable());
        content.cursor_set(2);
        assert!(content.current_cursor_selectable());
        content.cursor_end();
        assert!(!content.current_cursor_selectable());
    }

    #[test]
    fn test_move_mode_drags_element() {
        let (mut content, provider) = build(vec![svc("A"), svc("B"), svc("C")]);
        assert!(content.set_current_marked(true));
        assert!(content.is_current_marked());

        assert_eq!(content.cursor_move(5), 2);
        assert_eq!(names(&content), ["B", "C", "A"]);
        assert_eq!(content.get_current(), Some(&svc("A")));

        assert_eq!(content.cursor_move(-1), -1);
        assert_eq!(names(&content), ["B", "A", "C"]);

        assert!(content.set_current_marked(false));
        assert!(!content.is_current_marked());
        assert_eq!(*provider.moves.lock(), vec![("A".to_string(), 1)]);

        content.cursor_move(1);
        assert_eq!(names(&content), ["B", "A", "C"]);
    }

    #[test]
    fn test_move_mode_needs_element() {
        let (mut content, _) = build(vec![svc("A")]);
        content.cursor_end();
        assert!(!content.set_current_marked(true));
        assert!(!content.is_current_marked());
    }
}
