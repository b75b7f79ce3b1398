//! The marked set: multi-select state independent of the cursor.
//!
//! Membership is keyed by reference equality, never by list position, so
//! rebuilding or re-sorting the list cannot invalidate it. The set survives
//! root changes until the owner calls [`MarkedSet::clear`].
//!
//! # Snapshot iteration
//!
//! [`MarkedSet::query_start`] copies the current members into a single-pass
//! cursor that [`MarkedSet::query_next`] drains in reference order. Starting
//! a new query discards the previous one. Members added or removed while a
//! query is in flight are not reflected in it; callers finish or abandon a
//! pass before mutating.

use std::collections::BTreeSet;

use crate::reference::ServiceReference;

/// An ordered set of marked references with a snapshot query.
#[derive(Debug, Default)]
pub struct MarkedSet {
    members: BTreeSet<ServiceReference>,
    query: Option<std::vec::IntoIter<ServiceReference>>,
}

impl MarkedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every member and drop any in-flight query.
    pub fn clear(&mut self) {
        self.members.clear();
        self.query = None;
    }

    /// Insert `service`. Returns `false` if it was already marked.
    pub fn insert(&mut self, service: ServiceReference) -> bool {
        self.members.insert(service)
    }

    /// Remove `service`. Returns `false` if it was not marked.
    pub fn remove(&mut self, service: &ServiceReference) -> bool {
        self.members.remove(service)
    }

    #[inline]
    pub fn contains(&self, service: &ServiceReference) -> bool {
        self.members.contains(service)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Begin a snapshot pass over the current members.
    pub fn query_start(&mut self) {
        let snapshot: Vec<_> = self.members.iter().cloned().collect();
        self.query = Some(snapshot.into_iter());
    }

    /// Next member of the current pass, or `None` once exhausted or when no
    /// pass was started.
    pub fn query_next(&mut self) -> Option<ServiceReference> {
        let next = self.query.as_mut()?.next();
        if next.is_none() {
            self.query = None;
        }
        next
    }

    /// Iterate the members in reference order.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceReference> {
        self.members.iter()
    }
}
