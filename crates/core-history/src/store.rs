//! Document handle → `History` registry.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::History;

/// Lazily populated map of per-document histories.
///
/// Entries live from the first `get` for a document until `evict` (normally
/// driven by the host's close notification).
#[derive(Debug)]
pub struct HistoryStore<K> {
    histories: HashMap<K, History>,
}

impl<K> Default for HistoryStore<K> {
    fn default() -> Self {
        Self {
            histories: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> HistoryStore<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// History for `id`, created empty on first access.
    pub fn get(&mut self, id: K) -> &mut History {
        self.histories.entry(id).or_insert_with(|| {
            debug!(target: "history.store", ?id, "history_created");
            History::new()
        })
    }

    /// Existing history for `id` without creating one.
    pub fn peek(&self, id: K) -> Option<&History> {
        self.histories.get(&id)
    }

    pub fn contains(&self, id: K) -> bool {
        self.histories.contains_key(&id)
    }

    /// Drop the history for `id`. Its markers belong to the closing document
    /// and go away with it, so nothing is released here.
    pub fn evict(&mut self, id: K) -> Option<History> {
        let evicted = self.histories.remove(&id);
        if evicted.is_some() {
            debug!(
                target: "history.store",
                ?id,
                remaining = self.histories.len(),
                "history_evicted"
            );
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::MarkerTable;

    #[test]
    fn get_creates_once_and_returns_same_entry() {
        let mut store = HistoryStore::<u32>::new();
        assert!(store.is_empty());
        let mut markers = MarkerTable::new();
        store.get(7).add(&mut markers, 40);
        assert_eq!(store.len(), 1);
        // second lookup sees the entry recorded through the first
        assert_eq!(store.get(7).previous_count(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn documents_are_isolated() {
        let mut store = HistoryStore::<u32>::new();
        let mut markers = MarkerTable::new();
        store.get(1).add(&mut markers, 10);
        store.get(1).add(&mut markers, 500);
        assert_eq!(store.get(2).previous_count(), 0);
        assert_eq!(store.peek(1).map(History::previous_count), Some(2));
    }

    #[test]
    fn peek_does_not_create() {
        let store = HistoryStore::<u32>::new();
        assert!(store.peek(3).is_none());
        assert!(!store.contains(3));
        assert!(store.is_empty());
    }

    #[test]
    fn evict_removes_entry() {
        let mut store = HistoryStore::<u32>::new();
        store.get(5);
        assert!(store.contains(5));
        assert!(store.evict(5).is_some());
        assert!(!store.contains(5));
        assert!(store.evict(5).is_none(), "second evict is a no-op");
        // a fresh get after eviction starts from scratch
        assert!(store.get(5).is_empty());
    }
}
