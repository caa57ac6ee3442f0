//! Live-adjusting point markers.
//!
//! A marker pins a character offset inside a document. The document owning a
//! `MarkerTable` forwards every insertion and deletion to it so each marker
//! keeps pointing at the same text while content shifts around it.
//!
//! Gravity:
//! * Insertion at or before a marker's point shifts it right, so a marker
//!   left at the caret keeps following text typed there.
//! * Deletion collapses markers inside the removed range to its start and
//!   shifts markers at or past the range end left by the removed length.

use std::collections::HashMap;
use std::ops::Range;

/// Opaque handle to a marker; only meaningful for the store that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

/// Capability to store labeled points that survive surrounding edits.
pub trait MarkerStore {
    /// Pin `point` and return a handle to it.
    fn create_marker(&mut self, point: usize) -> MarkerId;
    /// Current (possibly adjusted) point, or `None` once released.
    fn marker_point(&self, id: MarkerId) -> Option<usize>;
    /// Forget the marker. Releasing an unknown handle is a no-op.
    fn release_marker(&mut self, id: MarkerId);
}

/// Reference `MarkerStore` that adjusts points on insert/delete.
#[derive(Debug, Default, Clone)]
pub struct MarkerTable {
    next_id: u64,
    points: HashMap<MarkerId, usize>,
}

impl MarkerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live markers.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Account for `len` characters inserted at `at`.
    pub fn on_insert(&mut self, at: usize, len: usize) {
        if len == 0 {
            return;
        }
        for point in self.points.values_mut() {
            if *point >= at {
                *point += len;
            }
        }
    }

    /// Account for the character range `range` being removed.
    pub fn on_delete(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        let removed = range.end - range.start;
        for point in self.points.values_mut() {
            if *point >= range.end {
                *point -= removed;
            } else if *point > range.start {
                *point = range.start;
            }
        }
    }
}

impl MarkerStore for MarkerTable {
    fn create_marker(&mut self, point: usize) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.points.insert(id, point);
        id
    }

    fn marker_point(&self, id: MarkerId) -> Option<usize> {
        self.points.get(&id).copied()
    }

    fn release_marker(&mut self, id: MarkerId) {
        self.points.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_get_release() {
        let mut t = MarkerTable::new();
        let a = t.create_marker(3);
        let b = t.create_marker(3);
        assert_ne!(a, b, "handles are unique even for equal points");
        assert_eq!(t.marker_point(a), Some(3));
        t.release_marker(a);
        assert_eq!(t.marker_point(a), None);
        assert_eq!(t.marker_point(b), Some(3));
        t.release_marker(a); // double release tolerated
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn insert_shifts_markers_at_or_after_the_insertion() {
        let mut t = MarkerTable::new();
        let before = t.create_marker(2);
        let at = t.create_marker(5);
        let after = t.create_marker(9);
        t.on_insert(5, 4);
        assert_eq!(t.marker_point(before), Some(2));
        assert_eq!(t.marker_point(at), Some(9));
        assert_eq!(t.marker_point(after), Some(13));
    }

    #[test]
    fn delete_collapses_inside_and_shifts_after() {
        let mut t = MarkerTable::new();
        let before = t.create_marker(1);
        let start = t.create_marker(4);
        let inside = t.create_marker(6);
        let end = t.create_marker(8);
        let after = t.create_marker(20);
        t.on_delete(4..8);
        assert_eq!(t.marker_point(before), Some(1));
        assert_eq!(t.marker_point(start), Some(4));
        assert_eq!(t.marker_point(inside), Some(4));
        assert_eq!(t.marker_point(end), Some(4));
        assert_eq!(t.marker_point(after), Some(16));
    }

    #[test]
    fn marker_at_caret_follows_a_typing_run() {
        let mut t = MarkerTable::new();
        let m = t.create_marker(1);
        t.on_insert(1, 1);
        t.on_insert(2, 1);
        assert_eq!(t.marker_point(m), Some(3));
    }

    #[test]
    fn empty_edits_are_noops() {
        let mut t = MarkerTable::new();
        let m = t.create_marker(7);
        t.on_insert(0, 0);
        t.on_delete(3..3);
        assert_eq!(t.marker_point(m), Some(7));
    }
}
