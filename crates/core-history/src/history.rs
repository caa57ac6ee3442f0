use core_text::{MarkerId, MarkerStore};
use tracing::{debug, trace};

use crate::EditView;

/// Back/forward navigation stacks for one document.
#[derive(Debug, Default, Clone)]
pub struct History {
    previous: Vec<MarkerId>,
    next: Vec<MarkerId>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous_count(&self) -> usize {
        self.previous.len()
    }
    pub fn next_count(&self) -> usize {
        self.next.len()
    }
    pub fn is_empty(&self) -> bool {
        self.previous.is_empty() && self.next.is_empty()
    }

    /// Record `point` as the newest edit location. Drops all forward history.
    pub fn add<S: MarkerStore + ?Sized>(&mut self, store: &mut S, point: usize) {
        self.clear(store, true);
        self.previous.push(store.create_marker(point));
        trace!(target: "history", point, previous = self.previous.len(), "edit_point_added");
    }

    /// Step back to the edit recorded before the current one.
    ///
    /// The top of the previous stack is "here", not a destination, so this
    /// needs at least two entries. On success the current entry moves onto
    /// the next stack and the caret jumps to the new top.
    pub fn back<V: EditView + ?Sized>(&mut self, view: &mut V) -> bool {
        if self.previous.len() <= 1 {
            trace!(target: "history", previous = self.previous.len(), "back_unavailable");
            return false;
        }
        self.next.extend(self.previous.pop());
        trace!(target: "history", previous = self.previous.len(), next = self.next.len(), "back");
        self.jump_to_current(view);
        true
    }

    /// Undo the most recent `back`.
    pub fn forward<V: EditView + ?Sized>(&mut self, view: &mut V) -> bool {
        let Some(upcoming) = self.next.pop() else {
            trace!(target: "history", "forward_unavailable");
            return false;
        };
        self.previous.push(upcoming);
        trace!(
            target: "history",
            previous = self.previous.len(),
            next = self.next.len(),
            "forward"
        );
        self.jump_to_current(view);
        true
    }

    /// Release the forward stack, and the backward stack too unless `only_next`.
    pub fn clear<S: MarkerStore + ?Sized>(&mut self, store: &mut S, only_next: bool) {
        let released_next = self.next.len();
        for id in self.next.drain(..) {
            store.release_marker(id);
        }
        let mut released_previous = 0;
        if !only_next {
            released_previous = self.previous.len();
            for id in self.previous.drain(..) {
                store.release_marker(id);
            }
        }
        if released_next + released_previous > 0 {
            trace!(target: "history", released_next, released_previous, "history_cleared");
        }
    }

    /// Current location (top of the previous stack).
    pub fn previous<S: MarkerStore + ?Sized>(&self, store: &S) -> Option<usize> {
        self.previous.last().and_then(|id| store.marker_point(*id))
    }

    /// Location `forward` would move to.
    pub fn next<S: MarkerStore + ?Sized>(&self, store: &S) -> Option<usize> {
        self.next.last().and_then(|id| store.marker_point(*id))
    }

    fn jump_to_current<V: EditView + ?Sized>(&self, view: &mut V) {
        match self.previous(&*view) {
            Some(point) => {
                view.select_point(point);
                view.reveal(point);
            }
            None => {
                debug!(target: "history", "current_marker_missing");
            }
        }
    }
}
