//! Line-proximity throttling for edit capture.
//!
//! Only line distance counts. Column and the kind of edit (insert vs delete)
//! are ignored.

use tracing::{debug, trace};

use crate::{EditView, History};

/// Lines an edit must move away from the last recorded location before it
/// is recorded as a new history entry.
pub const DEFAULT_LINE_THRESHOLD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturePolicy {
    line_threshold: usize,
}

impl Default for CapturePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_THRESHOLD)
    }
}

impl CapturePolicy {
    pub const fn new(line_threshold: usize) -> Self {
        Self { line_threshold }
    }

    pub const fn line_threshold(&self) -> usize {
        self.line_threshold
    }

    /// True when `edit_line` is strictly more than the threshold away from
    /// `last_line`. No last line means no history yet, which always records.
    pub fn should_record(&self, edit_line: usize, last_line: Option<usize>) -> bool {
        match last_line {
            None => true,
            Some(last) => edit_line.abs_diff(last) > self.line_threshold,
        }
    }

    /// Record `edit_point` in `history` if it is far enough from the current
    /// entry. Returns whether an entry was added.
    pub fn capture<V: EditView + ?Sized>(
        &self,
        history: &mut History,
        view: &mut V,
        edit_point: usize,
    ) -> bool {
        let edit_line = view.line_of(edit_point);
        let last_line = history.previous(&*view).map(|p| view.line_of(p));
        if !self.should_record(edit_line, last_line) {
            trace!(
                target: "history.capture",
                edit_line,
                last_line,
                threshold = self.line_threshold,
                "edit_within_proximity"
            );
            return false;
        }
        history.add(view, edit_point);
        debug!(
            target: "history.capture",
            edit_line,
            last_line,
            entries = history.previous_count(),
            "edit_recorded"
        );
        true
    }
}
