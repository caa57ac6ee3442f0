//! Per-document edit-location history.
//!
//! - `History` keeps two stacks of marker handles. The top of `previous` is
//!   the current (last recorded) edit location; `next` holds locations left
//!   behind by `back` and is discarded by any new `add`.
//! - `HistoryStore` maps a document handle to its `History`, creating entries
//!   lazily. It is a plain value owned by the integration layer so tests can
//!   build isolated instances.
//! - `CapturePolicy` throttles recording by line distance so a burst of
//!   typing at one spot yields a single entry.
//!
//! Points are character offsets pinned through the document's `MarkerStore`,
//! so recorded locations follow the text as lines are inserted or removed
//! above them. Navigation never fails with an error: an empty stack is a
//! `false` return.

pub mod capture;
pub mod history;
pub mod store;

pub use capture::{CapturePolicy, DEFAULT_LINE_THRESHOLD};
pub use history::History;
pub use store::HistoryStore;

use core_text::MarkerStore;

/// Document-side capabilities that history navigation relies on.
pub trait EditView: MarkerStore {
    /// Zero-based line containing `point`.
    fn line_of(&self, point: usize) -> usize;
    /// Replace the selection with a single caret at `point`.
    fn select_point(&mut self, point: usize);
    /// Scroll the viewport so `point` is visible.
    fn reveal(&mut self, point: usize);
}
