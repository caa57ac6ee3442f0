#![allow(dead_code)] // Shared across the integration test binaries; each uses a subset.

use core_history::EditView;
use core_text::{MarkerId, MarkerStore, MarkerTable};

/// Characters per line in the fixed-width fake document.
pub const LINE_WIDTH: usize = 100;

pub fn at_line(line: usize) -> usize {
    line * LINE_WIDTH
}

/// View whose markers never move unless a test shifts them explicitly.
#[derive(Default)]
pub struct FixedView {
    pub markers: MarkerTable,
    pub cursor: Option<usize>,
    pub revealed: Vec<usize>,
}

impl FixedView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarkerStore for FixedView {
    fn create_marker(&mut self, point: usize) -> MarkerId {
        self.markers.create_marker(point)
    }
    fn marker_point(&self, id: MarkerId) -> Option<usize> {
        self.markers.marker_point(id)
    }
    fn release_marker(&mut self, id: MarkerId) {
        self.markers.release_marker(id)
    }
}

impl EditView for FixedView {
    fn line_of(&self, point: usize) -> usize {
        point / LINE_WIDTH
    }
    fn select_point(&mut self, point: usize) {
        self.cursor = Some(point);
    }
    fn reveal(&mut self, point: usize) {
        self.revealed.push(point);
    }
}
