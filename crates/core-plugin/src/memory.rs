//! In-memory editor host.
//!
//! Documents are rope buffers with a single caret, a vertical viewport and a
//! `MarkerTable` that is kept in step with every insertion and deletion, so
//! recorded history locations follow the text they were recorded at.

use std::collections::BTreeMap;

use core_events::DocumentId;
use core_history::EditView;
use core_text::{Buffer, MarkerId, MarkerStore, MarkerTable, Position};
use thiserror::Error;
use tracing::debug;

use crate::{EditorHost, HostDocument};

/// Rows shown when a host is built with `MemoryHost::default()`.
pub const DEFAULT_VIEWPORT_ROWS: usize = 24;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("document already open: {0}")]
    AlreadyOpen(String),
    #[error("no such document: {0}")]
    UnknownDocument(DocumentId),
    #[error("cannot load document {name}: {reason}")]
    Load { name: String, reason: String },
}

/// Visible vertical window into a document.
///
/// * `first_line` is the index of the topmost visible line.
/// * `height` is the number of visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub first_line: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(first_line: usize, height: usize) -> Self {
        Self { first_line, height }
    }

    pub fn contains(&self, line: usize) -> bool {
        line >= self.first_line && line < self.first_line + self.height
    }

    /// Scroll the minimum amount that makes `cursor_line` visible.
    pub fn clamp_cursor_into_view(&mut self, cursor_line: usize) {
        if self.height == 0 || cursor_line < self.first_line {
            self.first_line = cursor_line;
        } else if cursor_line >= self.first_line + self.height {
            self.first_line = cursor_line + 1 - self.height;
        }
    }
}

pub struct MemoryDocument {
    buffer: Buffer,
    markers: MarkerTable,
    cursor: usize,
    viewport: Viewport,
    scratch: bool,
    status: BTreeMap<String, String>,
}

impl MemoryDocument {
    pub fn new(buffer: Buffer, scratch: bool, viewport_rows: usize) -> Self {
        Self {
            buffer,
            markers: MarkerTable::new(),
            cursor: 0,
            viewport: Viewport::new(0, viewport_rows),
            scratch,
            status: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.buffer.name
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_position(&self) -> Position {
        self.buffer.position_of(self.cursor)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn status(&self, key: &str) -> Option<&str> {
        self.status.get(key).map(String::as_str)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Place the caret at `pos` (clamped) and scroll it into view.
    pub fn move_cursor_to(&mut self, pos: Position) {
        let offset = self.buffer.offset_of(pos);
        self.select_point(offset);
        self.reveal(offset);
    }

    /// Type `text` at the caret; the caret ends after the inserted text.
    pub fn insert_at_cursor(&mut self, text: &str) {
        let at = self.cursor;
        let inserted = self.buffer.insert(at, text);
        self.markers.on_insert(at, inserted);
        self.cursor = at + inserted;
        self.viewport
            .clamp_cursor_into_view(self.buffer.line_of(self.cursor));
    }

    /// Delete up to `count` characters before the caret. Returns the removed text.
    pub fn backspace(&mut self, count: usize) -> String {
        let end = self.cursor;
        let start = end.saturating_sub(count);
        let removed = self.buffer.remove(start..end);
        self.markers.on_delete(start..end);
        self.cursor = start;
        self.viewport
            .clamp_cursor_into_view(self.buffer.line_of(self.cursor));
        removed
    }
}

impl MarkerStore for MemoryDocument {
    fn create_marker(&mut self, point: usize) -> MarkerId {
        self.markers.create_marker(self.buffer.clamp_offset(point))
    }
    fn marker_point(&self, id: MarkerId) -> Option<usize> {
        self.markers.marker_point(id)
    }
    fn release_marker(&mut self, id: MarkerId) {
        self.markers.release_marker(id)
    }
}

impl EditView for MemoryDocument {
    fn line_of(&self, point: usize) -> usize {
        self.buffer.line_of(point)
    }
    fn select_point(&mut self, point: usize) {
        self.cursor = self.buffer.clamp_offset(point);
    }
    fn reveal(&mut self, point: usize) {
        let line = self.buffer.line_of(point);
        self.viewport.clamp_cursor_into_view(line);
    }
}

impl HostDocument for MemoryDocument {
    fn primary_cursor(&self) -> usize {
        self.cursor
    }
    fn is_scratch(&self) -> bool {
        self.scratch
    }
    fn set_status(&mut self, key: &str, text: &str) {
        self.status.insert(key.to_string(), text.to_string());
    }
    fn erase_status(&mut self, key: &str) {
        self.status.remove(key);
    }
}

pub struct MemoryHost {
    documents: BTreeMap<DocumentId, MemoryDocument>,
    active: Option<DocumentId>,
    next_id: u64,
    viewport_rows: usize,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_ROWS)
    }
}

impl MemoryHost {
    pub fn new(viewport_rows: usize) -> Self {
        Self {
            documents: BTreeMap::new(),
            active: None,
            next_id: 1,
            viewport_rows,
        }
    }

    /// Open a document named `name` holding `content` and make it active.
    pub fn open(
        &mut self,
        name: &str,
        content: &str,
        scratch: bool,
    ) -> Result<DocumentId, HostError> {
        if self.find(name).is_some() {
            return Err(HostError::AlreadyOpen(name.to_string()));
        }
        let buffer = Buffer::from_str(name, content).map_err(|e| HostError::Load {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        self.documents
            .insert(id, MemoryDocument::new(buffer, scratch, self.viewport_rows));
        self.active = Some(id);
        debug!(target: "host.memory", %id, name, scratch, "document_opened");
        Ok(id)
    }

    pub fn find(&self, name: &str) -> Option<DocumentId> {
        self.documents
            .iter()
            .find(|(_, doc)| doc.name() == name)
            .map(|(id, _)| *id)
    }

    pub fn focus(&mut self, id: DocumentId) -> Result<(), HostError> {
        if !self.documents.contains_key(&id) {
            return Err(HostError::UnknownDocument(id));
        }
        self.active = Some(id);
        Ok(())
    }

    /// Close `id`. Focus falls back to the most recently opened survivor.
    pub fn close(&mut self, id: DocumentId) -> Result<MemoryDocument, HostError> {
        let doc = self
            .documents
            .remove(&id)
            .ok_or(HostError::UnknownDocument(id))?;
        if self.active == Some(id) {
            self.active = self.documents.keys().next_back().copied();
        }
        debug!(target: "host.memory", %id, remaining = self.documents.len(), "document_closed");
        Ok(doc)
    }

    pub fn document(&self, id: DocumentId) -> Option<&MemoryDocument> {
        self.documents.get(&id)
    }

    /// Open documents in opening order.
    pub fn documents(&self) -> impl Iterator<Item = (DocumentId, &MemoryDocument)> {
        self.documents.iter().map(|(id, doc)| (*id, doc))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl EditorHost for MemoryHost {
    type Document = MemoryDocument;

    fn name(&self) -> &'static str {
        "memory-host"
    }

    fn active_document(&self) -> Option<DocumentId> {
        self.active
    }

    fn document_mut(&mut self, id: DocumentId) -> Option<&mut MemoryDocument> {
        self.documents.get_mut(&id)
    }
}
