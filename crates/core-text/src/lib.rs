//! Rope-based text buffer abstraction.
//!
//! Offsets handed across crate boundaries are character offsets into the
//! rope. `Position` (line, byte) is the human-facing form used for cursor
//! reporting; conversions clamp out-of-range input instead of panicking.

use anyhow::Result;
use ropey::Rope;
use std::ops::Range;

pub mod marker;

pub use marker::{MarkerId, MarkerStore, MarkerTable};

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

/// A position inside a buffer expressed as (line index, byte offset within that line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.byte = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.byte > max_len {
            self.byte = max_len;
        }
    }
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(name: impl Into<String>, content: &str) -> Result<Self> {
        Ok(Self {
            rope: Rope::from_str(content),
            name: name.into(),
        })
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Return the requested line as an owned `String` (including trailing newline if present).
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx < self.rope.len_lines() {
            Some(self.rope.line(idx).to_string())
        } else {
            None
        }
    }

    /// Byte length of a line (excluding any newline) for clamping purposes.
    pub fn line_byte_len(&self, idx: usize) -> usize {
        if idx >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(idx);
        let len = line.len_bytes();
        if len > 0 && line.char(line.len_chars() - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Total number of characters; also the largest valid offset.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn clamp_offset(&self, offset: usize) -> usize {
        offset.min(self.rope.len_chars())
    }

    /// Zero-based line containing `offset` (clamped to the end of the buffer).
    pub fn line_of(&self, offset: usize) -> usize {
        self.rope.char_to_line(self.clamp_offset(offset))
    }

    /// Convert a character offset into a (line, byte) position.
    pub fn position_of(&self, offset: usize) -> Position {
        let offset = self.clamp_offset(offset);
        let line = self.rope.char_to_line(offset);
        let line_start_byte = self.rope.char_to_byte(self.rope.line_to_char(line));
        Position {
            line,
            byte: self.rope.char_to_byte(offset) - line_start_byte,
        }
    }

    /// Convert a (line, byte) position into a character offset. Out-of-range
    /// lines and bytes clamp to the nearest valid location.
    pub fn offset_of(&self, pos: Position) -> usize {
        let mut pos = pos;
        pos.clamp_to(self.line_count(), |l| self.line_byte_len(l));
        let line_start_byte = self.rope.char_to_byte(self.rope.line_to_char(pos.line));
        // byte_to_char rounds down into the containing char for mid-char bytes.
        self.rope.byte_to_char(line_start_byte + pos.byte)
    }

    /// Insert `text` at character `offset` (clamped). Returns the number of
    /// characters inserted.
    pub fn insert(&mut self, offset: usize, text: &str) -> usize {
        let at = self.clamp_offset(offset);
        self.rope.insert(at, text);
        text.chars().count()
    }

    /// Remove the character range `[start,end)` (clamped) and return the removed text.
    pub fn remove(&mut self, range: Range<usize>) -> String {
        let start = self.clamp_offset(range.start);
        let end = self.clamp_offset(range.end);
        if start >= end {
            return String::new();
        }
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        removed
    }
}
