//! Text buffer traits and implementations for the composer surfaces.
//!
//! Provides `TextBuffer` (read-only) and `TextBufferMut` (read-write) traits
//! that abstract over the draft surface (Rope) and the small feedback input
//! (String). All offsets are character offsets, the way a text-area reports
//! `selectionStart` / `selectionEnd`.

use ropey::Rope;
use std::borrow::Cow;
use std::ops::Range;

/// Read-only view into a text buffer.
pub trait TextBuffer {
    /// Total length in characters
    fn len_chars(&self) -> usize;

    /// Check if buffer is empty
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Number of `\n`-separated lines (always >= 1)
    fn line_count(&self) -> usize;

    /// Character at offset, None if out of bounds
    fn char_at(&self, offset: usize) -> Option<char>;

    /// Get slice of text as String (by character indices, clamped)
    fn slice(&self, range: Range<usize>) -> String;

    /// Get full content
    fn content(&self) -> Cow<'_, str>;
}

/// Mutable buffer operations. Extends TextBuffer.
pub trait TextBufferMut: TextBuffer {
    /// Insert text at character offset
    fn insert(&mut self, offset: usize, text: &str);

    /// Remove text in character range
    fn remove(&mut self, range: Range<usize>);

    /// Replace text in range with new text
    fn replace(&mut self, range: Range<usize>, text: &str) {
        self.remove(range.clone());
        self.insert(range.start, text);
    }

    /// Clear all content
    fn clear(&mut self) {
        let len = self.len_chars();
        if len > 0 {
            self.remove(0..len);
        }
    }

    /// Set content, replacing everything
    fn set_content(&mut self, text: &str) {
        self.clear();
        self.insert(0, text);
    }
}

// =============================================================================
// StringBuffer - for the feedback panel input
// =============================================================================

/// TextBuffer implementation wrapping String.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBuffer {
    text: String,
}

impl StringBuffer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    pub fn from_text(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

impl TextBuffer for StringBuffer {
    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.chars().nth(offset)
    }

    fn slice(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start >= end {
            return String::new();
        }
        self.text.chars().skip(start).take(end - start).collect()
    }

    fn content(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
}

impl TextBufferMut for StringBuffer {
    fn insert(&mut self, offset: usize, text: &str) {
        let byte_offset = self.char_to_byte(offset);
        self.text.insert_str(byte_offset, text);
    }

    fn remove(&mut self, range: Range<usize>) {
        let start_byte = self.char_to_byte(range.start);
        let end_byte = self.char_to_byte(range.end);
        if start_byte < end_byte {
            self.text.replace_range(start_byte..end_byte, "");
        }
    }

    fn clear(&mut self) {
        self.text.clear();
    }
}

// =============================================================================
// RopeBuffer - for the draft surface
// =============================================================================

/// TextBuffer implementation wrapping ropey::Rope.
/// Backs the multi-line draft surface, which can hold pasted transcripts.
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }
}

impl TextBuffer for RopeBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn line_count(&self) -> usize {
        // ropey also breaks on \r and unicode separators; the surface only
        // wraps on \n
        self.rope.chars().filter(|&c| c == '\n').count() + 1
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.get_char(offset)
    }

    fn slice(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    fn content(&self) -> Cow<'_, str> {
        Cow::Owned(self.rope.to_string())
    }
}

impl TextBufferMut for RopeBuffer {
    fn insert(&mut self, offset: usize, text: &str) {
        let clamped = offset.min(self.len_chars());
        self.rope.insert(clamped, text);
    }

    fn remove(&mut self, range: Range<usize>) {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }
}
