//! Selection types for the composer surface.

use super::buffer::TextBuffer;

/// A native text-area selection: character offsets, `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    /// Build a range from two offsets in either order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Create a collapsed selection (caret with no selection)
    pub fn collapsed(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clamp both ends to `len`
    pub fn clamped(self, len: usize) -> Self {
        Self {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }

    /// Shift both ends right by `delta`
    pub fn shifted(self, delta: usize) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

impl From<SelectionRange> for (usize, usize) {
    fn from(range: SelectionRange) -> Self {
        (range.start, range.end)
    }
}

/// A completed, non-empty selection on the draft surface.
///
/// `selected_text` is the trimmed content of `range` at the moment the
/// selection completed. It is derived once here and never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionDetails {
    range: SelectionRange,
    selected_text: String,
}

impl SelectionDetails {
    pub fn range(&self) -> SelectionRange {
        self.range
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn selected_text(&self) -> &str {
        &self.selected_text
    }
}

/// Strip surrounding whitespace and byte-order marks (U+FEFF), the set a
/// browser's `String.prototype.trim` removes.
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Read the surface selection and derive [`SelectionDetails`].
///
/// Reversed offsets are normalized and both ends are clamped to the buffer.
/// Returns `None` for a collapsed selection or one that trims to nothing.
pub fn track_selection<B: TextBuffer + ?Sized>(
    buffer: &B,
    start: usize,
    end: usize,
) -> Option<SelectionDetails> {
    let range = SelectionRange::new(start, end).clamped(buffer.len_chars());
    if range.is_empty() {
        return None;
    }

    let selected_text = trim_text(&buffer.slice(range.start..range.end)).to_string();
    if selected_text.is_empty() {
        return None;
    }

    Some(SelectionDetails {
        range,
        selected_text,
    })
}
