//! Markdown wrapping of a selection (bold / italic).

use super::buffer::TextBufferMut;
use super::selection::{SelectionDetails, SelectionRange};

/// Inline markdown marks the toolbar can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkdownWrap {
    Bold,
    Italic,
}

impl MarkdownWrap {
    /// Delimiter placed on each side of the selection
    pub fn delimiter(self) -> &'static str {
        match self {
            MarkdownWrap::Bold => "**",
            MarkdownWrap::Italic => "*",
        }
    }

    /// Characters inserted before the selection start
    pub fn shift(self) -> usize {
        self.delimiter().len()
    }
}

/// Result of wrapping a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEdit {
    /// Selection to restore on the surface after the splice
    pub selection: SelectionRange,
    /// The trimmed text that was wrapped
    pub wrapped_text: String,
}

/// Splice `delim + trim(selection) + delim` over the selected range.
///
/// The restored selection is the original range shifted by one delimiter
/// length, clamped to the new buffer length. Already-wrapped text is wrapped
/// again; no delimiter detection is done.
pub fn apply_wrap<B: TextBufferMut + ?Sized>(
    buffer: &mut B,
    details: &SelectionDetails,
    wrap: MarkdownWrap,
) -> FormatEdit {
    let delim = wrap.delimiter();
    let range = details.range().clamped(buffer.len_chars());
    let wrapped = format!("{delim}{}{delim}", details.selected_text());

    buffer.replace(range.start..range.end, &wrapped);

    let selection = range.shifted(wrap.shift()).clamped(buffer.len_chars());
    tracing::debug!(
        ?wrap,
        start = range.start,
        end = range.end,
        new_start = selection.start,
        new_end = selection.end,
        "applied markdown wrap"
    );

    FormatEdit {
        selection,
        wrapped_text: details.selected_text().to_string(),
    }
}
