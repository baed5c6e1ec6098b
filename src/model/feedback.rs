//! Feedback panel input state

use crate::config::FeedbackInputConfig;
use crate::editable::{trim_text, StringBuffer, TextBuffer, TextBufferMut};

/// The auto-growing instruction input of the feedback panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackInput {
    buffer: StringBuffer,
}

impl FeedbackInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_content(text);
    }

    /// Append typed text at the end of the input
    pub fn insert_text(&mut self, text: &str) {
        let end = self.buffer.len_chars();
        self.buffer.insert(end, text);
    }

    pub fn insert_newline(&mut self) {
        self.insert_text("\n");
    }

    pub fn delete_backward(&mut self) {
        let len = self.buffer.len_chars();
        if len > 0 {
            self.buffer.remove(len - 1..len);
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Whether a submit would be accepted
    pub fn is_submittable(&self) -> bool {
        !trim_text(self.buffer.as_str()).is_empty()
    }

    /// Visual rows the input needs (hard line breaks only)
    pub fn rows(&self) -> usize {
        self.buffer.line_count().max(1)
    }

    /// Height the input grows to for its current content
    pub fn height(&self, config: &FeedbackInputConfig) -> f32 {
        let content = self.rows() as f32 * config.line_height + config.vertical_padding;
        content.max(config.min_height)
    }
}
