//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::measure::FontSpec;
use crate::overlay::SurfaceRect;
use crate::pointer::PointerTarget;

/// Draft surface messages (typing, selection, layout)
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceMsg {
    /// Whole-value change from the host text-area (onChange)
    SetText(String),
    /// Keystroke: replace the current selection with text
    InsertText(String),
    /// Native selection moved (no toolbar decision yet)
    SetSelection { start: usize, end: usize },
    /// Selection finished (pointer release, shift-arrow key up).
    /// Offsets are read straight from the surface, not a document-wide selection.
    SelectionCompleted { start: usize, end: usize },
    /// Escape pressed on the surface
    Escape,
    /// Surface bounds changed (scroll, resize, growth)
    SetBounds(SurfaceRect),
    /// Computed font of the surface changed
    SetFont(FontSpec),
}

/// Floating toolbar actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarMsg {
    Bold,
    Italic,
    AiRevise,
}

/// Feedback panel messages
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackMsg {
    /// Whole-value change of the panel input
    SetText(String),
    /// Append typed text
    InsertText(String),
    /// Backspace
    DeleteBackward,
    /// Enter key; Shift+Enter inserts a newline instead of submitting
    Enter { shift: bool },
    /// Escape key
    Escape,
    /// Explicit submit
    Submit,
    /// Explicit cancel
    Cancel,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Surface(SurfaceMsg),
    Toolbar(ToolbarMsg),
    Feedback(FeedbackMsg),
    /// Global pointer-down, delivered only while a floating surface listens
    PointerDown(PointerTarget),
}
