//! Floating surface state - at most one of toolbar / feedback panel is open

use super::feedback::FeedbackInput;
use crate::editable::SelectionDetails;
use crate::overlay::FloatingSurfaceKind;
use crate::pointer::OutsideClickGuard;

/// Identifies which floating surface is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatingId {
    Closed,
    Toolbar,
    Feedback,
}

/// Visibility state of the floating layer for one draft surface.
///
/// Each open variant owns the tracked selection and the outside-click
/// subscription, so leaving the variant discards both.
#[derive(Debug, Default)]
pub enum FloatingState {
    #[default]
    Closed,
    Toolbar {
        details: SelectionDetails,
        listener: OutsideClickGuard,
    },
    Feedback {
        details: SelectionDetails,
        input: FeedbackInput,
        listener: OutsideClickGuard,
    },
}

impl FloatingState {
    pub fn id(&self) -> FloatingId {
        match self {
            FloatingState::Closed => FloatingId::Closed,
            FloatingState::Toolbar { .. } => FloatingId::Toolbar,
            FloatingState::Feedback { .. } => FloatingId::Feedback,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, FloatingState::Closed)
    }

    /// Positioning profile of the open surface
    pub fn kind(&self) -> Option<FloatingSurfaceKind> {
        match self {
            FloatingState::Closed => None,
            FloatingState::Toolbar { .. } => Some(FloatingSurfaceKind::Toolbar),
            FloatingState::Feedback { .. } => Some(FloatingSurfaceKind::FeedbackPanel),
        }
    }

    pub fn details(&self) -> Option<&SelectionDetails> {
        match self {
            FloatingState::Closed => None,
            FloatingState::Toolbar { details, .. } | FloatingState::Feedback { details, .. } => {
                Some(details)
            }
        }
    }

    pub fn feedback_input(&self) -> Option<&FeedbackInput> {
        match self {
            FloatingState::Feedback { input, .. } => Some(input),
            _ => None,
        }
    }

    pub fn feedback_input_mut(&mut self) -> Option<&mut FeedbackInput> {
        match self {
            FloatingState::Feedback { input, .. } => Some(input),
            _ => None,
        }
    }

    /// Close whatever is open, returning the previous state.
    /// Dropping the returned value releases its listener.
    pub fn take(&mut self) -> FloatingState {
        std::mem::take(self)
    }
}
