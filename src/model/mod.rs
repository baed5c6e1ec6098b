//! Model module - composer state
//!
//! [`ComposerModel`] owns one draft surface: its text, its native selection,
//! the floating layer above it and everything needed to position that layer.

pub mod feedback;
pub mod floating;

use std::cell::RefCell;

pub use feedback::FeedbackInput;
pub use floating::{FloatingId, FloatingState};

use crate::config::{ComposerConfig, FeedbackInputConfig};
use crate::editable::{RopeBuffer, SelectionDetails, SelectionRange, TextBuffer};
use crate::measure::{FontSpec, TextMeasurer};
use crate::overlay::{AnchorCache, AnchorPosition, FloatingSurfaceKind, PositionConfig, SurfaceRect};
use crate::pointer::PointerHub;

/// The draft split for highlighted-selection rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSegments {
    pub before: String,
    pub selected: String,
    pub after: String,
}

/// A placed floating surface: which one and where to draw it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingPlacement {
    pub kind: FloatingSurfaceKind,
    /// Estimated anchor below the selection line
    pub anchor: AnchorPosition,
    /// Anchor lifted by the configured offset; the surface's top-left corner
    pub origin: AnchorPosition,
}

/// State of one draft surface and its floating layer
pub struct ComposerModel {
    pub buffer: RopeBuffer,
    /// Native selection of the surface
    pub selection: SelectionRange,
    pub floating: FloatingState,
    pub surface_rect: SurfaceRect,
    pub font: FontSpec,
    pub positioning: PositionConfig,
    pub feedback_sizing: FeedbackInputConfig,
    pub pointer: PointerHub,
    measurer: Option<Box<dyn TextMeasurer>>,
    anchor_cache: RefCell<AnchorCache>,
}

impl std::fmt::Debug for ComposerModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposerModel")
            .field("len_chars", &self.buffer.len_chars())
            .field("selection", &self.selection)
            .field("floating", &self.floating)
            .field("surface_rect", &self.surface_rect)
            .field("font", &self.font)
            .field("has_measurer", &self.measurer.is_some())
            .finish()
    }
}

impl ComposerModel {
    /// Create a composer over `text` with the caret at the end
    pub fn new(text: &str, config: &ComposerConfig) -> Self {
        let buffer = RopeBuffer::from_text(text);
        let caret = buffer.len_chars();
        Self {
            buffer,
            selection: SelectionRange::collapsed(caret),
            floating: FloatingState::Closed,
            surface_rect: SurfaceRect::default(),
            font: config.font.spec.clone(),
            positioning: config.positioning,
            feedback_sizing: config.feedback_input,
            pointer: PointerHub::new(),
            measurer: None,
            anchor_cache: RefCell::new(AnchorCache::new()),
        }
    }

    /// Attach a text measurer (builder pattern)
    pub fn with_measurer(mut self, measurer: Box<dyn TextMeasurer>) -> Self {
        self.measurer = Some(measurer);
        self.anchor_cache.get_mut().invalidate();
        self
    }

    /// Set the surface bounds (builder pattern)
    pub fn with_surface_rect(mut self, rect: SurfaceRect) -> Self {
        self.surface_rect = rect;
        self
    }

    pub fn set_measurer(&mut self, measurer: Option<Box<dyn TextMeasurer>>) {
        self.measurer = measurer;
        self.invalidate_anchor();
    }

    pub fn measurer(&self) -> Option<&dyn TextMeasurer> {
        self.measurer.as_deref()
    }

    pub fn text(&self) -> String {
        self.buffer.content().into_owned()
    }

    pub fn visibility(&self) -> FloatingId {
        self.floating.id()
    }

    pub fn selection_details(&self) -> Option<&SelectionDetails> {
        self.floating.details()
    }

    pub fn feedback_input(&self) -> Option<&FeedbackInput> {
        self.floating.feedback_input()
    }

    /// Height the feedback input grows to, if the panel is open
    pub fn feedback_input_height(&self) -> Option<f32> {
        self.feedback_input()
            .map(|input| input.height(&self.feedback_sizing))
    }

    /// Highlighted-selection render mode: the draft split around the
    /// selection. Active exactly while the feedback panel is open.
    pub fn highlight(&self) -> Option<HighlightSegments> {
        let FloatingState::Feedback { details, .. } = &self.floating else {
            return None;
        };
        let len = self.buffer.len_chars();
        let range = details.range().clamped(len);
        Some(HighlightSegments {
            before: self.buffer.slice(0..range.start),
            selected: self.buffer.slice(range.start..range.end),
            after: self.buffer.slice(range.end..len),
        })
    }

    pub fn is_highlighting(&self) -> bool {
        self.floating.id() == FloatingId::Feedback
    }

    /// Placement of the open floating surface, memoized on the selection
    pub fn floating_placement(&self) -> Option<FloatingPlacement> {
        let kind = self.floating.kind()?;
        let details = self.floating.details()?;
        let anchor = self.anchor_cache.borrow_mut().get_or_compute(
            &self.buffer,
            details,
            self.surface_rect,
            &self.font,
            self.measurer(),
            kind,
            &self.positioning,
        );
        Some(FloatingPlacement {
            kind,
            anchor,
            origin: anchor.lifted(self.positioning.lift),
        })
    }

    /// Open the toolbar for a tracked selection, replacing any open surface
    pub fn open_toolbar(&mut self, details: SelectionDetails) {
        let listener = self.pointer.subscribe();
        self.floating = FloatingState::Toolbar { details, listener };
        self.invalidate_anchor();
        tracing::debug!(target: "floating", "toolbar opened");
    }

    /// Swap the toolbar for the feedback panel on the same selection.
    /// Returns false when no toolbar was open.
    pub fn open_feedback(&mut self) -> bool {
        match self.floating.take() {
            FloatingState::Toolbar { details, listener } => {
                // Release the toolbar's subscription before the panel takes its own
                drop(listener);
                let listener = self.pointer.subscribe();
                self.floating = FloatingState::Feedback {
                    details,
                    input: FeedbackInput::new(),
                    listener,
                };
                self.invalidate_anchor();
                tracing::debug!(target: "floating", "feedback panel opened");
                true
            }
            other => {
                self.floating = other;
                false
            }
        }
    }

    /// Close any floating surface; returns what was open
    pub fn close_floating(&mut self) -> FloatingId {
        let previous = self.floating.take();
        let id = previous.id();
        if id != FloatingId::Closed {
            tracing::debug!(target: "floating", ?id, "floating surface closed");
        }
        id
    }

    pub(crate) fn invalidate_anchor(&self) {
        self.anchor_cache.borrow_mut().invalidate();
    }

    /// Verify the composer invariants, naming the message that broke them.
    ///
    /// - the native selection lies within the buffer
    /// - a tracked selection lies within the buffer and is non-empty
    /// - the outside-click hub is listening whenever a surface is open
    ///
    /// Panics in debug builds if any invariant is violated.
    #[cfg(debug_assertions)]
    pub fn assert_invariants_with_context(&self, context: &str) {
        let len = self.buffer.len_chars();
        assert!(
            self.selection.start <= self.selection.end && self.selection.end <= len,
            "[{}] selection {:?} outside buffer of {} chars",
            context,
            self.selection,
            len
        );

        if let Some(details) = self.floating.details() {
            assert!(
                details.end() <= len && !details.selected_text().is_empty(),
                "[{}] tracked selection {:?} invalid for buffer of {} chars",
                context,
                details.range(),
                len
            );
        }

        if self.floating.is_open() {
            assert!(
                self.pointer.is_listening(),
                "[{}] {:?} open without an outside-click listener",
                context,
                self.floating.id()
            );
        }
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants_with_context(&self, _context: &str) {}
}
