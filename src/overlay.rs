//! Selection-anchored positioning for floating surfaces
//!
//! Floating surfaces (the format toolbar and the AI feedback panel) live in a
//! layer above the draft surface and are placed by absolute screen
//! coordinates. Their anchor is estimated from the line on which the
//! selection ends, the rendered width of that line, and the surface bounds.

use serde::{Deserialize, Serialize};

use crate::editable::{SelectionDetails, TextBuffer};
use crate::measure::{FontSpec, TextMeasurer};

/// Tunable positioning constants, in pixels unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionConfig {
    /// Line height of the draft surface
    pub line_height: f32,
    /// Inner padding of the draft surface
    pub padding: f32,
    /// Lines of clearance below the selection line (multiplier of line height)
    pub clearance_lines: f32,
    /// Upward shift applied when the surface is rendered
    pub lift: f32,
    /// Layout width of the feedback panel
    pub feedback_panel_width: f32,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            line_height: 24.0,
            padding: 12.0,
            clearance_lines: 3.5,
            lift: 50.0,
            feedback_panel_width: 750.0,
        }
    }
}

/// Which floating surface is being positioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatingSurfaceKind {
    /// Narrow, grows rightward from the end of the selection
    Toolbar,
    /// Wide, right edge aligned to the end of the selection, clamped to the surface
    FeedbackPanel,
}

/// Screen-space bounds of the draft surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Top-left corner of a floating surface in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorPosition {
    pub x: f32,
    pub y: f32,
}

impl AnchorPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin at which the surface is actually drawn
    pub fn lifted(self, lift: f32) -> Self {
        Self {
            x: self.x,
            y: self.y - lift,
        }
    }
}

/// The line containing the end of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndLine {
    /// Zero-based line index
    pub index: usize,
    /// Text of that line from its start up to the (effective) selection end
    pub text: String,
}

/// Locate the selection-end line.
///
/// A selection ending right after a `\n` (triple-click line selection) is
/// treated as ending before it, so the line with the visible selected text
/// is used rather than the following blank line.
pub fn end_line<B: TextBuffer + ?Sized>(buffer: &B, end: usize) -> EndLine {
    let end = end.min(buffer.len_chars());
    let effective_end = if end > 0 && buffer.char_at(end - 1) == Some('\n') {
        end - 1
    } else {
        end
    };

    let prefix = buffer.slice(0..effective_end);
    let mut segments = prefix.split('\n');
    let mut index = 0;
    let mut text = segments.next().unwrap_or_default();
    for segment in segments {
        index += 1;
        text = segment;
    }

    EndLine {
        index,
        text: text.to_string(),
    }
}

/// Estimate where a floating surface should be anchored for a selection.
///
/// Without a measurer the anchor falls back to the surface's inner left
/// edge; the feedback panel is still clamped. Never fails.
pub fn estimate_anchor<B: TextBuffer + ?Sized>(
    buffer: &B,
    details: &SelectionDetails,
    surface: SurfaceRect,
    font: &FontSpec,
    measurer: Option<&dyn TextMeasurer>,
    kind: FloatingSurfaceKind,
    config: &PositionConfig,
) -> AnchorPosition {
    let line = end_line(buffer, details.end());

    let y = surface.top
        + config.padding
        + line.index as f32 * config.line_height
        + config.line_height * config.clearance_lines;

    let inner_left = surface.left + config.padding;
    let line_end_x = match measurer {
        Some(measurer) => inner_left + measurer.measure(&line.text, font),
        None => {
            tracing::debug!("no text measurer, anchoring at inner left edge");
            inner_left
        }
    };

    let x = match kind {
        FloatingSurfaceKind::Toolbar => line_end_x,
        FloatingSurfaceKind::FeedbackPanel => {
            let width = config.feedback_panel_width;
            let unclamped = if measurer.is_some() {
                line_end_x - width
            } else {
                inner_left
            };
            clamp_lower_wins(unclamped, inner_left, surface.right - config.padding - width)
        }
    };

    AnchorPosition { x, y }
}

/// `max(min, min(x, max))`: when the range is inverted the lower bound wins.
/// `f32::clamp` would panic on an inverted range.
fn clamp_lower_wins(x: f32, min: f32, max: f32) -> f32 {
    x.min(max).max(min)
}

/// Memoizes the anchor on its inputs, recomputing only when they change.
#[derive(Debug, Clone, Default)]
pub struct AnchorCache {
    key: Option<(SelectionDetails, SurfaceRectKey, FloatingSurfaceKind)>,
    value: AnchorPosition,
}

// SurfaceRect holds floats; compare bit patterns for memo equality
type SurfaceRectKey = [u32; 4];

fn rect_key(rect: &SurfaceRect) -> SurfaceRectKey {
    [
        rect.left.to_bits(),
        rect.top.to_bits(),
        rect.right.to_bits(),
        rect.bottom.to_bits(),
    ]
}

impl AnchorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached anchor, or compute and store it
    #[allow(clippy::too_many_arguments)]
    pub fn get_or_compute<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &B,
        details: &SelectionDetails,
        surface: SurfaceRect,
        font: &FontSpec,
        measurer: Option<&dyn TextMeasurer>,
        kind: FloatingSurfaceKind,
        config: &PositionConfig,
    ) -> AnchorPosition {
        let rect = rect_key(&surface);
        if let Some((cached_details, cached_rect, cached_kind)) = &self.key {
            if cached_details == details && *cached_rect == rect && *cached_kind == kind {
                return self.value;
            }
        }

        let value = estimate_anchor(buffer, details, surface, font, measurer, kind, config);
        self.key = Some((details.clone(), rect, kind));
        self.value = value;
        value
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }

    pub fn is_cached(&self) -> bool {
        self.key.is_some()
    }
}
