//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use relay_compose::config::ComposerConfig;
use relay_compose::measure::FixedWidthMeasurer;
use relay_compose::messages::{Msg, SurfaceMsg, ToolbarMsg};
use relay_compose::model::ComposerModel;
use relay_compose::overlay::SurfaceRect;
use relay_compose::update::update;
use relay_compose::Cmd;

/// Width of one character at the default 16px font
pub const CHAR_WIDTH: f32 = 10.0;

/// Surface used by most tests: 1000 x 400 at the origin
pub fn test_rect() -> SurfaceRect {
    SurfaceRect::new(0.0, 0.0, 1000.0, 400.0)
}

/// Create a test composer over `text` with fixed-width measurement
pub fn test_model(text: &str) -> ComposerModel {
    ComposerModel::new(text, &ComposerConfig::default())
        .with_surface_rect(test_rect())
        .with_measurer(Box::new(FixedWidthMeasurer::new(CHAR_WIDTH)))
}

/// Create a test composer with no measurement context
pub fn test_model_unmeasured(text: &str) -> ComposerModel {
    ComposerModel::new(text, &ComposerConfig::default()).with_surface_rect(test_rect())
}

/// Complete a selection on the surface, as a pointer release would
pub fn select(model: &mut ComposerModel, start: usize, end: usize) -> Option<Cmd> {
    update(
        model,
        Msg::Surface(SurfaceMsg::SelectionCompleted { start, end }),
    )
}

/// Select `start..end` and switch the toolbar to the feedback panel
pub fn open_feedback(model: &mut ComposerModel, start: usize, end: usize) {
    select(model, start, end);
    update(model, Msg::Toolbar(ToolbarMsg::AiRevise));
}

/// Leaf commands of an update result
pub fn leaf_cmds(cmd: Option<Cmd>) -> Vec<Cmd> {
    cmd.map(Cmd::flatten).unwrap_or_default()
}
