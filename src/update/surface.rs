//! Draft surface message handlers: typing, selection tracking, escape

use crate::commands::Cmd;
use crate::editable::{track_selection, SelectionRange, TextBuffer, TextBufferMut};
use crate::messages::SurfaceMsg;
use crate::model::{ComposerModel, FloatingId};

/// Handle draft surface messages
pub fn update_surface(model: &mut ComposerModel, msg: SurfaceMsg) -> Option<Cmd> {
    match msg {
        SurfaceMsg::SetText(text) => {
            model.buffer.set_content(&text);
            model.selection = model.selection.clamped(model.buffer.len_chars());
            content_changed(model)
        }

        SurfaceMsg::InsertText(text) => {
            let range = model.selection.clamped(model.buffer.len_chars());
            model.buffer.replace(range.start..range.end, &text);
            model.selection = SelectionRange::collapsed(range.start + text.chars().count());
            content_changed(model)
        }

        SurfaceMsg::SetSelection { start, end } => {
            model.selection = SelectionRange::new(start, end).clamped(model.buffer.len_chars());
            None
        }

        SurfaceMsg::SelectionCompleted { start, end } => {
            model.selection = SelectionRange::new(start, end).clamped(model.buffer.len_chars());
            selection_completed(model)
        }

        SurfaceMsg::Escape => {
            if model.close_floating() == FloatingId::Closed {
                None
            } else {
                Some(Cmd::Redraw)
            }
        }

        SurfaceMsg::SetBounds(rect) => {
            model.surface_rect = rect;
            model.invalidate_anchor();
            model.floating.is_open().then_some(Cmd::Redraw)
        }

        SurfaceMsg::SetFont(font) => {
            model.font = font;
            model.invalidate_anchor();
            model.floating.is_open().then_some(Cmd::Redraw)
        }
    }
}

/// Run the selection tracker on the surface's native selection.
///
/// A collapsed or whitespace-only selection closes any floating surface;
/// anything else opens the toolbar for it.
fn selection_completed(model: &mut ComposerModel) -> Option<Cmd> {
    // The surface underneath the feedback panel is inert
    if model.visibility() == FloatingId::Feedback {
        return None;
    }

    let SelectionRange { start, end } = model.selection;
    match track_selection(&model.buffer, start, end) {
        Some(details) => {
            tracing::debug!(
                target: "selection",
                start = details.start(),
                end = details.end(),
                "selection tracked"
            );
            model.open_toolbar(details);
        }
        None => {
            model.close_floating();
        }
    }
    Some(Cmd::Redraw)
}

/// A text change invalidates the tracked selection offsets, so any floating
/// surface closes. The host autosaves the new content.
fn content_changed(model: &mut ComposerModel) -> Option<Cmd> {
    model.invalidate_anchor();
    model.close_floating();
    Some(Cmd::batch(vec![Cmd::ContentChanged(model.text()), Cmd::Redraw]))
}
