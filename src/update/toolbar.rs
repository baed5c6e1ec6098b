//! Floating toolbar actions

use crate::commands::Cmd;
use crate::editable::{apply_wrap, MarkdownWrap};
use crate::messages::ToolbarMsg;
use crate::model::{ComposerModel, FloatingState};

/// Handle toolbar actions. Ignored unless the toolbar is open.
pub fn update_toolbar(model: &mut ComposerModel, msg: ToolbarMsg) -> Option<Cmd> {
    if !matches!(model.floating, FloatingState::Toolbar { .. }) {
        tracing::debug!(?msg, "toolbar action without an open toolbar");
        return None;
    }

    match msg {
        ToolbarMsg::Bold => apply_format(model, MarkdownWrap::Bold),
        ToolbarMsg::Italic => apply_format(model, MarkdownWrap::Italic),
        ToolbarMsg::AiRevise => {
            model.open_feedback();
            Some(Cmd::batch(vec![Cmd::FocusFeedbackInput, Cmd::Redraw]))
        }
    }
}

/// Wrap the tracked selection, close the toolbar and hand the host the new
/// content, the notification and the selection to restore.
fn apply_format(model: &mut ComposerModel, wrap: MarkdownWrap) -> Option<Cmd> {
    let FloatingState::Toolbar { details, .. } = model.floating.take() else {
        return None;
    };

    let edit = apply_wrap(&mut model.buffer, &details, wrap);
    model.selection = edit.selection;
    model.invalidate_anchor();

    let notify = match wrap {
        MarkdownWrap::Bold => Cmd::NotifyBold(edit.wrapped_text),
        MarkdownWrap::Italic => Cmd::NotifyItalic(edit.wrapped_text),
    };

    Some(Cmd::batch(vec![
        notify,
        Cmd::ContentChanged(model.text()),
        Cmd::FocusSurface {
            selection: edit.selection,
        },
        Cmd::Redraw,
    ]))
}
