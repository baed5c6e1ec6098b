//! Feedback panel message handlers

use crate::commands::Cmd;
use crate::messages::FeedbackMsg;
use crate::model::{ComposerModel, FloatingState};

/// Handle feedback panel messages. Ignored unless the panel is open.
pub fn update_feedback(model: &mut ComposerModel, msg: FeedbackMsg) -> Option<Cmd> {
    let input = model.floating.feedback_input_mut()?;

    match msg {
        FeedbackMsg::SetText(text) => {
            input.set_text(&text);
            Some(Cmd::Redraw)
        }
        FeedbackMsg::InsertText(text) => {
            input.insert_text(&text);
            Some(Cmd::Redraw)
        }
        FeedbackMsg::DeleteBackward => {
            input.delete_backward();
            Some(Cmd::Redraw)
        }
        FeedbackMsg::Enter { shift: true } => {
            input.insert_newline();
            Some(Cmd::Redraw)
        }
        FeedbackMsg::Enter { shift: false } | FeedbackMsg::Submit => submit(model),
        FeedbackMsg::Escape | FeedbackMsg::Cancel => {
            model.close_floating();
            Some(Cmd::Redraw)
        }
    }
}

/// Forward the instructions to the AI revise handler and close the panel.
/// An empty (after trimming) input leaves the panel open.
fn submit(model: &mut ComposerModel) -> Option<Cmd> {
    let submittable = model
        .floating
        .feedback_input()
        .is_some_and(|input| input.is_submittable());
    if !submittable {
        return None;
    }

    let FloatingState::Feedback { details, input, .. } = model.floating.take() else {
        return None;
    };

    tracing::info!(
        selected_chars = details.selected_text().chars().count(),
        "submitting AI revision request"
    );

    Some(Cmd::batch(vec![
        Cmd::ReviseWithAi {
            selected_text: details.selected_text().to_string(),
            feedback: input.text().to_string(),
        },
        Cmd::Redraw,
    ]))
}
