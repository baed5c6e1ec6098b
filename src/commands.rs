//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host performs after an update:
//! notifying collaborators, refocusing inputs, autosaving content.

use crate::editable::SelectionRange;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the composer and its floating layer
    Redraw,
    /// Execute multiple commands
    Batch(Vec<Cmd>),

    // === Collaborators ===
    /// Full surface text after a keystroke or mutation (autosave)
    ContentChanged(String),
    /// Bold was applied to this text
    NotifyBold(String),
    /// Italic was applied to this text
    NotifyItalic(String),
    /// Ask the AI revise handler to rewrite `selected_text` following `feedback`
    ReviseWithAi {
        selected_text: String,
        feedback: String,
    },

    // === Focus ===
    /// Refocus the draft surface and set its selection range.
    /// Run after the host's layout pass so geometry reflects the mutation.
    FocusSurface { selection: SelectionRange },
    /// Focus the feedback panel input
    FocusFeedbackInput,
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            Cmd::ContentChanged(_) => false,
            Cmd::NotifyBold(_) | Cmd::NotifyItalic(_) => false,
            Cmd::ReviseWithAi { .. } => false,
            Cmd::FocusSurface { .. } => true,
            Cmd::FocusFeedbackInput => true,
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_nested_batches() {
        let cmd = Cmd::batch(vec![
            Cmd::NotifyBold("x".into()),
            Cmd::None,
            Cmd::batch(vec![Cmd::Redraw, Cmd::FocusFeedbackInput]),
        ]);
        assert_eq!(
            cmd.flatten(),
            vec![
                Cmd::NotifyBold("x".into()),
                Cmd::Redraw,
                Cmd::FocusFeedbackInput
            ]
        );
    }

    #[test]
    fn test_needs_redraw() {
        assert!(!Cmd::None.needs_redraw());
        assert!(!Cmd::ContentChanged(String::new()).needs_redraw());
        assert!(Cmd::batch(vec![Cmd::None, Cmd::Redraw]).needs_redraw());
    }
}
