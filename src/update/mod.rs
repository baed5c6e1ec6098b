//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod feedback;
mod surface;
mod toolbar;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::{ComposerModel, FloatingId};
use crate::pointer::PointerTarget;

#[cfg(debug_assertions)]
use crate::tracing::FloatingSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use feedback::update_feedback;
pub use surface::update_surface;
pub use toolbar::update_toolbar;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
#[inline]
pub fn update(model: &mut ComposerModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut ComposerModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Surface(m) => update_surface(model, m),
        Msg::Toolbar(m) => update_toolbar(model, m),
        Msg::Feedback(m) => update_feedback(model, m),
        Msg::PointerDown(target) => update_pointer_down(model, target),
    }
}

/// Outside-click handling for whichever floating surface is listening
fn update_pointer_down(model: &mut ComposerModel, target: PointerTarget) -> Option<Cmd> {
    let dismiss = match model.visibility() {
        FloatingId::Closed => false,
        FloatingId::Toolbar => target.dismisses_toolbar(),
        FloatingId::Feedback => target.dismisses_feedback(),
    };
    if !dismiss {
        return None;
    }

    // Closing the panel drops its input along with the variant
    model.close_floating();
    Some(Cmd::Redraw)
}

#[cfg(debug_assertions)]
fn update_traced(model: &mut ComposerModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = FloatingSnapshot::from_model(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = FloatingSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "floating", %diff, "state changed");
    }

    model.assert_invariants_with_context(&msg_name);

    result
}

/// Display name for a message, with long text payloads shortened
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    let full = format!("{:?}", msg);
    if full.chars().count() > 80 {
        let short: String = full.chars().take(77).collect();
        format!("{}...", short)
    } else {
        full
    }
}
