//! Outside-click detection for floating surfaces
//!
//! The host owns one [`PointerHub`], the process-wide pointer-down listener.
//! A floating surface listens only while it is open: opening acquires an
//! [`OutsideClickGuard`] and dropping the guard unregisters it, whichever
//! close path dropped it.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Where a pointer-down landed, as resolved by the host's hit test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The draft surface itself
    Surface,
    /// Inside the open floating toolbar
    Toolbar,
    /// Inside the open feedback panel
    FeedbackPanel,
    /// Anywhere else
    Outside,
}

impl PointerTarget {
    /// Whether a pointer-down here dismisses an open toolbar
    pub fn dismisses_toolbar(self) -> bool {
        matches!(self, PointerTarget::Outside)
    }

    /// Whether a pointer-down here dismisses an open feedback panel.
    /// The surface underneath is inert while the panel is open, so a press
    /// on it counts as outside.
    pub fn dismisses_feedback(self) -> bool {
        matches!(self, PointerTarget::Outside | PointerTarget::Surface)
    }
}

#[derive(Debug, Default)]
struct HubState {
    next_id: u64,
    active: BTreeSet<u64>,
}

/// Registry of active outside-click subscriptions (single-threaded).
#[derive(Debug, Clone, Default)]
pub struct PointerHub {
    state: Rc<RefCell<HubState>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscription that lasts as long as the returned guard
    pub fn subscribe(&self) -> OutsideClickGuard {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.active.insert(id);
            id
        };
        tracing::trace!(id, "outside-click listener installed");
        OutsideClickGuard {
            hub: Rc::clone(&self.state),
            id,
        }
    }

    /// Whether any floating surface is currently listening
    pub fn is_listening(&self) -> bool {
        !self.state.borrow().active.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.state.borrow().active.len()
    }
}

/// Live outside-click subscription; unregisters on drop.
#[derive(Debug)]
pub struct OutsideClickGuard {
    hub: Rc<RefCell<HubState>>,
    id: u64,
}

impl OutsideClickGuard {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl PartialEq for OutsideClickGuard {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Rc::ptr_eq(&self.hub, &other.hub)
    }
}

impl Drop for OutsideClickGuard {
    fn drop(&mut self) {
        self.hub.borrow_mut().active.remove(&self.id);
        tracing::trace!(id = self.id, "outside-click listener removed");
    }
}
