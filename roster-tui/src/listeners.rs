//! Scoped click-outside subscriptions.
//!
//! A component that wants to hear about clicks landing outside its bounds
//! (a dropdown closing itself, for example) subscribes and keeps the returned
//! [`Subscription`]. Dropping the subscription removes the listener, so a
//! closed or destroyed component can never be notified again, and two
//! components never overwrite each other's listener.

use std::cell::RefCell;
use std::rc::Rc;
use std::rc::Weak;

use crate::ui::Rect;

/// Identifies one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(ListenerId, Rect)>,
}

/// Registry of click-outside listeners, owned by the event loop.
#[derive(Debug, Default)]
pub struct ClickListeners {
    registry: Rc<RefCell<Registry>>,
}

impl ClickListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listens for clicks outside `bounds` until the subscription is dropped.
    pub fn subscribe(&self, bounds: Rect) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.entries.push((id, bounds));

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Returns the listeners whose bounds do not contain (`x`, `y`).
    pub fn dispatch(&self, x: u16, y: u16) -> Vec<ListenerId> {
        self.registry
            .borrow()
            .entries
            .iter()
            .filter(|(_, bounds)| !bounds.contains(x, y))
            .map(|(id, _)| *id)
            .collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Live click-outside listener. Unsubscribes on drop.
#[derive(Debug)]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Moves the watched area, e.g. after a re-layout.
    pub fn set_bounds(&self, bounds: Rect) {
        let Some(registry) = self.registry.upgrade() else { return };
        let mut registry = registry.borrow_mut();
        if let Some(entry) = registry.entries.iter_mut().find(|(id, _)| *id == self.id) {
            entry.1 = bounds;
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().entries.retain(|(id, _)| *id != self.id);
        }
    }
}
