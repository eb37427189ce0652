// ============================================================================
// REACTIVITY - Change listeners shared between clones of a store
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// List of change callbacks. Clones share the same list, so a store handed
/// to a view and the copy kept by the shell notify the same subscribers.
#[derive(Clone, Default)]
pub struct Listeners {
    callbacks: Rc<RefCell<Vec<Callback>>>,
}

impl Listeners {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a change callback
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.callbacks.borrow_mut().push(Rc::new(callback));
    }

    /// Notify every subscriber. The list is snapshotted first so a callback
    /// may subscribe or trigger another notification.
    pub fn notify(&self) {
        let snapshot: Vec<Callback> = self.callbacks.borrow().iter().cloned().collect();
        for callback in snapshot {
            callback();
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn clones_share_subscribers() {
        let listeners = Listeners::new();
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        listeners.clone().subscribe(move || counter.set(counter.get() + 1));

        listeners.notify();
        listeners.notify();
        assert_eq!(hits.get(), 2);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn callbacks_may_subscribe_during_notify() {
        let listeners = Listeners::new();
        let inner = listeners.clone();
        listeners.subscribe(move || inner.subscribe(|| {}));

        listeners.notify();
        assert_eq!(listeners.len(), 2);
    }
}
