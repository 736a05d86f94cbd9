//! Observable state cells
//!
//! A `StateCell<T>` holds a value and notifies subscribers when it changes.
//! Derived views (measures, normalized selection) are not cells; they are
//! recomputed on read from the current state.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// A value with change notification. Single-threaded.
pub struct StateCell<T> {
    value: T,
    listeners: Rc<RefCell<Listeners<T>>>,
}

impl<T: Clone + PartialEq + 'static> StateCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Rc::new(RefCell::new(Listeners { next_id: 0, entries: Vec::new() })),
        }
    }

    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// Store `value`; subscribers run only if it differs from the current one
    pub fn set(&mut self, value: T) {
        if self.value == value {
            return;
        }
        self.value = value;
        self.notify();
    }

    /// Register a listener, called with each new value
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let listener: Listener<T> = Rc::new(listener);
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, listener));

        let weak: Weak<RefCell<Listeners<T>>> = Rc::downgrade(&self.listeners);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(listeners) = weak.upgrade() {
                    listeners.borrow_mut().entries.retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    fn notify(&self) {
        // Listeners may subscribe or unsubscribe while running
        let current: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in current {
            listener(&self.value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &self.value)
            .field("subscribers", &self.listeners.borrow().entries.len())
            .finish()
    }
}

/// Handle returned by [`StateCell::subscribe`]. Dropping it keeps the listener.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_get_set() {
        let mut cell = StateCell::new(1);
        assert_eq!(cell.get(), 1);
        cell.set(2);
        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn test_subscribers_see_changes_only() {
        let mut cell = StateCell::new(0u64);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = cell.subscribe(move |v| sink.borrow_mut().push(*v));

        cell.set(1);
        cell.set(1);
        cell.set(2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut cell = StateCell::new(0);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let sub = cell.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(cell.subscriber_count(), 1);

        cell.set(1);
        sub.unsubscribe();
        cell.set(2);

        assert_eq!(calls.get(), 1);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_after_cell_dropped() {
        let cell = StateCell::new(0);
        let sub = cell.subscribe(|_| {});
        drop(cell);
        sub.unsubscribe();
    }
}
