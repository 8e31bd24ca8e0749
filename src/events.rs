//! Explicit observer registration
//!
//! Components that raise change notifications own an `Observers<T>` list.
//! Callers register a boxed closure and get back a `ListenerId`; passing that
//! id to `unsubscribe` tears the listener down. Dropping the component drops
//! every listener with it, so nothing can outlive the thing it observes.
//!
//! Listeners only ever receive a shared reference to the payload. When the
//! payload is the component itself, the borrow checker rules out re-entrant
//! mutation from inside a notification.

use std::fmt;

/// Handle returned by `Observers::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered list of listeners for payloads of type `T`
pub struct Observers<T: ?Sized> {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn FnMut(&T)>)>,
}

impl<T: ?Sized> Observers<T> {
    pub fn new() -> Self {
        Observers {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener. Listeners are called in registration order.
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Calls every listener synchronously with `payload`
    pub fn notify(&mut self, payload: &T) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(payload);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl<T: ?Sized> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers: Observers<u32> = Observers::new();

        let first = Rc::clone(&log);
        observers.subscribe(move |v| first.borrow_mut().push(("first", *v)));
        let second = Rc::clone(&log);
        observers.subscribe(move |v| second.borrow_mut().push(("second", *v)));

        observers.notify(&7);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let hits = Rc::new(RefCell::new(0));
        let mut observers: Observers<()> = Observers::new();

        let counter = Rc::clone(&hits);
        let id = observers.subscribe(move |_| *counter.borrow_mut() += 1);
        observers.notify(&());
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id)); // Already gone
        observers.notify(&());

        assert_eq!(*hits.borrow(), 1);
        assert!(observers.is_empty());
    }
}
