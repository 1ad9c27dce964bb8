//! Owner-scoped notification channel.
//!
//! An [`Event`] lives inside the object that raises it (the scroll controller,
//! a scroll state) and is never a process-wide singleton. Listeners are plain
//! closures identified by a [`SubscriptionId`] so they can be removed again.

use smallvec::SmallVec;

/// Identifies one listener registered on an [`Event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// Multicast event carrying values of type `T`.
pub struct Event<T> {
    // Most events have one or two listeners (the host and maybe a scrollbar).
    listeners: SmallVec<[(SubscriptionId, Listener<T>); 2]>,
    next_id: u64,
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T> Event<T> {
    pub fn new() -> Self {
        Self {
            listeners: SmallVec::new(),
            next_id: 1,
        }
    }

    /// Registers a listener and returns the id needed to remove it.
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        before != self.listeners.len()
    }

    /// Delivers `value` to every listener in subscription order.
    pub fn emit(&mut self, value: &T) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(value);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shared;

    #[test]
    fn test_emit_reaches_all_listeners_in_order() {
        let log = Shared::new(Vec::new());
        let mut event = Event::new();
        let first = log.clone();
        event.subscribe(move |v: &u32| first.update(|l| l.push(("a", *v))));
        let second = log.clone();
        event.subscribe(move |v: &u32| second.update(|l| l.push(("b", *v))));

        event.emit(&7);

        assert_eq!(log.with(|l| l.clone()), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Shared::new(0);
        let mut event = Event::new();
        let counter = count.clone();
        let id = event.subscribe(move |_: &()| counter.update(|c| *c += 1));

        event.emit(&());
        assert!(event.unsubscribe(id));
        assert!(!event.unsubscribe(id));
        event.emit(&());

        assert_eq!(*count.borrow(), 1);
        assert_eq!(event.listener_count(), 0);
    }
}
