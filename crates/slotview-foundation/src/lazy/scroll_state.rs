//! Host-owned scroll signal.
//!
//! [`ScrollState`] is the handle through which the host (a scrollbar, a drag
//! gesture, a window resize) and the controller agree on the normalized scroll
//! position and the viewport size. It is a cheap-to-clone shared handle;
//! every clone observes the same values.
//!
//! Positions use the scrollbar convention: 1.0 is the start of the content,
//! 0.0 the end.

use slotview_core::{Event, Shared, SubscriptionId};
use slotview_ui_layout::Size;

/// Change delivered to [`ScrollState`] listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollSignal {
    Position(f32),
    Viewport(Size),
}

#[derive(Debug)]
struct ScrollStateInner {
    normalized: f32,
    viewport: Size,
}

/// Shared normalized position and viewport size.
#[derive(Clone, Debug)]
pub struct ScrollState {
    inner: Shared<ScrollStateInner>,
    // Kept apart from `inner` so listeners may read the state while notified.
    listeners: Shared<Event<ScrollSignal>>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl ScrollState {
    /// Starts at the beginning of the content.
    pub fn new(viewport: Size) -> Self {
        Self {
            inner: Shared::new(ScrollStateInner {
                normalized: 1.0,
                viewport,
            }),
            listeners: Shared::new(Event::new()),
        }
    }

    pub fn normalized(&self) -> f32 {
        self.inner.with(|inner| inner.normalized)
    }

    pub fn viewport_size(&self) -> Size {
        self.inner.with(|inner| inner.viewport)
    }

    /// Moves the position, clamped to `[0, 1]` (NaN means the start).
    /// Listeners are notified only when the value changes.
    pub fn set_normalized(&self, normalized: f32) {
        let normalized = if normalized.is_nan() {
            1.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        let changed = self.inner.update(|inner| {
            let changed = inner.normalized != normalized;
            inner.normalized = normalized;
            changed
        });
        if changed {
            self.notify(ScrollSignal::Position(normalized));
        }
    }

    pub fn set_viewport_size(&self, viewport: Size) {
        let changed = self.inner.update(|inner| {
            let changed = inner.viewport != viewport;
            inner.viewport = viewport;
            changed
        });
        if changed {
            self.notify(ScrollSignal::Viewport(viewport));
        }
    }

    /// Listeners run with the list detached, so a listener may write the
    /// state; that nested write is not delivered to anyone.
    fn notify(&self, signal: ScrollSignal) {
        let mut listeners = self.listeners.replace(Event::new());
        listeners.emit(&signal);
        self.listeners.replace(listeners);
    }

    /// Registers a change listener. Listeners must not subscribe or
    /// unsubscribe from inside the callback; such calls see an empty list.
    pub fn subscribe(&self, listener: impl FnMut(&ScrollSignal) + 'static) -> SubscriptionId {
        self.listeners.update(|event| event.subscribe(listener))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.update(|event| event.unsubscribe(id))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.with(|event| event.listener_count())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_clones_share_state() {
        let state = ScrollState::new(Size::new(100.0, 200.0));
        let other = state.clone();
        other.set_normalized(0.25);
        assert_eq!(state.normalized(), 0.25);
        assert!(state.ptr_eq(&other));
    }

    #[test]
    fn test_position_is_clamped() {
        let state = ScrollState::default();
        assert_eq!(state.normalized(), 1.0);
        state.set_normalized(-3.0);
        assert_eq!(state.normalized(), 0.0);
        state.set_normalized(f32::NAN);
        assert_eq!(state.normalized(), 1.0);
    }

    #[test]
    fn test_listeners_see_changes_only() {
        let state = ScrollState::new(Size::new(100.0, 200.0));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let id = {
            let seen = Rc::clone(&seen);
            let reader = state.clone();
            state.subscribe(move |signal| {
                // Reading the state from a listener is allowed.
                seen.borrow_mut().push((*signal, reader.normalized()));
            })
        };

        state.set_normalized(0.5);
        state.set_normalized(0.5);
        state.set_viewport_size(Size::new(100.0, 300.0));
        assert_eq!(
            *seen.borrow(),
            vec![
                (ScrollSignal::Position(0.5), 0.5),
                (ScrollSignal::Viewport(Size::new(100.0, 300.0)), 0.5),
            ]
        );

        assert!(state.unsubscribe(id));
        state.set_normalized(0.1);
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(state.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_write_the_state() {
        let state = ScrollState::new(Size::new(100.0, 200.0));
        let calls = Rc::new(RefCell::new(0));
        {
            let calls = Rc::clone(&calls);
            let writer = state.clone();
            state.subscribe(move |signal| {
                *calls.borrow_mut() += 1;
                // Snap every resize back to the start of the content.
                if let ScrollSignal::Viewport(_) = signal {
                    writer.set_normalized(1.0);
                }
            });
        }

        state.set_normalized(0.4);
        state.set_viewport_size(Size::new(100.0, 400.0));

        assert_eq!(state.normalized(), 1.0);
        // The nested position write is not re-broadcast.
        assert_eq!(*calls.borrow(), 2);
        assert_eq!(state.listener_count(), 1);
    }
}
