//! One-shot completion handles.
//!
//! A [`CompletionSource`] is kept by whoever performs the work (for example an
//! animated scroll); the matching [`Completion`] is handed to the caller. The
//! completion can be polled as a `Future` or inspected synchronously.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

struct CompletionState<T> {
    value: Option<T>,
    waker: Option<Waker>,
}

/// Caller-side handle resolving to `T` once the work finishes.
pub struct Completion<T> {
    state: Rc<RefCell<CompletionState<T>>>,
}

/// Producer-side handle used to resolve a [`Completion`].
pub struct CompletionSource<T> {
    state: Rc<RefCell<CompletionState<T>>>,
}

impl<T> Clone for Completion<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T> std::fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl<T> std::fmt::Debug for CompletionSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSource")
            .field("resolved", &self.state.borrow().value.is_some())
            .finish()
    }
}

/// Creates a linked source/completion pair.
pub fn completion_pair<T>() -> (CompletionSource<T>, Completion<T>) {
    let state = Rc::new(RefCell::new(CompletionState {
        value: None,
        waker: None,
    }));
    (
        CompletionSource {
            state: Rc::clone(&state),
        },
        Completion { state },
    )
}

impl<T: Clone> Completion<T> {
    /// A completion that is already resolved.
    pub fn resolved(value: T) -> Self {
        let (source, completion) = completion_pair();
        source.resolve(value);
        completion
    }

    /// Returns the value if the work already finished.
    pub fn value(&self) -> Option<T> {
        self.state.borrow().value.clone()
    }

    /// Polls once with a no-op waker.
    pub fn now_or_never(&mut self) -> Option<T> {
        let mut cx = Context::from_waker(futures_task::noop_waker_ref());
        match Pin::new(self).poll(&mut cx) {
            Poll::Ready(value) => Some(value),
            Poll::Pending => None,
        }
    }
}

impl<T> Completion<T> {
    pub fn is_resolved(&self) -> bool {
        self.state.borrow().value.is_some()
    }
}

impl<T> CompletionSource<T> {
    /// Stores the value and wakes a pending poller. The first value wins.
    pub fn resolve(&self, value: T) -> bool {
        let waker = {
            let mut state = self.state.borrow_mut();
            if state.value.is_some() {
                log::trace!("CompletionSource: already resolved, dropping the new value");
                return false;
            }
            state.value = Some(value);
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.state.borrow().value.is_some()
    }
}

impl<T: Clone> Future for Completion<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.borrow_mut();
        if let Some(value) = state.value.clone() {
            return Poll::Ready(value);
        }
        state.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}
