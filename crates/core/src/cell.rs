//! Interior-mutable state holders the state machines write through.
//!
//! The machines in this crate never own their state directly: they are handed
//! a [`StateCell`]. On the host that is an `Rc<RefCell<_>>`; the Dioxus client
//! wraps a `Signal` so every write re-renders subscribers.

use std::cell::RefCell;
use std::rc::Rc;

pub trait StateCell<S> {
    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R;

    fn with_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R;

    fn get(&self) -> S
    where
        S: Clone,
    {
        self.with(S::clone)
    }

    fn set(&self, value: S) {
        self.with_mut(|state| *state = value);
    }
}

impl<S> StateCell<S> for Rc<RefCell<S>> {
    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.borrow())
    }

    fn with_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Convenience constructor for host-side cells.
pub fn local<S>(value: S) -> Rc<RefCell<S>> {
    Rc::new(RefCell::new(value))
}
