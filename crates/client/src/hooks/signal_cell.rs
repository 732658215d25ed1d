use dioxus::prelude::*;
use eventnow_core::StateCell;

/// A `Signal` the core machines can write through. Writes notify every
/// component that read the signal.
pub struct SignalCell<S: 'static>(pub Signal<S>);

impl<S: 'static> Clone for SignalCell<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for SignalCell<S> {}

impl<S: Clone + 'static> SignalCell<S> {
    /// Snapshot for rendering. Unlike [`StateCell::get`] this subscribes the
    /// calling component.
    pub fn read_cloned(&self) -> S {
        self.0.read().clone()
    }
}

impl<S: 'static> StateCell<S> for SignalCell<S> {
    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.0.peek())
    }

    fn with_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut signal = self.0;
        let mut guard = signal.write();
        f(&mut guard)
    }
}
