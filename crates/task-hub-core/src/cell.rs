//! State Cells
//!
//! The form and async controllers keep their state behind a cell so the same
//! logic drives both a reactive signal in the UI and a plain `RefCell` in
//! tests. Borrows never span an `.await`.

use std::cell::RefCell;
use std::rc::Rc;

pub trait StateCell<S> {
    /// Read without subscribing.
    fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R;

    /// Mutate and notify observers.
    fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R;
}

impl<S> StateCell<S> for Rc<RefCell<S>> {
    fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}
