use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::runtime::{InstanceInner, current_instance, remember};

/// Instance-owned state. Replacing the value marks the owner for re-render.
pub struct LocalState<T> {
    value: Rc<RefCell<T>>,
    owner: Weak<InstanceInner>,
}

impl<T> Clone for LocalState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            owner: self.owner.clone(),
        }
    }
}

impl<T> LocalState<T> {
    fn new(value: T, owner: Weak<InstanceInner>) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            owner,
        }
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Replaces the value and invalidates the owning instance.
    pub fn set(&self, v: T) {
        *self.value.borrow_mut() = v;
        if let Some(owner) = self.owner.upgrade() {
            owner.invalidate();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalState").field(&self.value.borrow()).finish()
    }
}

/// Remembered per-instance state; see [`LocalState`].
pub fn remember_local<T: 'static>(init: impl FnOnce() -> T) -> LocalState<T> {
    let owner = current_instance()
        .map(|inst| Rc::downgrade(&inst))
        .unwrap_or_default();
    (*remember(move || LocalState::new(init(), owner))).clone()
}
