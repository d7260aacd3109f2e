use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A one-shot cleanup handle.
///
/// Clones share the same cleanup, so whichever clone runs first wins and the
/// rest become no-ops.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// A handle with nothing to clean up.
    pub fn noop() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        // Take before calling so a cleanup that re-enters this handle sees it spent.
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    /// True until the cleanup has run.
    pub fn is_pending(&self) -> bool {
        self.0.borrow().is_some()
    }
}

impl Default for Dispose {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Dispose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispose")
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// Helper to build the cleanup returned from an effect.
pub fn on_cleanup(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}
