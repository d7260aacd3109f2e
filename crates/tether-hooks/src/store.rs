use std::rc::Rc;

use tether_core::Dispose;

use crate::PropertyPath;

/// Subscription callback. `None` is the store's "undefined".
pub type Notify<V> = Rc<dyn Fn(Option<V>)>;

/// The observable state container the hooks bind to.
///
/// Path resolution, change detection and notification batching all belong
/// to the implementation. The returned [`Dispose`] is the unsubscribe
/// capability; hooks run it exactly once.
pub trait Store: 'static {
    type Value: Clone + 'static;

    fn subscribe(&self, path: &PropertyPath, notify: Notify<Self::Value>) -> Dispose;
}
