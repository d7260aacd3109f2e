use std::rc::Rc;

use tether_core::disposable_effect;

use crate::subscription::{remember_bound, subscribe_into};
use crate::{Observed, PropertyPath, Store};

/// Binds a fixed property and always calls `invoke(param)` on activation.
///
/// Activation happens on mount and whenever `param` changes. There is no gate
/// and no fallback value. The subscribed path does not depend on `param`.
pub struct WrappedHook<S: Store, P> {
    store: Rc<S>,
    invoke: Rc<dyn Fn(Option<&P>)>,
    property: PropertyPath,
}

impl<S: Store, P> WrappedHook<S, P> {
    pub fn new(store: Rc<S>, invoke: impl Fn(Option<&P>) + 'static, property: PropertyPath) -> Self {
        Self {
            store,
            invoke: Rc::new(invoke),
            property,
        }
    }

    pub fn property(&self) -> &PropertyPath {
        &self.property
    }
}

impl<S: Store, P: PartialEq + Clone + 'static> WrappedHook<S, P> {
    pub fn use_value(&self, param: Option<P>) -> Observed<S::Value> {
        let bound = remember_bound::<S::Value>();

        let store = self.store.clone();
        let path = self.property.clone();
        let invoke = self.invoke.clone();
        let target = bound.clone();
        disposable_effect(param.clone(), move || {
            invoke(param.as_ref());
            subscribe_into(&*store, &path, target)
        });

        bound.get()
    }
}

impl<S: Store, P> Clone for WrappedHook<S, P> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            invoke: self.invoke.clone(),
            property: self.property.clone(),
        }
    }
}
