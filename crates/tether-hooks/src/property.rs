use std::rc::Rc;

use tether_core::{disposable_effect, remember};

use crate::subscription::{remember_bound, subscribe_into};
use crate::{Observed, PropertyPath, Store};

/// Pre-binds hooks to one store; call [`PropertyHooks::property`] once per
/// call site and keep the resulting hook.
pub struct PropertyHooks<S: Store> {
    store: Rc<S>,
}

impl<S: Store> PropertyHooks<S> {
    pub fn new(store: Rc<S>) -> Self {
        Self { store }
    }

    pub fn property(&self, property: PropertyPath) -> PropertyHook<S> {
        PropertyHook::new(self.store.clone(), property)
    }
}

impl<S: Store> Clone for PropertyHooks<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

/// Binds a fixed property. Subscribes once per instance, on mount, and
/// unsubscribes on unmount.
pub struct PropertyHook<S: Store> {
    store: Rc<S>,
    property: PropertyPath,
}

impl<S: Store> PropertyHook<S> {
    pub fn new(store: Rc<S>, property: PropertyPath) -> Self {
        Self { store, property }
    }

    pub fn property(&self) -> &PropertyPath {
        &self.property
    }

    pub fn use_value(&self) -> Observed<S::Value> {
        let bound = remember_bound::<S::Value>();

        // The first property rendered at this call site wins for the life of
        // the instance.
        let path = remember(|| self.property.clone());
        if *path != self.property {
            log::warn!(
                "PropertyHook: call site bound to `{}` rendered with `{}`; \
                 keeping `{}`. Bind the property once per call site.",
                path,
                self.property,
                path
            );
        }

        let store = self.store.clone();
        let path = (*path).clone();
        let target = bound.clone();
        disposable_effect((), move || subscribe_into(&*store, &path, target));

        bound.get()
    }
}

impl<S: Store> Clone for PropertyHook<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            property: self.property.clone(),
        }
    }
}
