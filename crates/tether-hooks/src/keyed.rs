use std::rc::Rc;

use tether_core::{Dispose, disposable_effect};

use crate::action::Action;
use crate::subscription::{remember_bound, remember_fallback, resolve, subscribe_into};
use crate::{Key, Observed, PropertyPath, Store};

/// Per-render options for [`KeyedActionHook::use_value`].
///
/// Any change to `key`, `invoke_action` or `action_args` (by `PartialEq`)
/// reactivates the hook.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyedOptions<A> {
    pub key: Option<Key>,
    pub invoke_action: bool,
    pub action_args: Vec<A>,
}

impl<A> Default for KeyedOptions<A> {
    fn default() -> Self {
        Self {
            key: None,
            invoke_action: true,
            action_args: Vec::new(),
        }
    }
}

impl<A> KeyedOptions<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn maybe_key(mut self, key: Option<Key>) -> Self {
        self.key = key;
        self
    }

    pub fn invoke_action(mut self, invoke: bool) -> Self {
        self.invoke_action = invoke;
        self
    }

    pub fn action_args(mut self, args: impl IntoIterator<Item = A>) -> Self {
        self.action_args = args.into_iter().collect();
        self
    }
}

/// Binds `base.key` for a key supplied at render time.
///
/// - Idle (`key` is `None`): no subscription, no action. Returns the
///   fallback or `NoValue`.
/// - Idle → Active: invokes the action (if enabled), then subscribes
///   `base.key`.
/// - Active → Active': unsubscribes the old path, then activates again for
///   the new key.
/// - Active → Idle: unsubscribes and stays idle. The last delivered value
///   is kept until the next notification.
///
/// Unmount releases whichever subscription is live.
pub struct KeyedActionHook<S: Store, A = ()> {
    store: Rc<S>,
    base: PropertyPath,
    action: Action<A>,
    initial_value: Option<S::Value>,
}

impl<S: Store, A> KeyedActionHook<S, A> {
    pub(crate) fn from_parts(
        store: Rc<S>,
        base: PropertyPath,
        action: Action<A>,
        initial_value: Option<S::Value>,
    ) -> Self {
        Self {
            store,
            base,
            action,
            initial_value,
        }
    }

    pub fn base(&self) -> &PropertyPath {
        &self.base
    }
}

impl<S: Store, A: PartialEq + Clone + 'static> KeyedActionHook<S, A> {
    pub fn use_value(&self, options: KeyedOptions<A>) -> Observed<S::Value> {
        let bound = remember_bound::<S::Value>();
        let fallback = remember_fallback(&self.initial_value);

        let KeyedOptions {
            key,
            invoke_action,
            action_args,
        } = options;
        let deps = (key.clone(), invoke_action, action_args.clone());

        let store = self.store.clone();
        let base = self.base.clone();
        let action = self.action.clone();
        let target = bound.clone();
        disposable_effect(deps, move || {
            let Some(key) = key else {
                log::trace!("`{base}`: no key; idle");
                return Dispose::noop();
            };
            let path = base.keyed(&key);
            if invoke_action {
                log::debug!("`{path}`: invoking action");
                action.invoke(&action_args);
            }
            subscribe_into(&*store, &path, target)
        });

        resolve(&bound, &fallback)
    }
}

impl<S: Store, A> Clone for KeyedActionHook<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            base: self.base.clone(),
            action: self.action.clone(),
            initial_value: self.initial_value.clone(),
        }
    }
}
