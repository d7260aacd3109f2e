use std::fmt;
use std::rc::Rc;

use tether_core::disposable_effect;

use crate::keyed::KeyedActionHook;
use crate::subscription::{remember_bound, remember_fallback, resolve, subscribe_into};
use crate::{Observed, PropertyPath, Store};

/// A side-effecting callable run when a hook activates.
///
/// Invocation is fire-and-forget: the hook ignores whatever the action does
/// with its result, and does not catch a panic. An action that starts async
/// work owns that work's errors.
pub struct Action<A>(Rc<dyn Fn(&[A])>);

impl<A> Action<A> {
    pub fn new(f: impl Fn(&[A]) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn noop() -> Self {
        Self(Rc::new(|_| {}))
    }

    pub fn invoke(&self, args: &[A]) {
        (self.0)(args)
    }
}

impl<A> Clone for Action<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A> Default for Action<A> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<A> fmt::Debug for Action<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

/// Per-render options for [`ActionHook::use_value`].
///
/// The hook reactivates whenever `invoke_action` or `action_args` differs
/// (by `PartialEq`) from the previous render. Building a list whose
/// elements compare unequal every render reactivates every render.
#[derive(Clone, Debug, PartialEq)]
pub struct HookOptions<A> {
    pub invoke_action: bool,
    pub action_args: Vec<A>,
}

impl<A> Default for HookOptions<A> {
    fn default() -> Self {
        Self {
            invoke_action: true,
            action_args: Vec::new(),
        }
    }
}

impl<A> HookOptions<A> {
    pub fn new() -> Self {
        Self::default()
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

/// Factory configuration shared by [`ActionHook`] and [`KeyedActionHook`].
pub struct BindingConfig<S: Store, A = ()> {
    store: Rc<S>,
    property: PropertyPath,
    action: Option<Action<A>>,
    initial_value: Option<S::Value>,
}

impl<S: Store> BindingConfig<S, ()> {
    pub fn new(store: Rc<S>, property: PropertyPath) -> Self {
        Self {
            store,
            property,
            action: None,
            initial_value: None,
        }
    }
}

impl<S: Store, A: 'static> BindingConfig<S, A> {
    pub fn action<B>(self, f: impl Fn(&[B]) + 'static) -> BindingConfig<S, B> {
        self.maybe_action(Some(Action::new(f)))
    }

    /// `None` stands for "no action"; the hook substitutes a no-op.
    pub fn maybe_action<B>(self, action: Option<Action<B>>) -> BindingConfig<S, B> {
        BindingConfig {
            store: self.store,
            property: self.property,
            action,
            initial_value: self.initial_value,
        }
    }

    pub fn initial_value(mut self, value: S::Value) -> Self {
        self.initial_value = Some(value);
        self
    }

    pub fn maybe_initial_value(mut self, value: Option<S::Value>) -> Self {
        self.initial_value = value;
        self
    }

    pub fn build(self) -> ActionHook<S, A> {
        let (store, property, action, initial_value) = self.into_parts();
        ActionHook {
            store,
            property,
            action,
            initial_value,
        }
    }

    pub fn build_keyed(self) -> KeyedActionHook<S, A> {
        let (store, property, action, initial_value) = self.into_parts();
        KeyedActionHook::from_parts(store, property, action, initial_value)
    }

    fn into_parts(self) -> (Rc<S>, PropertyPath, Action<A>, Option<S::Value>) {
        let action = self.action.unwrap_or_else(|| {
            log::debug!("`{}`: no action configured; using a no-op", self.property);
            Action::noop()
        });
        (self.store, self.property, action, self.initial_value)
    }
}

/// Binds a fixed property and runs an action on each activation.
///
/// Activation happens on mount and whenever the options change. It invokes
/// the action (when `invoke_action` is set) and then subscribes; subscribing
/// does not depend on the flag.
pub struct ActionHook<S: Store, A = ()> {
    store: Rc<S>,
    property: PropertyPath,
    action: Action<A>,
    initial_value: Option<S::Value>,
}

impl<S: Store, A: PartialEq + Clone + 'static> ActionHook<S, A> {
    pub fn property(&self) -> &PropertyPath {
        &self.property
    }

    pub fn use_value(&self, options: HookOptions<A>) -> Observed<S::Value> {
        let bound = remember_bound::<S::Value>();
        let fallback = remember_fallback(&self.initial_value);

        let HookOptions {
            invoke_action,
            action_args,
        } = options;
        let deps = (invoke_action, action_args.clone());

        let store = self.store.clone();
        let path = self.property.clone();
        let action = self.action.clone();
        let target = bound.clone();
        disposable_effect(deps, move || {
            if invoke_action {
                log::debug!("`{path}`: invoking action");
                action.invoke(&action_args);
            }
            subscribe_into(&*store, &path, target)
        });

        resolve(&bound, &fallback)
    }
}

impl<S: Store, A> Clone for ActionHook<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            property: self.property.clone(),
            action: self.action.clone(),
            initial_value: self.initial_value.clone(),
        }
    }
}
