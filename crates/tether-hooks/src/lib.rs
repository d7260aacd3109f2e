//! # Store-bound hooks
//!
//! Each hook binds one property of an observable [`Store`] to the local state
//! of the component instance rendering it. A store notification replaces
//! that state, which marks the instance for re-render. The next render
//! returns the new value.
//!
//! There are four variants, all built on the same subscription logic:
//!
//! - [`PropertyHook`]: a fixed property, subscribed once per instance.
//! - [`ActionHook`]: a fixed property plus an action invoked on each
//!   activation, gated by `invoke_action`.
//! - [`KeyedActionHook`]: the property `base.key` for a key given at render
//!   time. It stays idle until a key is present.
//! - [`WrappedHook`]: a fixed property plus an ungated `invoke(param)` on each
//!   activation.
//!
//! A hook is built once, outside any component, and called on every render
//! of each instance that uses it:
//!
//! ```text
//! let cart = BindingConfig::new(store.clone(), PropertyPath::new("cart")?)
//!     .initial_value(Vec::new())
//!     .build();
//!
//! let inst = Instance::new();
//! let items = inst.render(|| cart.use_value(HookOptions::default()));
//! ```
//!
//! `tests/usage.rs` runs this walkthrough end to end against
//! `testing::RecordingStore`.
//!
//! ## Values
//!
//! Hooks return [`Observed<T>`]. `NoValue` means either that nothing has been
//! delivered yet or that the store delivered undefined. A configured fallback
//! (`initial_value`) replaces `NoValue` on every read, not only the first.
//! The fallback slot is allocated per instance.
//!
//! ## Activation
//!
//! Activation runs in the effect phase after a render. The action (if any)
//! always runs before the subscription is established, so a value the action
//! writes synchronously can arrive with the first notification. The previous
//! subscription is released before a new one is made. Unmount releases the
//! live one.

pub mod action;
pub mod keyed;
pub mod observed;
pub mod path;
pub mod property;
pub mod store;
pub mod subscription;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod wrapped;

pub use action::{Action, ActionHook, BindingConfig, HookOptions};
pub use keyed::{KeyedActionHook, KeyedOptions};
pub use observed::Observed;
pub use path::{Key, PathError, PropertyPath};
pub use property::{PropertyHook, PropertyHooks};
pub use store::{Notify, Store};
pub use wrapped::WrappedHook;
