//! # Instances, remembered state, and effects
//!
//! Tether's runtime is a small, single-threaded component host. It gives
//! hooks exactly three capabilities:
//!
//! - `remember*`: per-instance storage bound to call order.
//! - `LocalState<T>`: state whose replacement marks the instance dirty.
//! - `disposable_effect`: a side-effect with cleanup that reruns when its
//!   dependency value changes.
//!
//! ## Instances
//!
//! An [`Instance`] is one mounted component. Rendering runs the component
//! function with the instance installed as the current composer, then runs
//! the effects scheduled during that render:
//!
//! ```rust
//! use tether_core::*;
//!
//! let inst = Instance::new();
//! let count = inst.render(|| {
//!     let count = remember_local(|| 0);
//!     count.get()
//! });
//! assert_eq!(count, 0);
//! ```
//!
//! - `remember` is order-based: the Nth call in a render always refers to the
//!   Nth stored value, so hooks must not be called conditionally.
//! - `LocalState::set` may be called from anywhere (a store notification,
//!   another effect). The owning instance reports `is_dirty()` until its next
//!   render.
//!
//! ## Effects and cleanup
//!
//! ```rust
//! use tether_core::*;
//!
//! fn watch_user(user: u32) {
//!     disposable_effect(user, move || {
//!         log::info!("watching user {user}");
//!         on_cleanup(move || log::info!("stopped watching user {user}"))
//!     });
//! }
//!
//! let inst = Instance::new();
//! inst.render(|| watch_user(1));
//! inst.render(|| watch_user(1)); // same deps: nothing runs
//! inst.render(|| watch_user(2)); // cleanup for 1, then effect for 2
//! inst.unmount();             // cleanup for 2
//! ```
//!
//! The previous cleanup always runs before the next effect body, and
//! `unmount` runs each live cleanup exactly once.

pub mod effects;
pub mod effects_ext;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod state;

pub use effects::*;
pub use effects_ext::*;
pub use prelude::*;
pub use runtime::*;
pub use scope::*;
pub use state::*;
