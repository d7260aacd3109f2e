use std::rc::Rc;

use tether_core::{Dispose, LocalState, remember, remember_local};

use crate::{Observed, PropertyPath, Store};

/// The per-instance value a hook renders from.
pub type Bound<V> = LocalState<Observed<V>>;

/// Allocates the rendering instance's bound value, starting at `NoValue`.
pub fn remember_bound<V: 'static>() -> Bound<V> {
    remember_local(|| Observed::NoValue)
}

/// Allocates the rendering instance's fallback slot from `initial`.
///
/// The slot is per instance, so two instances built from the same factory
/// never share it. Once seeded it is never written again.
pub fn remember_fallback<V: Clone + 'static>(initial: &Option<V>) -> Rc<Observed<V>> {
    remember(|| Observed::from(initial.clone()))
}

/// Subscribes `path` and routes every notification into `bound`.
///
/// Undefined becomes `NoValue`; anything else is stored verbatim. The
/// returned handle unsubscribes.
pub fn subscribe_into<S: Store + ?Sized>(
    store: &S,
    path: &PropertyPath,
    bound: Bound<S::Value>,
) -> Dispose {
    log::debug!("subscribe `{path}`");
    let notify_path = path.clone();
    let handle = store.subscribe(
        path,
        Rc::new(move |delivered: Option<S::Value>| {
            log::trace!(
                "notify `{notify_path}`: {}",
                if delivered.is_some() { "value" } else { "undefined" }
            );
            bound.set(Observed::from(delivered));
        }),
    );

    let path = path.clone();
    Dispose::new(move || {
        log::debug!("unsubscribe `{path}`");
        handle.run();
    })
}

/// What the hook returns: the bound value, or the fallback while it is `NoValue`.
///
/// Applies on every read, so a later undefined notification brings the
/// fallback back.
pub fn resolve<V: Clone>(bound: &Bound<V>, fallback: &Observed<V>) -> Observed<V> {
    match bound.get() {
        Observed::NoValue => fallback.clone(),
        v => v,
    }
}
