use std::cell::{Cell, RefCell};

use crate::runtime::{on_dispose, remember, schedule_effect};
use crate::Dispose;

/// Runs `effect` after the render in which `deps` first appears or changes,
/// cleaning up the previous run first. The live cleanup also runs on unmount.
///
/// `deps` is compared with `PartialEq` against the value from the previous
/// render at this call site. Passing a freshly built value that compares
/// unequal every time (or a type whose equality is identity-like) reruns the
/// effect on every render.
pub fn disposable_effect<K: PartialEq + 'static>(
    deps: K,
    effect: impl FnOnce() -> Dispose + 'static,
) {
    // Slot-based: one set of slots per call site, in call order.
    let last_deps = remember(|| RefCell::new(None::<K>));
    let cleanup_slot = remember(|| RefCell::new(None::<Dispose>));
    let installed = remember(|| Cell::new(false));

    // Install a single unmount disposer for this call site.
    if !installed.replace(true) {
        let cleanup_slot = cleanup_slot.clone();
        on_dispose(move || {
            let live = cleanup_slot.borrow_mut().take();
            if let Some(d) = live {
                d.run();
            }
        });
    }

    if last_deps.borrow().as_ref() == Some(&deps) {
        return;
    }
    *last_deps.borrow_mut() = Some(deps);

    schedule_effect(move || {
        let previous = cleanup_slot.borrow_mut().take();
        if let Some(d) = previous {
            d.run();
        }
        let d = effect();
        *cleanup_slot.borrow_mut() = Some(d);
    });
}
