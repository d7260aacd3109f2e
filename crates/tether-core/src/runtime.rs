use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::scope::Scope;

thread_local! {
    static CURRENT: RefCell<Vec<Rc<InstanceInner>>> = const { RefCell::new(Vec::new()) };
    static NEXT_INSTANCE: Cell<u64> = const { Cell::new(1) };
}

type PendingEffect = Box<dyn FnOnce()>;

/// Positional slot table for one component instance.
#[derive(Default)]
pub struct Composer {
    slots: Vec<Box<dyn Any>>,
    cursor: usize,
    pending: SmallVec<[PendingEffect; 4]>,
}

impl Composer {
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) struct InstanceInner {
    id: InstanceId,
    composer: RefCell<Composer>,
    scope: Scope,
    dirty: Cell<bool>,
    renders: Cell<u64>,
}

impl InstanceInner {
    pub(crate) fn invalidate(&self) {
        if self.scope.is_disposed() {
            return;
        }
        if !self.dirty.replace(true) {
            log::trace!("instance {}: invalidated", self.id);
        }
    }
}

impl Drop for InstanceInner {
    fn drop(&mut self) {
        self.scope.dispose();
    }
}

/// One mounted component instance.
///
/// `render` runs the render phase (hooks read their slots and schedule
/// effects) followed by the effect phase (scheduled effects run in call
/// order). Local state replaced from anywhere marks the instance dirty; the
/// host decides when to render it again.
#[derive(Clone)]
pub struct Instance {
    inner: Rc<InstanceInner>,
}

impl Instance {
    pub fn new() -> Self {
        let id = NEXT_INSTANCE.with(|n| {
            let id = n.get();
            n.set(id + 1);
            InstanceId(id)
        });
        Self {
            inner: Rc::new(InstanceInner {
                id,
                composer: RefCell::new(Composer::default()),
                scope: Scope::new(),
                dirty: Cell::new(false),
                renders: Cell::new(0),
            }),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.inner.id
    }

    pub fn scope(&self) -> &Scope {
        &self.inner.scope
    }

    pub fn is_dirty(&self) -> bool {
        self.inner.dirty.get()
    }

    pub fn is_mounted(&self) -> bool {
        !self.inner.scope.is_disposed()
    }

    pub fn render_count(&self) -> u64 {
        self.inner.renders.get()
    }

    pub fn slot_count(&self) -> usize {
        self.inner.composer.borrow().slot_count()
    }

    pub fn render<R>(&self, f: impl FnOnce() -> R) -> R {
        if !self.is_mounted() {
            log::warn!(
                "instance {}: render after unmount; effects will not run",
                self.inner.id
            );
            return f();
        }

        let out = {
            let _guard = RenderGuard::enter(self.inner.clone());
            f()
        };
        self.commit();
        out
    }

    /// Renders only when some local state changed since the last render.
    pub fn rerender_if_dirty<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        if self.is_dirty() {
            Some(self.render(f))
        } else {
            None
        }
    }

    /// Runs every live effect cleanup. Safe to call more than once.
    pub fn unmount(&self) {
        if self.is_mounted() {
            log::debug!("instance {}: unmount", self.inner.id);
        }
        self.inner.scope.dispose();
    }

    fn commit(&self) {
        let pending = std::mem::take(&mut self.inner.composer.borrow_mut().pending);
        for effect in pending {
            // An effect may unmount its own instance.
            if !self.is_mounted() {
                break;
            }
            effect();
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.inner.id)
            .field("dirty", &self.is_dirty())
            .field("mounted", &self.is_mounted())
            .field("renders", &self.render_count())
            .finish()
    }
}

struct RenderGuard;

impl RenderGuard {
    fn enter(inner: Rc<InstanceInner>) -> Self {
        inner.composer.borrow_mut().cursor = 0;
        inner.dirty.set(false);
        inner.renders.set(inner.renders.get() + 1);
        CURRENT.with(|c| c.borrow_mut().push(inner));
        RenderGuard
    }
}

impl Drop for RenderGuard {
    fn drop(&mut self) {
        CURRENT.with(|c| {
            c.borrow_mut().pop();
        });
    }
}

pub(crate) fn current_instance() -> Option<Rc<InstanceInner>> {
    CURRENT.with(|c| c.borrow().last().cloned())
}

/// True while some instance is rendering on this thread.
pub fn in_render() -> bool {
    CURRENT.with(|c| !c.borrow().is_empty())
}

/// Slot-based remember (sequential composition only).
///
/// The Nth call during a render returns the value stored in the Nth slot of
/// the rendering instance.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let Some(inst) = current_instance() else {
        log::warn!("remember: called outside of a render; value will not be kept");
        return Rc::new(init());
    };

    let cursor = {
        let mut c = inst.composer.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;

        if let Some(slot) = c.slots.get(cursor) {
            if let Some(rc) = slot.downcast_ref::<Rc<T>>() {
                return rc.clone();
            }
            log::warn!(
                "remember: slot {} of instance {} changed type; replacing. \
                 Hooks must be called in the same order on every render.",
                cursor,
                inst.id
            );
        }
        cursor
    };

    // `init` may itself call `remember`, so the composer is not borrowed here.
    let rc: Rc<T> = Rc::new(init());
    let mut c = inst.composer.borrow_mut();
    if cursor < c.slots.len() {
        c.slots[cursor] = Box::new(rc.clone());
    } else {
        c.slots.push(Box::new(rc.clone()));
    }
    rc
}

/// Registers `f` to run when the rendering instance unmounts.
pub fn on_dispose(f: impl FnOnce() + 'static) {
    match current_instance() {
        Some(inst) => inst.scope.add_disposer(f),
        None => log::warn!("on_dispose: called outside of a render; disposer dropped"),
    }
}

/// Queues `effect` for the effect phase of the rendering instance.
pub(crate) fn schedule_effect(effect: impl FnOnce() + 'static) {
    match current_instance() {
        Some(inst) => inst.composer.borrow_mut().pending.push(Box::new(effect)),
        None => {
            // Nothing would own the cleanup, so the effect is dropped unrun.
            drop(effect);
            log::warn!("schedule_effect: called outside of a render; effect dropped");
        }
    }
}
