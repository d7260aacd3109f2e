//! A recording, flat-keyed [`Store`] for tests and demos.
//!
//! Values live under their full path string (`"product.sku-1"` is one
//! entry, not a nested lookup). `set`/`remove` notify exact-path subscribers
//! synchronously, and every subscribe/unsubscribe is appended to an event log.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use slotmap::SlotMap;
use tether_core::Dispose;

use crate::{Notify, PropertyPath, Store};

slotmap::new_key_type! {
    pub struct SubscriberKey;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    Subscribed(String),
    Unsubscribed(String),
}

struct Subscriber<V> {
    path: PropertyPath,
    notify: Notify<V>,
}

struct Inner<V> {
    values: HashMap<String, V>,
    subscribers: SlotMap<SubscriberKey, Subscriber<V>>,
    events: Vec<StoreEvent>,
    replay: bool,
}

pub struct RecordingStore<V> {
    inner: Rc<RefCell<Inner<V>>>,
}

impl<V: Clone + 'static> RecordingStore<V> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                values: HashMap::new(),
                subscribers: SlotMap::with_key(),
                events: Vec::new(),
                replay: false,
            })),
        }
    }

    /// When on, a new subscriber is immediately sent the current value
    /// (`None` if the path is unset).
    pub fn replay_on_subscribe(self, on: bool) -> Self {
        self.inner.borrow_mut().replay = on;
        self
    }

    pub fn get(&self, path: &str) -> Option<V> {
        self.inner.borrow().values.get(path).cloned()
    }

    pub fn set(&self, path: &str, value: V) {
        self.inner
            .borrow_mut()
            .values
            .insert(path.to_string(), value.clone());
        self.notify(path, Some(value));
    }

    /// Unsets `path` and notifies its subscribers with undefined.
    pub fn remove(&self, path: &str) {
        self.inner.borrow_mut().values.remove(path);
        self.notify(path, None);
    }

    pub fn events(&self) -> Vec<StoreEvent> {
        self.inner.borrow().events.clone()
    }

    /// Paths passed to `subscribe`, in call order.
    pub fn subscribe_calls(&self) -> Vec<String> {
        self.inner
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                StoreEvent::Subscribed(p) => Some(p.clone()),
                StoreEvent::Unsubscribed(_) => None,
            })
            .collect()
    }

    /// Paths unsubscribed, in call order.
    pub fn unsubscribe_calls(&self) -> Vec<String> {
        self.inner
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                StoreEvent::Unsubscribed(p) => Some(p.clone()),
                StoreEvent::Subscribed(_) => None,
            })
            .collect()
    }

    /// Number of live subscriptions, optionally restricted to one path.
    pub fn subscriber_count(&self, path: Option<&str>) -> usize {
        self.inner
            .borrow()
            .subscribers
            .values()
            .filter(|s| path.is_none_or(|p| s.path.as_str() == p))
            .count()
    }

    fn notify(&self, path: &str, value: Option<V>) {
        // Collect first: a callback may touch the store again.
        let targets: Vec<Notify<V>> = self
            .inner
            .borrow()
            .subscribers
            .values()
            .filter(|s| s.path.as_str() == path)
            .map(|s| s.notify.clone())
            .collect();
        for notify in targets {
            notify(value.clone());
        }
    }
}

impl<V: Clone + 'static> Default for RecordingStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + 'static> Store for RecordingStore<V> {
    type Value = V;

    fn subscribe(&self, path: &PropertyPath, notify: Notify<V>) -> Dispose {
        let (key, replay) = {
            let mut inner = self.inner.borrow_mut();
            inner
                .events
                .push(StoreEvent::Subscribed(path.as_str().to_string()));
            let key = inner.subscribers.insert(Subscriber {
                path: path.clone(),
                notify: notify.clone(),
            });
            let replay = inner
                .replay
                .then(|| inner.values.get(path.as_str()).cloned());
            (key, replay)
        };

        if let Some(current) = replay {
            notify(current);
        }

        let inner: Weak<RefCell<Inner<V>>> = Rc::downgrade(&self.inner);
        Dispose::new(move || {
            if let Some(inner) = inner.upgrade() {
                let mut inner = inner.borrow_mut();
                if let Some(sub) = inner.subscribers.remove(key) {
                    inner
                        .events
                        .push(StoreEvent::Unsubscribed(sub.path.as_str().to_string()));
                }
            }
        })
    }
}
