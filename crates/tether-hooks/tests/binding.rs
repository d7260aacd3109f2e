use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Value, json};
use tether_core::Instance;
use tether_hooks::testing::{RecordingStore, StoreEvent};
use tether_hooks::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn path(s: &str) -> PropertyPath {
    PropertyPath::new(s).unwrap()
}

fn json_store() -> Rc<RecordingStore<Value>> {
    Rc::new(RecordingStore::new())
}

type Calls<A> = Rc<RefCell<Vec<Vec<A>>>>;

fn recorder<A: Clone + 'static>() -> (Calls<A>, impl Fn(&[A]) + 'static) {
    let calls: Calls<A> = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    (calls, move |args: &[A]| sink.borrow_mut().push(args.to_vec()))
}

#[test]
fn initial_value_is_returned_before_any_notification() {
    init_logger();
    let store = json_store();
    let hook = BindingConfig::new(store.clone(), path("count"))
        .initial_value(json!(0))
        .build();
    let inst = Instance::new();

    assert_eq!(
        inst.render(|| hook.use_value(HookOptions::default())),
        Observed::Value(json!(0))
    );
}

#[test]
fn cart_falls_back_after_undefined() {
    init_logger();
    let store = json_store();
    let cart = BindingConfig::new(store.clone(), path("cart"))
        .initial_value(json!([]))
        .build();
    let inst = Instance::new();
    let render = || inst.render(|| cart.use_value(HookOptions::default()));

    assert_eq!(render(), Observed::Value(json!([])));

    store.set("cart", json!([{"id": 1}]));
    assert!(inst.is_dirty());
    assert_eq!(render(), Observed::Value(json!([{"id": 1}])));

    store.remove("cart");
    assert_eq!(render(), Observed::Value(json!([])));
}

#[test]
fn undefined_without_fallback_is_no_value() {
    let store = json_store();
    let hook = BindingConfig::new(store.clone(), path("user")).build();
    let inst = Instance::new();
    let render = || inst.render(|| hook.use_value(HookOptions::default()));

    render();
    store.set("user", json!("ada"));
    assert_eq!(render(), Observed::Value(json!("ada")));
    store.remove("user");
    assert_eq!(render(), Observed::NoValue);
}

#[test]
fn null_overrides_fallback() {
    let store = json_store();
    let hook = BindingConfig::new(store.clone(), path("cart"))
        .initial_value(json!([]))
        .build();
    let inst = Instance::new();
    let render = || inst.render(|| hook.use_value(HookOptions::default()));

    render();
    store.set("cart", Value::Null);
    assert_eq!(render(), Observed::Value(Value::Null));
}

#[test]
fn every_subscribe_is_released_exactly_once() {
    let store = json_store();
    let (calls, action) = recorder::<u32>();
    let hook = BindingConfig::new(store.clone(), path("orders"))
        .action(action)
        .build();
    let inst = Instance::new();
    let render = |args: Vec<u32>| inst.render(|| hook.use_value(HookOptions::new().action_args(args)));

    render(vec![1]);
    render(vec![1]);
    render(vec![2]);
    inst.unmount();
    inst.unmount();

    assert_eq!(
        store.events(),
        vec![
            StoreEvent::Subscribed("orders".into()),
            StoreEvent::Unsubscribed("orders".into()),
            StoreEvent::Subscribed("orders".into()),
            StoreEvent::Unsubscribed("orders".into()),
        ]
    );
    assert_eq!(*calls.borrow(), vec![vec![1], vec![2]]);
    assert_eq!(store.subscriber_count(None), 0);
}

#[test]
fn equal_argument_lists_do_not_reactivate() {
    let store = json_store();
    let (calls, action) = recorder::<String>();
    let hook = BindingConfig::new(store.clone(), path("search"))
        .action(action)
        .build();
    let inst = Instance::new();

    for _ in 0..3 {
        // A fresh Vec each render, equal by value.
        inst.render(|| {
            hook.use_value(HookOptions::new().action_args(vec!["shoes".to_string()]))
        });
    }

    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(store.subscribe_calls(), vec!["search"]);
}

#[test]
fn disabled_action_still_subscribes() {
    let store = json_store();
    let (calls, action) = recorder::<u32>();
    let hook = BindingConfig::new(store.clone(), path("profile"))
        .action(action)
        .build();
    let inst = Instance::new();

    inst.render(|| hook.use_value(HookOptions::new().invoke_action(false)));
    inst.render(|| hook.use_value(HookOptions::new().invoke_action(false).action_args([1])));
    inst.render(|| hook.use_value(HookOptions::new().invoke_action(false).action_args([2])));

    assert!(calls.borrow().is_empty());
    assert_eq!(store.subscribe_calls(), vec!["profile"; 3]);
    assert_eq!(store.subscriber_count(Some("profile")), 1);
}

#[test]
fn toggling_invoke_action_reactivates() {
    let store = json_store();
    let (calls, action) = recorder::<u32>();
    let hook = BindingConfig::new(store.clone(), path("profile"))
        .action(action)
        .build();
    let inst = Instance::new();

    inst.render(|| hook.use_value(HookOptions::new().invoke_action(false)));
    inst.render(|| hook.use_value(HookOptions::new().invoke_action(true)));

    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(store.subscribe_calls().len(), 2);
}

#[test]
fn action_runs_before_subscribe() {
    let store = Rc::new(RecordingStore::<Value>::new().replay_on_subscribe(true));
    let hook = {
        let store = store.clone();
        BindingConfig::new(store.clone(), path("catalog"))
            .action(move |_: &[()]| {
                // The store has no subscriber for `catalog` yet.
                assert_eq!(store.subscriber_count(Some("catalog")), 0);
                store.set("catalog", json!(["tea"]));
            })
            .build()
    };
    let inst = Instance::new();

    assert_eq!(
        inst.render(|| hook.use_value(HookOptions::default())),
        Observed::NoValue
    );
    assert_eq!(store.get("catalog"), Some(json!(["tea"])));
    // The replayed value arrived with the first notification.
    assert!(inst.is_dirty());
    assert_eq!(
        inst.render(|| hook.use_value(HookOptions::default())),
        Observed::Value(json!(["tea"]))
    );
}

#[test]
fn instances_from_one_factory_are_independent() {
    let store = json_store();
    let hook = BindingConfig::new(store.clone(), path("cart"))
        .initial_value(json!([]))
        .build();
    let a = Instance::new();
    let b = Instance::new();

    a.render(|| hook.use_value(HookOptions::default()));
    b.render(|| hook.use_value(HookOptions::default()));
    assert_eq!(store.subscriber_count(Some("cart")), 2);

    b.unmount();
    store.set("cart", json!([1]));

    assert!(a.is_dirty());
    assert!(!b.is_dirty());
    assert_eq!(
        a.render(|| hook.use_value(HookOptions::default())),
        Observed::Value(json!([1]))
    );
    assert_eq!(store.unsubscribe_calls(), vec!["cart"]);
}

#[test]
fn keyed_hook_is_inert_without_a_key() {
    let store = json_store();
    let (calls, action) = recorder::<()>();
    let hook = BindingConfig::new(store.clone(), path("product"))
        .action(action)
        .build_keyed();
    let inst = Instance::new();

    for _ in 0..4 {
        assert_eq!(
            inst.render(|| hook.use_value(KeyedOptions::default())),
            Observed::NoValue
        );
    }

    assert!(store.events().is_empty());
    assert!(calls.borrow().is_empty());

    inst.unmount();
    assert!(store.events().is_empty());
}

#[test]
fn keyed_hook_idle_returns_fallback() {
    let store = json_store();
    let hook = BindingConfig::new(store.clone(), path("product"))
        .initial_value(json!({}))
        .build_keyed();
    let inst = Instance::new();

    assert_eq!(
        inst.render(|| hook.use_value(KeyedOptions::default())),
        Observed::Value(json!({}))
    );
}

#[test]
fn keyed_hook_activates_when_key_arrives() {
    init_logger();
    let store = json_store();
    let (calls, action) = recorder::<()>();
    let hook = BindingConfig::new(store.clone(), path("product"))
        .action(action)
        .build_keyed();
    let inst = Instance::new();

    let first = inst.render(|| hook.use_value(KeyedOptions::default()));
    assert_eq!(first, Observed::NoValue);
    assert!(store.subscribe_calls().is_empty());

    inst.render(|| hook.use_value(KeyedOptions::new().key("sku-1")));
    assert_eq!(store.subscribe_calls(), vec!["product.sku-1"]);
    assert_eq!(*calls.borrow(), vec![Vec::<()>::new()]);

    store.set("product.sku-1", json!({"price": 3}));
    assert_eq!(
        inst.render(|| hook.use_value(KeyedOptions::new().key("sku-1"))),
        Observed::Value(json!({"price": 3}))
    );
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn keyed_hook_moves_subscription_on_key_change() {
    let store = json_store();
    let (calls, action) = recorder::<u32>();
    let hook = BindingConfig::new(store.clone(), path("product"))
        .action(action)
        .build_keyed();
    let inst = Instance::new();
    let opts = |key: &str| KeyedOptions::new().key(key).action_args([7]);

    inst.render(|| hook.use_value(opts("k1")));
    inst.render(|| hook.use_value(opts("k2")));

    assert_eq!(
        store.events(),
        vec![
            StoreEvent::Subscribed("product.k1".into()),
            StoreEvent::Unsubscribed("product.k1".into()),
            StoreEvent::Subscribed("product.k2".into()),
        ]
    );
    assert_eq!(*calls.borrow(), vec![vec![7], vec![7]]);

    // Only the live key reaches this instance.
    store.set("product.k1", json!("stale"));
    assert!(!inst.is_dirty());
    store.set("product.k2", json!("fresh"));
    assert!(inst.is_dirty());

    inst.unmount();
    assert_eq!(store.unsubscribe_calls(), vec!["product.k1", "product.k2"]);
}

#[test]
fn keyed_hook_without_invoke_skips_action_on_key_change() {
    let store = json_store();
    let (calls, action) = recorder::<()>();
    let hook = BindingConfig::new(store.clone(), path("product"))
        .action(action)
        .build_keyed();
    let inst = Instance::new();

    inst.render(|| hook.use_value(KeyedOptions::new().key(1).invoke_action(false)));
    inst.render(|| hook.use_value(KeyedOptions::new().key(2).invoke_action(false)));

    assert!(calls.borrow().is_empty());
    assert_eq!(store.subscribe_calls(), vec!["product.1", "product.2"]);
}

#[test]
fn keyed_hook_returns_to_idle_when_key_clears() {
    let store = json_store();
    let (calls, action) = recorder::<()>();
    let hook = BindingConfig::new(store.clone(), path("product"))
        .action(action)
        .build_keyed();
    let inst = Instance::new();

    inst.render(|| hook.use_value(KeyedOptions::new().key("a")));
    store.set("product.a", json!(1));
    inst.render(|| hook.use_value(KeyedOptions::new().key("a")));

    let idle = inst.render(|| hook.use_value(KeyedOptions::default()));
    // Torn down without a new subscription; the last delivered value stays.
    assert_eq!(idle, Observed::Value(json!(1)));
    assert_eq!(store.subscriber_count(None), 0);
    assert_eq!(calls.borrow().len(), 1);

    inst.unmount();
    assert_eq!(store.unsubscribe_calls(), vec!["product.a"]);
}

#[test]
fn render_after_unmount_does_not_subscribe() {
    init_logger();
    let store = json_store();
    let (calls, action) = recorder::<()>();
    let hook = BindingConfig::new(store.clone(), path("cart"))
        .action(action)
        .build();
    let inst = Instance::new();

    inst.render(|| hook.use_value(HookOptions::default()));
    inst.unmount();
    inst.render(|| hook.use_value(HookOptions::default()));
    inst.render(|| hook.use_value(HookOptions::new().invoke_action(false)));
    inst.unmount();

    assert_eq!(
        store.events(),
        vec![
            StoreEvent::Subscribed("cart".into()),
            StoreEvent::Unsubscribed("cart".into()),
        ]
    );
    assert_eq!(store.subscriber_count(None), 0);
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn hook_called_outside_a_render_does_not_subscribe() {
    let store = json_store();
    let hook = BindingConfig::new(store.clone(), path("cart"))
        .initial_value(json!([]))
        .build();

    assert_eq!(hook.use_value(HookOptions::default()), Observed::Value(json!([])));
    assert!(store.events().is_empty());
    assert_eq!(store.subscriber_count(None), 0);
}

#[test]
fn wrapped_hook_releases_before_resubscribing_and_on_unmount() {
    let store = json_store();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let hook = {
        let calls = calls.clone();
        WrappedHook::new(
            store.clone(),
            move |page: Option<&u32>| calls.borrow_mut().push(page.copied()),
            path("feed"),
        )
    };
    let inst = Instance::new();

    inst.render(|| hook.use_value(Some(1)));
    inst.render(|| hook.use_value(Some(2)));
    assert_eq!(store.subscriber_count(Some("feed")), 1);

    inst.unmount();

    assert_eq!(
        store.events(),
        vec![
            StoreEvent::Subscribed("feed".into()),
            StoreEvent::Unsubscribed("feed".into()),
            StoreEvent::Subscribed("feed".into()),
            StoreEvent::Unsubscribed("feed".into()),
        ]
    );
    assert_eq!(store.subscriber_count(None), 0);
    assert_eq!(*calls.borrow(), vec![Some(1), Some(2)]);

    store.set("feed", json!(["late"]));
    assert!(!inst.is_dirty());
}
