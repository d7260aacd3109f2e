use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tether_core::Instance;
use tether_hooks::testing::RecordingStore;
use tether_hooks::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct CartItem {
    id: u32,
    qty: u32,
}

type Shop = RecordingStore<Value>;

fn cart_badge(cart: &ActionHook<Shop>) -> String {
    let items: Vec<CartItem> = cart
        .use_value(HookOptions::default())
        .into_option()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();
    let total: u32 = items.iter().map(|i| i.qty).sum();
    format!("Cart ({total})")
}

fn product_card(product: &KeyedActionHook<Shop, String>, sku: Option<&str>) -> String {
    let opts = KeyedOptions::new()
        .maybe_key(sku.map(Key::from))
        .action_args(["en".to_string()]);
    match product.use_value(opts) {
        Observed::Value(p) => format!(
            "{}: {}",
            p["name"].as_str().unwrap_or("unnamed"),
            p["price"]
        ),
        Observed::NoValue => "loading...".to_string(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let shop = Rc::new(Shop::new());

    let cart = BindingConfig::new(shop.clone(), PropertyPath::new("cart")?)
        .initial_value(json!([]))
        .build();

    let product = {
        let shop = shop.clone();
        BindingConfig::new(shop.clone(), PropertyPath::new("product")?)
            .action(move |args: &[String]| {
                // Stands in for a fetch: writes the catalog entry for "sku-1".
                log::info!("loading product (locale {:?})", args.first());
                shop.set(
                    "product.sku-1",
                    json!({"name": "Green tea", "price": 4.5}),
                );
            })
            .build_keyed()
    };

    let header = Instance::new();
    let card = Instance::new();

    log::info!("{}", header.render(|| cart_badge(&cart)));
    log::info!("{}", card.render(|| product_card(&product, None)));
    log::info!("{}", card.render(|| product_card(&product, Some("sku-1"))));

    shop.set("product.sku-1", json!({"name": "Green tea", "price": 3.9}));
    if let Some(line) = card.rerender_if_dirty(|| product_card(&product, Some("sku-1"))) {
        log::info!("{line}");
    }

    let items = vec![CartItem { id: 1, qty: 2 }, CartItem { id: 7, qty: 1 }];
    shop.set("cart", serde_json::to_value(&items)?);
    if let Some(line) = header.rerender_if_dirty(|| cart_badge(&cart)) {
        log::info!("{line}");
    }

    shop.remove("cart");
    if let Some(line) = header.rerender_if_dirty(|| cart_badge(&cart)) {
        log::info!("{line}");
    }

    card.unmount();
    header.unmount();
    Ok(())
}
