//! Cart command: fetch the cart and list its lines.

use serde_json::Value;

use shopfront_client::state::AppContext;
use shopfront_core::CartItem;

/// One display line for a cart item.
fn describe(item: &CartItem) -> String {
    let product = item.product_id().unwrap_or_else(|| "?".to_string());
    let name = item
        .field("name")
        .or_else(|| item.field("productName"))
        .and_then(Value::as_str)
        .unwrap_or("(unnamed)");
    match item.quantity() {
        Some(qty) => format!("{qty} x {name} [{product}]"),
        None => format!("{name} [{product}]"),
    }
}

/// Fetch and print the cart. A failed fetch shows as an empty cart.
#[allow(clippy::print_stdout)]
pub async fn show(ctx: &mut AppContext) {
    if !ctx.session().is_authenticated() {
        tracing::warn!("Not signed in; the API will likely refuse the cart request");
    }

    ctx.cart_mut().fetch_cart().await;

    let cart = ctx.cart();
    println!("{} item(s) in cart", cart.count());
    for item in cart.items() {
        println!("  {}", describe(item));
    }
}
