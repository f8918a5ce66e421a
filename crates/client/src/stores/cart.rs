//! Cart store.
//!
//! Holds the cart lines last fetched from the API. Fetching is fail-soft:
//! any error empties the cart instead of surfacing to the caller, and the
//! previous contents are discarded rather than kept around as stale data.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use shopfront_core::{CartItem, is_truthy};

use crate::api::{Api, endpoints};

/// Cart lines fetched on demand.
pub struct CartStore {
    api: Arc<dyn Api>,
    items: Vec<CartItem>,
}

impl CartStore {
    /// An empty cart; nothing is fetched until [`CartStore::fetch_cart`].
    #[must_use]
    pub fn new(api: Arc<dyn Api>) -> Self {
        Self {
            api,
            items: Vec::new(),
        }
    }

    /// Replace the cart with the API's current view.
    ///
    /// Never fails: on any error the cart becomes empty.
    #[instrument(skip_all)]
    pub async fn fetch_cart(&mut self) {
        match self.api.get(endpoints::CART).await {
            Ok(response) => {
                self.items = extract_items(&response.data);
                debug!(count = self.items.len(), "Cart fetched");
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch cart; showing an empty cart");
                self.items.clear();
            }
        }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of cart lines.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

/// Accept `{cart: {cartItems}}` or a flat `{cartItems}`.
fn extract_items(data: &Value) -> Vec<CartItem> {
    let cart = data.get("cart").filter(|cart| is_truthy(cart)).unwrap_or(data);

    match cart.get("cartItems") {
        Some(Value::Array(items)) => items.iter().cloned().map(CartItem::new).collect(),
        Some(other) if is_truthy(other) => {
            warn!("Cart response has a non-array cartItems field; treating as empty");
            Vec::new()
        }
        _ => Vec::new(),
    }
}
