//! Cart line item type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One line of the customer's cart, as returned by the API.
///
/// The client never computes prices or totals, so the line is kept as the
/// JSON object the API sent. Accessors cover the fields the CLI displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItem(Value);

impl CartItem {
    /// Wrap a raw JSON line.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Look up a top-level field of the line.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The product this line refers to (`productId`), rendered as a string.
    #[must_use]
    pub fn product_id(&self) -> Option<String> {
        match self.field("productId")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Ordered quantity, if the API sent a non-negative integer.
    #[must_use]
    pub fn quantity(&self) -> Option<u64> {
        self.field("quantity").and_then(Value::as_u64)
    }

    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for CartItem {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_accessors() {
        let item = CartItem::new(json!({"productId": "p-1", "quantity": 3, "subtotal": 299.5}));
        assert_eq!(item.product_id().as_deref(), Some("p-1"));
        assert_eq!(item.quantity(), Some(3));
        assert_eq!(item.field("subtotal"), Some(&json!(299.5)));

        let numeric = CartItem::new(json!({"productId": 12}));
        assert_eq!(numeric.product_id().as_deref(), Some("12"));
        assert_eq!(numeric.quantity(), None);
    }

    #[test]
    fn test_keeps_unknown_shape() {
        let item = CartItem::new(json!({"id": 1}));
        assert_eq!(item.as_value(), &json!({"id": 1}));
        assert!(item.product_id().is_none());
    }
}
