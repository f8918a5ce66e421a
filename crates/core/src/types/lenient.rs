//! Forgiving field deserializers for token claims and the cached user.
//!
//! Claims come from whatever the API put in the token. A field that is
//! `null` or of an unexpected JSON type falls back to its default instead of
//! failing the whole decode.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::id::UserId;

/// JavaScript-style truthiness: `null`, `false`, `0` and `""` are false.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text field: strings pass through, numbers and booleans are rendered,
/// anything else becomes empty.
pub(crate) mod string {
    use super::{Deserialize, Deserializer, Value};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
        })
    }
}

/// Flag field, coerced by truthiness.
pub(crate) mod truthy {
    use super::{Deserialize, Deserializer, Value, is_truthy};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(is_truthy(&Value::deserialize(deserializer)?))
    }
}

/// Identifier field: integers and strings are kept, anything else is absent.
pub(crate) mod user_id {
    use super::{Deserialize, Deserializer, UserId, Value};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<UserId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => Some(
                n.as_i64()
                    .map_or_else(|| UserId::Text(n.to_string()), UserId::Numeric),
            ),
            Value::String(s) => Some(UserId::Text(s)),
            _ => None,
        })
    }
}

/// Unix timestamp field: integral seconds, fractions truncated, anything
/// else absent.
pub(crate) mod timestamp {
    use super::{Deserialize, Deserializer, Value};

    #[allow(clippy::cast_possible_truncation)]
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        })
    }
}
