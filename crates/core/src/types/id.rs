//! User identifiers carried inside access tokens.
//!
//! The storefront API is free to issue numeric or string identifiers (e.g. a
//! database sequence or a document ID). [`UserId`] keeps whichever form the
//! token used so a persisted session restores byte-for-byte.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a storefront user as issued by the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    /// Integer identifier, e.g. `7`.
    Numeric(i64),
    /// Opaque string identifier, e.g. `"64f1c0ffee"`.
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}
