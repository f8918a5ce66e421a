//! Access token wrapper.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Opaque bearer token returned by the login endpoint.
///
/// Held as a [`SecretString`] so it never shows up in `Debug` output or logs.
/// Call [`AccessToken::expose`] only where the raw value must leave the
/// process (the `Authorization` header, durable storage).
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Returns the raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

impl PartialEq for AccessToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for AccessToken {}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}
