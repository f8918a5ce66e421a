//! Request payloads for the account endpoints.
//!
//! Passwords are held as [`SecretString`] and only exposed while the payload
//! is serialized into a request body.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::email::Email;

/// Login form: `POST /users/login`.
#[derive(Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(email: Email, password: impl Into<String>) -> Self {
        Self {
            email,
            password: SecretString::from(password.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Serialize for Credentials {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Credentials", 2)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.end()
    }
}

/// Registration form: `POST /users/register`.
#[derive(Clone)]
pub struct RegisterPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub mobile_no: String,
    pub password: SecretString,
}

impl fmt::Debug for RegisterPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterPayload")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("mobile_no", &self.mobile_no)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Serialize for RegisterPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RegisterPayload", 5)?;
        state.serialize_field("firstName", &self.first_name)?;
        state.serialize_field("lastName", &self.last_name)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("mobileNo", &self.mobile_no)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.end()
    }
}

/// Partial profile edit: `PATCH /users/profile`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_no: Option<String>,
}

impl ProfileUpdate {
    /// True when no field would be sent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.mobile_no.is_none()
    }
}
