//! Session store.
//!
//! Holds the access token and the identity decoded from it, mirrors both
//! into durable storage, and forwards account requests to the API.
//!
//! # Lifecycle
//!
//! - [`SessionStore::restore`] at startup (no network)
//! - [`SessionStore::login`] sets token and user together
//! - [`SessionStore::logout`] clears both
//!
//! Nothing else mutates the session. In particular
//! [`SessionStore::update_profile`] leaves the cached user as it was until
//! the next login.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use shopfront_core::{
    AccessToken, Credentials, DecodeError, ProfileUpdate, Session, SessionUser, decode_claims,
};

use crate::api::{Api, ApiError, ApiResponse, endpoints};
use crate::storage::{Storage, keys};

/// Errors that can occur during login.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The login request failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The login response had no `access` token.
    #[error("login response did not contain an access token")]
    MissingAccessToken,

    /// The access token could not be decoded.
    #[error("could not decode access token: {0}")]
    Decode(#[from] DecodeError),

    /// The decoded user could not be encoded for storage.
    #[error("could not encode session user: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Authentication state plus the operations that change it.
pub struct SessionStore {
    api: Arc<dyn Api>,
    storage: Arc<dyn Storage>,
    session: Session,
}

impl SessionStore {
    /// Build the store from whatever durable storage holds.
    ///
    /// The session is restored only when both the token and a well-formed
    /// user record are present; anything else starts unauthenticated.
    #[must_use]
    pub fn restore(api: Arc<dyn Api>, storage: Arc<dyn Storage>) -> Self {
        let session = read_session(storage.as_ref());
        debug!(
            authenticated = session.is_authenticated(),
            "Session restored from storage"
        );
        Self {
            api,
            storage,
            session,
        }
    }

    /// Current session snapshot.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    #[must_use]
    pub fn token(&self) -> Option<&AccessToken> {
        self.session.token()
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.session.user()
    }

    /// Create an account.
    ///
    /// The response is returned as-is; the session is not touched.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the payload cannot be encoded or the request fails.
    #[instrument(skip_all)]
    pub async fn register<P>(&self, payload: &P) -> Result<ApiResponse, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_value(payload).map_err(ApiError::Encode)?;
        self.api.post(endpoints::REGISTER, body).await
    }

    /// Log in and commit the resulting session.
    ///
    /// The token is decoded before anything is written, so on error the
    /// session and storage are exactly as they were. Surrounding whitespace
    /// is stripped from `access`; the stripped value is what gets decoded,
    /// stored and later sent as the bearer token.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` if the request fails,
    /// `SessionError::MissingAccessToken` if the response has no token, and
    /// `SessionError::Decode` if the token is not a readable JWT.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&mut self, credentials: &Credentials) -> Result<ApiResponse, SessionError> {
        let body = serde_json::to_value(credentials).map_err(ApiError::Encode)?;
        let response = self.api.post(endpoints::LOGIN, body).await?;

        let access = response
            .data
            .get("access")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(SessionError::MissingAccessToken)?;

        let user = SessionUser::from(decode_claims(access)?);
        let user_json = serde_json::to_string(&user)?;

        info!(user_id = ?user.id, is_admin = user.is_admin, "Logged in");

        self.storage.set_item(keys::TOKEN, access);
        self.storage.set_item(keys::USER, &user_json);
        self.session = Session::authenticated(AccessToken::new(access), user);

        Ok(response)
    }

    /// Send a partial profile update.
    ///
    /// The cached user is deliberately left unchanged; callers that need
    /// the new values must log in again.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the payload cannot be encoded or the request fails.
    #[instrument(skip_all)]
    pub async fn update_profile(&self, fields: &ProfileUpdate) -> Result<ApiResponse, ApiError> {
        let body = serde_json::to_value(fields).map_err(ApiError::Encode)?;
        self.api.patch(endpoints::PROFILE, body).await
    }

    /// Clear the session in memory and in storage.
    pub fn logout(&mut self) {
        if let Some(user) = self.session.user() {
            info!(user_id = ?user.id, "Logged out");
        }
        self.session = Session::empty();
        self.storage.remove_item(keys::TOKEN);
        self.storage.remove_item(keys::USER);
    }
}

/// Read a session from storage, falling back to empty on any inconsistency.
fn read_session(storage: &dyn Storage) -> Session {
    let token = storage.get_item(keys::TOKEN).filter(|t| !t.is_empty());
    let user_json = storage.get_item(keys::USER);

    match (token, user_json) {
        (Some(token), Some(user_json)) => match serde_json::from_str::<SessionUser>(&user_json) {
            Ok(user) => Session::authenticated(AccessToken::new(token), user),
            Err(e) => {
                warn!(error = %e, "Stored user record is malformed; starting signed out");
                Session::empty()
            }
        },
        (Some(_), None) => {
            warn!("Stored token has no user record; starting signed out");
            Session::empty()
        }
        _ => Session::empty(),
    }
}
