//! Unified error type for front ends.
//!
//! Each layer has its own error enum; [`ClientError`] gathers them so a
//! front end can use a single `Result` type and `?` across layers.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::router::NavigationError;
use crate::stores::SessionError;

/// Any error the client library can report.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// An API request failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Login failed.
    #[error("Login failed: {0}")]
    Session(#[from] SessionError),

    /// Navigation failed.
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Invalid input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ClientError {
    /// True when the API rejected the caller's credentials or token.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        let api = match self {
            Self::Api(err) | Self::Session(SessionError::Api(err)) => err,
            _ => return false,
        };
        matches!(api.status_code(), Some(401 | 403))
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::BadRequest("nothing to update".to_string());
        assert_eq!(err.to_string(), "Bad request: nothing to update");

        let err = ClientError::from(NavigationError::NotFound("/nope".to_string()));
        assert_eq!(err.to_string(), "Navigation error: no route matches /nope");

        let err = ClientError::from(SessionError::MissingAccessToken);
        assert_eq!(
            err.to_string(),
            "Login failed: login response did not contain an access token"
        );
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ClientError::from(ApiError::status(401, "")).is_unauthorized());
        assert!(
            ClientError::from(SessionError::Api(ApiError::status(403, ""))).is_unauthorized()
        );
        assert!(!ClientError::from(ApiError::status(500, "")).is_unauthorized());
        assert!(!ClientError::BadRequest(String::new()).is_unauthorized());
    }
}
