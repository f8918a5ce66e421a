//! Storefront API access.
//!
//! # Architecture
//!
//! - [`Api`] is the seam between the stores and the network: `get`, `post`
//!   and `patch` returning the decoded JSON body
//! - [`HttpApi`] implements it with `reqwest`, resolving paths against the
//!   configured base URL and attaching the stored bearer token
//! - Tests substitute in-memory fakes
//!
//! # Endpoints
//!
//! The client only touches four endpoints, listed in [`endpoints`].

mod http;

pub use http::HttpApi;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// API paths used by the stores, relative to the base URL.
pub mod endpoints {
    pub const REGISTER: &str = "/users/register";
    pub const LOGIN: &str = "/users/login";
    pub const PROFILE: &str = "/users/profile";
    pub const CART: &str = "/cart/get-cart";
}

/// Maximum number of response body characters kept in a status error.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Errors that can occur when calling the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {}", summarize_body(.body))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The request body could not be serialized.
    #[error("request encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The path could not be resolved against the base URL.
    #[error("invalid request path '{path}': {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },
}

impl ApiError {
    /// Build a status error, truncating long bodies.
    #[must_use]
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        }
    }

    /// HTTP status code, if the API answered.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull a human readable message out of an error body.
///
/// The API reports failures as `{"message": "..."}` or `{"error": "..."}`;
/// anything else is shown verbatim.
fn summarize_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "error"]
                .iter()
                .find_map(|key| json.get(key).and_then(Value::as_str).map(str::to_owned))
        })
        .unwrap_or_else(|| {
            if body.is_empty() {
                "(empty body)".to_string()
            } else {
                body.to_string()
            }
        })
}

/// A successful API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded JSON body; `Null` when the body was empty.
    pub data: Value,
}

impl ApiResponse {
    #[must_use]
    pub const fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }
}

/// HTTP access to the storefront API.
///
/// Each method performs exactly one request.
#[async_trait]
pub trait Api: Send + Sync {
    async fn get(&self, path: &str) -> Result<ApiResponse, ApiError>;

    async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError>;

    async fn patch(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_uses_message_field() {
        let err = ApiError::status(401, r#"{"message":"Invalid credentials"}"#);
        assert_eq!(err.to_string(), "API returned 401: Invalid credentials");
        assert_eq!(err.status_code(), Some(401));
    }

    #[test]
    fn test_status_error_falls_back_to_error_field_and_raw_body() {
        let err = ApiError::status(400, r#"{"error":"Email already in use"}"#);
        assert_eq!(err.to_string(), "API returned 400: Email already in use");

        let err = ApiError::status(502, "Bad Gateway");
        assert_eq!(err.to_string(), "API returned 502: Bad Gateway");

        let err = ApiError::status(500, "");
        assert_eq!(err.to_string(), "API returned 500: (empty body)");
    }

    #[test]
    fn test_status_error_truncates_body() {
        let err = ApiError::status(500, &"x".repeat(2000));
        match err {
            ApiError::Status { body, .. } => assert_eq!(body.len(), MAX_ERROR_BODY_CHARS),
            other => panic!("unexpected error: {other}"),
        }
    }
}
