//! Test doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

use crate::api::{Api, ApiError, ApiResponse};

/// A request seen by [`FakeApi`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Scripted [`Api`]: replies are handed out in order, calls are recorded.
///
/// Running out of replies yields a 503 status error.
#[derive(Default)]
pub struct FakeApi {
    replies: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_ok(self, data: Value) -> Self {
        self.push(Ok(ApiResponse::new(200, data)))
    }

    pub fn reply_err(self, err: ApiError) -> Self {
        self.push(Err(err))
    }

    fn push(self, reply: Result<ApiResponse, ApiError>) -> Self {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                method,
                path: path.to_string(),
                body,
            });
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::status(503, "no scripted reply")))
    }
}

#[async_trait]
impl Api for FakeApi {
    async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.record("GET", path, None)
    }

    async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.record("POST", path, Some(body))
    }

    async fn patch(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.record("PATCH", path, Some(body))
    }
}

/// Build an unsigned JWT carrying `claims`.
pub fn jwt(claims: &Value) -> String {
    format!(
        "{}.{}.test-signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}
