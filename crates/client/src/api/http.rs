//! `reqwest` implementation of [`Api`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::{Api, ApiError, ApiResponse};
use crate::storage::{Storage, keys};

/// HTTP client for the storefront API.
///
/// Cheaply cloneable. Every request carries `Authorization: Bearer <token>`
/// when durable storage holds a token, so the header always matches the
/// session committed by the last login or logout.
#[derive(Clone)]
pub struct HttpApi {
    inner: Arc<HttpApiInner>,
}

struct HttpApiInner {
    client: reqwest::Client,
    base_url: Url,
    storage: Arc<dyn Storage>,
}

impl HttpApi {
    /// Create a client rooted at `base_url`.
    ///
    /// `base_url` should end with `/` (as produced by
    /// [`ClientConfig`](crate::config::ClientConfig)) so that its path is kept
    /// when endpoint paths are joined onto it.
    #[must_use]
    pub fn new(base_url: Url, storage: Arc<dyn Storage>) -> Self {
        Self {
            inner: Arc::new(HttpApiInner {
                client: reqwest::Client::new(),
                base_url,
                storage,
            }),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve an endpoint path beneath the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| ApiError::InvalidPath {
                path: path.to_string(),
                source,
            })
    }

    /// Send one request and decode the JSON response.
    #[instrument(skip(self, method, body), fields(method = %method))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint(path)?;

        let mut request = self.inner.client.request(method, url);
        if let Some(token) = self.inner.storage.get_item(keys::TOKEN) {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        // Read as text first so error bodies survive for diagnostics
        let text = response.text().await?;

        if !status.is_success() {
            debug!(status = %status, "API returned non-success status");
            return Err(ApiError::status(status.as_u16(), &text));
        }

        let data = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| {
                tracing::warn!(
                    error = %e,
                    body = %text.chars().take(200).collect::<String>(),
                    "Failed to parse API response"
                );
                ApiError::Parse(e)
            })?
        };

        debug!(status = %status, "API request succeeded");
        Ok(ApiResponse::new(status.as_u16(), data))
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn patch(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.send(Method::PATCH, path, Some(body)).await
    }
}
