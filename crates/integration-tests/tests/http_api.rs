//! `HttpApi` against the mock storefront API.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::Method;
use serde_json::json;
use url::Url;

use shopfront_client::api::{Api, ApiError, HttpApi, endpoints};
use shopfront_client::storage::{MemoryStorage, Storage, keys};
use shopfront_integration_tests::{MockApi, PASSWORD, jwt};

fn http_api(mock: &MockApi, storage: Arc<MemoryStorage>) -> HttpApi {
    let base = Url::parse(&format!("{}/", mock.base_url())).unwrap();
    HttpApi::new(base, storage)
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let mock = MockApi::start(jwt(&json!({"id": 1})), json!([])).await.unwrap();
    let api = http_api(&mock, Arc::new(MemoryStorage::new()));

    let response = api
        .post(endpoints::LOGIN, json!({"email": "a@b.co", "password": PASSWORD}))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    let request = mock.last_request("/users/login").unwrap();
    assert_eq!(request.method, Method::POST);
    assert!(request.authorization.is_none());
    assert_eq!(request.body["email"], "a@b.co");
}

#[tokio::test]
async fn test_bearer_header_follows_storage() {
    let token = jwt(&json!({"id": 1}));
    let mock = MockApi::start(token.clone(), json!([{"productId": "p1"}])).await.unwrap();
    let storage = Arc::new(MemoryStorage::new());
    let api = http_api(&mock, storage.clone());

    storage.set_item(keys::TOKEN, &token);
    let response = api.get(endpoints::CART).await.unwrap();
    assert_eq!(response.data["cart"]["cartItems"][0]["productId"], "p1");
    assert_eq!(
        mock.last_request("/cart/get-cart").unwrap().authorization,
        Some(format!("Bearer {token}"))
    );

    storage.remove_item(keys::TOKEN);
    let err = api.get(endpoints::CART).await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert!(mock.last_request("/cart/get-cart").unwrap().authorization.is_none());
}

#[tokio::test]
async fn test_error_status_carries_api_message() {
    let mock = MockApi::start(jwt(&json!({"id": 1})), json!([])).await.unwrap();
    let api = http_api(&mock, Arc::new(MemoryStorage::new()));

    let err = api
        .post(endpoints::LOGIN, json!({"email": "a@b.co", "password": "wrong"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 401, .. }));
    assert_eq!(err.to_string(), "API returned 401: Invalid email or password");
}

#[tokio::test]
async fn test_unknown_path_is_a_status_error() {
    let mock = MockApi::start(jwt(&json!({"id": 1})), json!([])).await.unwrap();
    let api = http_api(&mock, Arc::new(MemoryStorage::new()));

    let err = api.get("/no/such/endpoint").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}
