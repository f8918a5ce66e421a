//! Integration tests for the Shopfront client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! No external services are needed: [`MockApi`] serves the four storefront
//! endpoints from an in-process axum server bound to an ephemeral port.
//!
//! # Mock Behavior
//!
//! - `POST /users/login` - `{"access": <token>}` for [`PASSWORD`], 401 otherwise
//! - `POST /users/register` - 201 with a message
//! - `PATCH /users/profile` - 200 with a message, 401 without the bearer token
//! - `GET /cart/get-cart` - `{"cart": {"cartItems": [...]}}`, 401 without the bearer token
//!
//! Routes are mounted under `/api/` so base paths are exercised too.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::routing::{get, patch, post};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

/// The only password the mock accepts.
pub const PASSWORD: &str = "correct-horse";

/// Build an unsigned JWT carrying `claims`.
#[must_use]
pub fn jwt(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

/// One request as the mock saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: &'static str,
    pub authorization: Option<String>,
    pub body: Value,
}

struct MockState {
    token: String,
    cart_items: Value,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockState {
    fn record(&self, method: Method, path: &'static str, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method,
                path,
                authorization,
                body,
            });
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| token == self.token)
    }
}

type Reply = (StatusCode, Json<Value>);

fn unauthorized() -> Reply {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Not authorized, token missing or invalid"})),
    )
}

async fn login(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let accepted = body.get("password").and_then(Value::as_str) == Some(PASSWORD);
    state.record(Method::POST, "/users/login", &headers, body);

    if accepted {
        (StatusCode::OK, Json(json!({"access": state.token})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid email or password"})),
        )
    }
}

async fn register(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    state.record(Method::POST, "/users/register", &headers, body);
    (
        StatusCode::CREATED,
        Json(json!({"message": "User registered successfully"})),
    )
}

async fn profile(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    state.record(Method::PATCH, "/users/profile", &headers, body);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({"message": "Profile updated"})))
}

async fn cart(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.record(Method::GET, "/cart/get-cart", &headers, Value::Null);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({"cart": {"cartItems": state.cart_items}})),
    )
}

/// In-process storefront API. The server stops when this is dropped.
pub struct MockApi {
    addr: SocketAddr,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockApi {
    /// Start a mock that issues `token` on login and serves `cart_items`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn start(token: impl Into<String>, cart_items: Value) -> std::io::Result<Self> {
        let state = Arc::new(MockState {
            token: token.into(),
            cart_items,
            requests: Mutex::new(Vec::new()),
        });

        let api = Router::new()
            .route("/users/login", post(login))
            .route("/users/register", post(register))
            .route("/users/profile", patch(profile))
            .route("/cart/get-cart", get(cart))
            .with_state(state.clone());
        let app = Router::new().nest("/api", api);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            state,
            server,
        })
    }

    /// Base URL the client should be configured with.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Requests received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request to `path`.
    #[must_use]
    pub fn last_request(&self, path: &str) -> Option<RecordedRequest> {
        self.requests().into_iter().rev().find(|r| r.path == path)
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}
