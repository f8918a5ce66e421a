//! Application context.
//!
//! [`AppContext`] owns every piece of client state and is passed explicitly
//! to whatever needs it. The session is restored once, at construction.

use std::sync::Arc;

use shopfront_core::Session;

use crate::api::{Api, HttpApi};
use crate::config::ClientConfig;
use crate::router::{Navigation, NavigationError, Router};
use crate::storage::Storage;
use crate::stores::{CartStore, SessionStore};

/// Client state: configuration, stores and router.
pub struct AppContext {
    config: ClientConfig,
    session: SessionStore,
    cart: CartStore,
    router: Router,
}

impl AppContext {
    /// Create the context with the `reqwest` API client.
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration (API base URL)
    /// * `storage` - Durable storage the session is restored from
    #[must_use]
    pub fn new(config: ClientConfig, storage: Arc<dyn Storage>) -> Self {
        let api: Arc<dyn Api> = Arc::new(HttpApi::new(config.api_url.clone(), storage.clone()));
        Self::with_api(config, api, storage)
    }

    /// Create the context around an existing API implementation.
    #[must_use]
    pub fn with_api(config: ClientConfig, api: Arc<dyn Api>, storage: Arc<dyn Storage>) -> Self {
        Self {
            config,
            session: SessionStore::restore(api.clone(), storage),
            cart: CartStore::new(api),
            router: Router::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.router
    }

    /// Snapshot of the current session.
    #[must_use]
    pub const fn snapshot(&self) -> &Session {
        self.session.session()
    }

    /// Navigate under the current session.
    ///
    /// # Errors
    ///
    /// See [`Router::navigate`].
    pub fn navigate(&mut self, to: &str) -> Result<Navigation, NavigationError> {
        self.router.navigate(to, self.session.session())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::router::RouteName;
    use crate::storage::MemoryStorage;
    use crate::testing::{FakeApi, jwt};
    use shopfront_core::{Credentials, Email};

    fn config() -> ClientConfig {
        ClientConfig::from_lookup(|key| {
            (key == "SHOPFRONT_API_URL").then(|| "http://localhost:4000".to_string())
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_guard_observes_latest_login_and_logout() {
        let token = jwt(&json!({"id": 7, "firstName": "Ada", "isAdmin": false}));
        let api = Arc::new(FakeApi::new().reply_ok(json!({ "access": token })));
        let storage = Arc::new(MemoryStorage::new());
        let mut ctx = AppContext::with_api(config(), api, storage);

        assert_eq!(
            ctx.navigate("/orders").unwrap().route.route.name,
            RouteName::Login
        );

        let creds = Credentials::new(Email::parse("ada@example.com").unwrap(), "pw");
        ctx.session_mut().login(&creds).await.unwrap();
        assert_eq!(
            ctx.navigate("/orders").unwrap().route.route.name,
            RouteName::Orders
        );
        assert_eq!(
            ctx.navigate("/login").unwrap().route.route.name,
            RouteName::ProductCatalog
        );

        ctx.session_mut().logout();
        assert!(!ctx.snapshot().is_authenticated());
        assert_eq!(
            ctx.navigate("/profile").unwrap().route.route.name,
            RouteName::Login
        );
    }

    #[test]
    fn test_restores_session_at_construction() {
        let storage = Arc::new(MemoryStorage::with_entries([
            ("token", "a.b.c"),
            ("user", r#"{"id":3,"firstName":"Lin","isAdmin":true}"#),
        ]));
        let ctx = AppContext::with_api(config(), Arc::new(FakeApi::new()), storage);

        assert!(ctx.session().is_authenticated());
        assert!(ctx.session().is_admin());
        assert_eq!(ctx.cart().count(), 0);
        assert_eq!(ctx.router().current(), "/");
        assert_eq!(ctx.config().api_url.as_str(), "http://localhost:4000/");
    }
}
