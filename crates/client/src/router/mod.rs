//! Routing layer.
//!
//! [`Router::navigate`] drives one transition: it normalizes the requested
//! location, applies static redirects, asks the [guard](guard::before_each)
//! exactly once per candidate destination, follows any redirect (guarding
//! the new destination too), and commits the final path.
//!
//! The guard returns its decision as a value, so every evaluation ends in
//! exactly one "proceed" or "redirect" by construction.

pub mod guard;
pub mod routes;

pub use guard::{GuardDecision, RouteClass, before_each, classify};
pub use routes::{ROUTES, RouteDef, RouteMatch, RouteName, resolve};

use thiserror::Error;
use tracing::{debug, warn};

use shopfront_core::Session;

/// Maximum number of redirects followed for one navigation.
pub const MAX_REDIRECTS: usize = 10;

/// Errors that can occur during navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Redirects did not settle.
    #[error("too many redirects navigating to {requested} (gave up at {last})")]
    RedirectLoop { requested: String, last: String },

    /// The final destination matches no route.
    #[error("no route matches {0}")]
    NotFound(String),
}

/// A committed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Location as requested (normalized).
    pub requested: String,
    /// Redirect targets followed, in order.
    pub redirects: Vec<String>,
    /// Route that was committed.
    pub route: RouteMatch,
}

impl Navigation {
    #[must_use]
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Current location plus the navigation procedure.
#[derive(Debug, Clone)]
pub struct Router {
    current: String,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// A router at the start location `/`, before any navigation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: "/".to_string(),
        }
    }

    /// The last committed path.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Navigate to `to` under `session`.
    ///
    /// On error the current location is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::RedirectLoop` if more than
    /// [`MAX_REDIRECTS`] redirects are needed, and
    /// `NavigationError::NotFound` if the final path matches no route.
    pub fn navigate(&mut self, to: &str, session: &Session) -> Result<Navigation, NavigationError> {
        self.navigate_with(to, session, before_each)
    }

    fn navigate_with<G>(
        &mut self,
        to: &str,
        session: &Session,
        guard: G,
    ) -> Result<Navigation, NavigationError>
    where
        G: Fn(&str, &str, &Session) -> GuardDecision,
    {
        let requested = normalize(to);
        let mut target = requested.clone();
        let mut redirects = Vec::new();

        loop {
            if redirects.len() > MAX_REDIRECTS {
                warn!(requested = %requested, last = %target, "Redirect loop detected");
                return Err(NavigationError::RedirectLoop {
                    requested,
                    last: target,
                });
            }

            let next = match routes::static_redirect(&target) {
                Some(dest) => dest,
                None => match guard(&target, &self.current, session) {
                    GuardDecision::Proceed => break,
                    GuardDecision::Redirect(dest) => dest,
                },
            };
            debug!(from = %target, to = next, "Redirecting");
            redirects.push(next.to_string());
            target = next.to_string();
        }

        let route = resolve(&target).ok_or_else(|| NavigationError::NotFound(target.clone()))?;
        debug!(path = %target, route = %route.route.name, "Navigation committed");
        self.current = target;

        Ok(Navigation {
            requested,
            redirects,
            route,
        })
    }
}

/// Drop query string and fragment, and make the path absolute.
fn normalize(location: &str) -> String {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
