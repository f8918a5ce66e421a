//! Navigation guard.
//!
//! Runs before every route transition and decides, from the destination path
//! and the current session alone, whether to let the transition through or
//! send the user somewhere else.
//!
//! The guard checks that a token is *present*, not that it is valid. It is a
//! UX gate; the API enforces authorization on every protected request.

use tracing::debug;

use shopfront_core::Session;

/// Login page.
pub const LOGIN_PATH: &str = "/login";
/// Registration page.
pub const REGISTER_PATH: &str = "/register";
/// Where signed-in users land: the product catalog.
pub const LANDING_PATH: &str = "/products";

/// Path prefixes that require a signed-in user.
///
/// Matched with a plain string prefix test, so `/users` and `/cartography`
/// are covered by `/user` and `/cart` respectively.
pub const PROTECTED_PREFIXES: [&str; 6] = [
    "/profile", "/user", "/users", "/order", "/orders", "/cart",
];

/// Static classification of a destination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Login and register pages; signed-in users are sent away.
    PublicAuth,
    /// Requires a signed-in user.
    Protected,
    /// No requirement.
    Open,
}

/// Classify a destination path.
#[must_use]
pub fn classify(path: &str) -> RouteClass {
    if path == LOGIN_PATH || path == REGISTER_PATH {
        RouteClass::PublicAuth
    } else if PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        RouteClass::Protected
    } else {
        RouteClass::Open
    }
}

/// Outcome of one guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Continue to the requested destination.
    Proceed,
    /// Go to this path instead.
    Redirect(&'static str),
}

/// Evaluate the guard for a transition from `from` to `to`.
///
/// Pure: the same `(to, session)` always yields the same decision. `from`
/// only appears in the debug log.
#[must_use]
pub fn before_each(to: &str, from: &str, session: &Session) -> GuardDecision {
    let authenticated = session.is_authenticated();
    let decision = match classify(to) {
        RouteClass::PublicAuth if authenticated => GuardDecision::Redirect(LANDING_PATH),
        RouteClass::Protected if !authenticated => GuardDecision::Redirect(LOGIN_PATH),
        _ => GuardDecision::Proceed,
    };
    debug!(to, from, authenticated, ?decision, "Navigation guard evaluated");
    decision
}
