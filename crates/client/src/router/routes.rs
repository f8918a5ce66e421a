//! Route table and path matching.
//!
//! Patterns use `:name` segments for parameters. When several patterns match
//! a path, the one with the most static segments wins (`/user/me` beats
//! `/user/:id`); ties go to the earlier entry.

use std::collections::BTreeMap;
use std::fmt;

/// Pages the storefront can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Login,
    Register,
    ProductCatalog,
    ProductDetail,
    Profile,
    Cart,
    Orders,
    UserOrders,
    OrderDetail,
    Users,
    UserEdit,
    UserEditMe,
}

impl RouteName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
            Self::ProductCatalog => "ProductCatalog",
            Self::ProductDetail => "ProductDetail",
            Self::Profile => "Profile",
            Self::Cart => "Cart",
            Self::Orders => "Orders",
            Self::UserOrders => "UserOrders",
            Self::OrderDetail => "OrderDetail",
            Self::Users => "Users",
            Self::UserEdit => "UserEdit",
            Self::UserEditMe => "UserEditMe",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the route table.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub pattern: &'static str,
    pub name: RouteName,
    /// Route metadata flag. Informational: gating is done by the guard's
    /// prefix list, which also covers routes flagged `false` (e.g. `/cart`).
    pub requires_auth: bool,
}

/// All routes, in declaration order.
pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        pattern: "/login",
        name: RouteName::Login,
        requires_auth: false,
    },
    RouteDef {
        pattern: "/register",
        name: RouteName::Register,
        requires_auth: false,
    },
    RouteDef {
        pattern: "/products",
        name: RouteName::ProductCatalog,
        requires_auth: false,
    },
    RouteDef {
        pattern: "/product/:id",
        name: RouteName::ProductDetail,
        requires_auth: false,
    },
    RouteDef {
        pattern: "/profile",
        name: RouteName::Profile,
        requires_auth: true,
    },
    RouteDef {
        pattern: "/cart",
        name: RouteName::Cart,
        requires_auth: false,
    },
    RouteDef {
        pattern: "/orders",
        name: RouteName::Orders,
        requires_auth: true,
    },
    RouteDef {
        pattern: "/orders/user/:id",
        name: RouteName::UserOrders,
        requires_auth: true,
    },
    RouteDef {
        pattern: "/order/:id",
        name: RouteName::OrderDetail,
        requires_auth: true,
    },
    RouteDef {
        pattern: "/users",
        name: RouteName::Users,
        requires_auth: true,
    },
    RouteDef {
        pattern: "/user/:id",
        name: RouteName::UserEdit,
        requires_auth: true,
    },
    RouteDef {
        pattern: "/user/me",
        name: RouteName::UserEditMe,
        requires_auth: true,
    },
];

/// Paths that forward elsewhere before any guard runs.
pub const REDIRECTS: &[(&str, &str)] = &[("/", "/products")];

/// A path resolved against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: &'static RouteDef,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Target of a static redirect for `path`, if any.
#[must_use]
pub fn static_redirect(path: &str) -> Option<&'static str> {
    REDIRECTS
        .iter()
        .find(|(from, _)| *from == path)
        .map(|(_, to)| *to)
}

/// Resolve a path (no query string) against [`ROUTES`].
#[must_use]
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let segments: Vec<&str> = split(path).collect();

    let mut best: Option<(usize, &'static RouteDef, BTreeMap<String, String>)> = None;
    for route in ROUTES {
        let Some((static_count, params)) = match_pattern(route.pattern, &segments) else {
            continue;
        };
        if best
            .as_ref()
            .is_none_or(|(best_count, _, _)| static_count > *best_count)
        {
            best = Some((static_count, route, params));
        }
    }

    best.map(|(_, route, params)| RouteMatch {
        route,
        path: path.to_string(),
        params,
    })
}

/// Match `segments` against one pattern, returning the number of static
/// segments and the captured parameters.
fn match_pattern(pattern: &str, segments: &[&str]) -> Option<(usize, BTreeMap<String, String>)> {
    let pattern_segments: Vec<&str> = split(pattern).collect();
    if pattern_segments.len() != segments.len() {
        return None;
    }

    let mut static_count = 0;
    let mut params = BTreeMap::new();
    for (expected, actual) in pattern_segments.iter().zip(segments) {
        if let Some(name) = expected.strip_prefix(':') {
            params.insert(name.to_string(), (*actual).to_string());
        } else if expected == actual {
            static_count += 1;
        } else {
            return None;
        }
    }
    Some((static_count, params))
}

/// Non-empty path segments, so `/products/` matches `/products`.
fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}
