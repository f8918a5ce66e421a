//! Routing commands: run a navigation through the guard, list the route table.

use shopfront_client::error::Result;
use shopfront_client::router::{ROUTES, RouteClass, classify};
use shopfront_client::state::AppContext;

use crate::telemetry;

const fn class_label(class: RouteClass) -> &'static str {
    match class {
        RouteClass::PublicAuth => "guest-only",
        RouteClass::Protected => "protected",
        RouteClass::Open => "open",
    }
}

/// Navigate to `path` under the stored session and print where it landed.
#[allow(clippy::print_stdout)]
pub fn navigate(ctx: &mut AppContext, path: &str) -> Result<()> {
    let from = ctx.router().current().to_string();
    let navigation = ctx.navigate(path)?;
    telemetry::navigation_breadcrumb(&from, &navigation.route.path);

    for hop in &navigation.redirects {
        println!("-> redirected to {hop}");
    }
    println!(
        "{} ({})",
        navigation.route.path, navigation.route.route.name
    );
    for (name, value) in &navigation.route.params {
        println!("  {name} = {value}");
    }
    Ok(())
}

/// Print the route table with each route's guard classification.
#[allow(clippy::print_stdout)]
pub fn routes() {
    for route in ROUTES {
        println!(
            "{:<18} {:<16} {:<11} requiresAuth={}",
            route.pattern,
            route.name.as_str(),
            class_label(classify(route.pattern)),
            route.requires_auth
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_is_protected_regardless_of_metadata() {
        let cart = ROUTES.iter().find(|r| r.pattern == "/cart");
        assert!(cart.is_some_and(|r| !r.requires_auth));
        assert_eq!(class_label(classify("/cart")), "protected");
        assert_eq!(class_label(classify("/login")), "guest-only");
        assert_eq!(class_label(classify("/product/:id")), "open");
    }
}
