//! Sentry error tracking.
//!
//! Sentry is optional: without `SENTRY_DSN` nothing is initialized and the
//! helpers below are no-ops.

use sentry::integrations::tracing as sentry_tracing;

use shopfront_client::config::ClientConfig;
use shopfront_core::SessionUser;

/// Initialize Sentry error tracking and return guard that must be kept alive.
pub fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::debug!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
pub fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Associate subsequent Sentry events with the signed-in user.
pub fn set_sentry_user(user: &SessionUser) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: user.id.as_ref().map(ToString::to_string),
            email: (!user.email.is_empty()).then(|| user.email.clone()),
            ..Default::default()
        }));
    });
}

/// Stop associating Sentry events with a user (logout).
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Record a navigation as a Sentry breadcrumb.
pub fn navigation_breadcrumb(from: &str, to: &str) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some("navigation".to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };
    breadcrumb
        .data
        .insert("from".to_string(), from.to_string().into());
    breadcrumb.data.insert("to".to_string(), to.to_string().into());

    sentry::add_breadcrumb(breadcrumb);
}
