//! Account commands: login, register, logout, whoami, profile.
//!
//! # Usage
//!
//! ```bash
//! shopfront register --first-name Ada --last-name Lovelace \
//!     -e ada@example.com -m 09170000000 -p hunter22
//! shopfront login -e ada@example.com -p hunter22
//! shopfront profile --mobile-no 09998887777
//! shopfront whoami
//! shopfront logout
//! ```

use chrono::Utc;
use serde_json::Value;

use shopfront_client::error::{ClientError, Result};
use shopfront_client::state::AppContext;
use shopfront_core::{Credentials, Email, ProfileUpdate, RegisterPayload, decode_claims};

use crate::telemetry;

/// Raw registration input from the command line.
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_no: String,
    pub password: String,
}

fn parse_email(raw: &str) -> Result<Email> {
    Email::parse(raw).map_err(|e| ClientError::BadRequest(format!("invalid email '{raw}': {e}")))
}

/// Pull the API's human readable message out of a response body.
fn response_message(data: &Value) -> Option<&str> {
    data.get("message").and_then(Value::as_str)
}

/// Log in and persist the session.
pub async fn login(ctx: &mut AppContext, email: &str, password: String) -> Result<()> {
    let credentials = Credentials::new(parse_email(email)?, password);
    ctx.session_mut().login(&credentials).await?;

    if let Some(user) = ctx.session().user() {
        telemetry::set_sentry_user(user);
        tracing::info!(
            "Signed in as {} <{}>{}",
            user.display_name(),
            user.email,
            if user.is_admin { " (admin)" } else { "" }
        );
    }
    Ok(())
}

/// Create an account. The new account is not signed in.
pub async fn register(ctx: &AppContext, form: RegisterForm) -> Result<()> {
    let payload = RegisterPayload {
        first_name: form.first_name,
        last_name: form.last_name,
        email: parse_email(&form.email)?,
        mobile_no: form.mobile_no,
        password: form.password.into(),
    };

    let response = ctx.session().register(&payload).await?;
    tracing::info!(
        "{}",
        response_message(&response.data).unwrap_or("Registration submitted")
    );
    tracing::info!("Run `shopfront login` to sign in");
    Ok(())
}

/// Forget the stored session.
pub fn logout(ctx: &mut AppContext) {
    let was_signed_in = ctx.session().is_authenticated();
    ctx.session_mut().logout();
    telemetry::clear_sentry_user();

    if was_signed_in {
        tracing::info!("Signed out");
    } else {
        tracing::info!("Not signed in");
    }
}

/// Print the signed-in user.
#[allow(clippy::print_stdout)]
pub fn whoami(ctx: &AppContext) {
    let session = ctx.session();
    let (Some(user), Some(token)) = (session.user(), session.token()) else {
        println!("Not signed in");
        return;
    };

    if let Some(id) = &user.id {
        println!("id:      {id}");
    }
    println!("name:    {}", user.display_name());
    println!("email:   {}", user.email);
    println!("mobile:  {}", user.mobile_no);
    println!("admin:   {}", if session.is_admin() { "yes" } else { "no" });

    // Expiry is informational; the API decides whether the token still works
    if let Some(expires_at) = decode_claims(token.expose())
        .ok()
        .and_then(|claims| claims.expires_at())
    {
        let note = if expires_at <= Utc::now() {
            " (expired)"
        } else {
            ""
        };
        println!("expires: {}{note}", expires_at.to_rfc3339());
    }
}

/// Send a partial profile update.
pub async fn update_profile(
    ctx: &AppContext,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    mobile_no: Option<String>,
) -> Result<()> {
    let update = ProfileUpdate {
        first_name,
        last_name,
        email: email.as_deref().map(parse_email).transpose()?,
        mobile_no,
    };
    if update.is_empty() {
        return Err(ClientError::BadRequest(
            "nothing to update; pass at least one field".to_string(),
        ));
    }

    let response = ctx.session().update_profile(&update).await?;
    tracing::info!(
        "{}",
        response_message(&response.data).unwrap_or("Profile updated")
    );
    tracing::info!("Changes show up in `whoami` after the next login");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_email_maps_to_bad_request() {
        assert!(parse_email("ada@example.com").is_ok());
        assert!(matches!(
            parse_email("not-an-email"),
            Err(ClientError::BadRequest(_))
        ));
    }

    #[test]
    fn test_response_message() {
        assert_eq!(
            response_message(&json!({"message": "Registered successfully"})),
            Some("Registered successfully")
        );
        assert_eq!(response_message(&json!({"ok": true})), None);
        assert_eq!(response_message(&Value::Null), None);
    }
}
