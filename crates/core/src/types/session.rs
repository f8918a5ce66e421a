//! Session state types.
//!
//! A [`Session`] is either empty or holds both a token and the user decoded
//! from it. The fields are private so the pair can only be set or cleared
//! together.

use serde::{Deserialize, Serialize};

use super::claims::Claims;
use super::id::UserId;
use super::lenient;
use super::token::AccessToken;

/// User identity cached alongside the access token.
///
/// Serialized in camelCase, which is the layout kept in durable storage.
/// Reading it back is as forgiving as decoding the token it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::user_id::deserialize"
    )]
    pub id: Option<UserId>,
    #[serde(default, deserialize_with = "lenient::string::deserialize")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::string::deserialize")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::string::deserialize")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string::deserialize")]
    pub mobile_no: String,
    #[serde(default, deserialize_with = "lenient::truthy::deserialize")]
    pub is_admin: bool,
}

impl SessionUser {
    /// "First Last", skipping empty parts.
    #[must_use]
    pub fn display_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<Claims> for SessionUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            first_name: claims.first_name,
            last_name: claims.last_name,
            email: claims.email,
            mobile_no: claims.mobile_no,
            is_admin: claims.is_admin,
        }
    }
}

/// Snapshot of the current authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    auth: Option<(AccessToken, SessionUser)>,
}

impl Session {
    /// An unauthenticated session.
    #[must_use]
    pub const fn empty() -> Self {
        Self { auth: None }
    }

    /// A session holding `token` and the `user` decoded from it.
    #[must_use]
    pub const fn authenticated(token: AccessToken, user: SessionUser) -> Self {
        Self {
            auth: Some((token, user)),
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&AccessToken> {
        self.auth.as_ref().map(|(token, _)| token)
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.auth.as_ref().map(|(_, user)| user)
    }

    /// True when a token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// True when a user is present and flagged as admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|user| user.is_admin)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> SessionUser {
        SessionUser {
            id: Some(UserId::from(7)),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            mobile_no: "09170000000".to_string(),
            is_admin,
        }
    }

    #[test]
    fn test_empty_session() {
        let session = Session::empty();
        assert!(!session.is_authenticated());
        assert!(!session.is_admin());
        assert!(session.token().is_none());
        assert!(session.user().is_none());
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_admin_implies_authenticated() {
        for is_admin in [false, true] {
            let session = Session::authenticated(AccessToken::new("a.b.c"), user(is_admin));
            assert!(session.is_authenticated());
            assert_eq!(session.is_admin(), is_admin);
            assert_eq!(session.token().is_some(), session.user().is_some());
        }
    }

    #[test]
    fn test_user_storage_layout_is_camel_case() {
        let json = serde_json::to_value(user(true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "mobileNo": "09170000000",
                "isAdmin": true,
            })
        );
        let back: SessionUser = serde_json::from_value(json).unwrap();
        assert_eq!(back, user(true));
    }

    #[test]
    fn test_display_name_skips_empty_parts() {
        let mut u = user(false);
        assert_eq!(u.display_name(), "Ada Lovelace");
        u.last_name.clear();
        assert_eq!(u.display_name(), "Ada");
    }

    #[test]
    fn test_user_without_id_round_trips() {
        let user = SessionUser {
            id: None,
            first_name: "Ada".to_string(),
            ..SessionUser::default()
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("\"id\""));
        assert_eq!(serde_json::from_str::<SessionUser>(&json).unwrap(), user);
    }

    #[test]
    fn test_stored_user_with_nulls_reads_back() {
        let user: SessionUser = serde_json::from_str(
            r#"{"id":"64f1","firstName":"Ada","mobileNo":null,"isAdmin":1}"#,
        )
        .unwrap();
        assert_eq!(user.id, Some(UserId::from("64f1")));
        assert!(user.mobile_no.is_empty());
        assert!(user.is_admin);
    }
}
