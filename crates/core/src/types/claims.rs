//! Identity claims embedded in access tokens.
//!
//! The login endpoint returns a JWT. Its payload segment carries the user's
//! identity, which the client reads locally without a server round-trip.
//!
//! # Trust
//!
//! [`decode_claims`] does not verify the signature. The decoded identity,
//! including `is_admin`, is only fit for UI decisions; the API re-checks
//! authorization on every protected request.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::id::UserId;
use super::lenient;

/// Errors that can occur when decoding an access token.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The token is not three dot-separated segments, or the payload is empty.
    #[error("token is not a JWT (expected header.payload.signature)")]
    Malformed,

    /// The payload segment is not valid base64url.
    #[error("token payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The payload is not JSON.
    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is JSON but not an object.
    #[error("token payload is not a JSON object")]
    NotAnObject,
}

/// Claims read from an access token payload.
///
/// Every field is optional. A claim that is missing, `null` or of an
/// unexpected type takes its default, so any JSON object decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// User identifier, integer or string.
    #[serde(default, deserialize_with = "lenient::user_id::deserialize")]
    pub id: Option<UserId>,
    #[serde(default, deserialize_with = "lenient::string::deserialize")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::string::deserialize")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::string::deserialize")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string::deserialize")]
    pub mobile_no: String,
    /// Admin flag, by truthiness; absent means `false`.
    #[serde(default, deserialize_with = "lenient::truthy::deserialize")]
    pub is_admin: bool,
    /// Issued-at, seconds since the Unix epoch.
    #[serde(default, deserialize_with = "lenient::timestamp::deserialize")]
    pub iat: Option<i64>,
    /// Expiry, seconds since the Unix epoch. Informational only.
    #[serde(default, deserialize_with = "lenient::timestamp::deserialize")]
    pub exp: Option<i64>,
}

impl Claims {
    /// When the token was issued, if the claim is present.
    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// When the token expires, if the claim is present.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Decode the claims of a JWT without verifying its signature.
///
/// Padding on the payload segment is tolerated even though JWTs normally
/// omit it.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] if the token does not have exactly
/// three segments or its payload is empty, [`DecodeError::Base64`] if the
/// payload is not base64url, [`DecodeError::Json`] if the decoded bytes are
/// not JSON, and [`DecodeError::NotAnObject`] if they are JSON but not an
/// object.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(DecodeError::Malformed);
    };

    let payload = payload.trim_end_matches('=');
    if payload.is_empty() {
        return Err(DecodeError::Malformed);
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    match serde_json::from_slice::<Value>(&bytes)? {
        object @ Value::Object(_) => Ok(serde_json::from_value(object)?),
        _ => Err(DecodeError::NotAnObject),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_decode_full_claims() {
        let token = token_with(
            r#"{"id":7,"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","mobileNo":"09170000000","isAdmin":true,"iat":1700000000,"exp":1700086400}"#,
        );
        let claims = decode_claims(&token).unwrap();

        assert_eq!(claims.id, Some(UserId::Numeric(7)));
        assert_eq!(claims.first_name, "Ada");
        assert_eq!(claims.last_name, "Lovelace");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.mobile_no, "09170000000");
        assert!(claims.is_admin);
        assert_eq!(
            claims.expires_at().unwrap().to_rfc3339(),
            "2023-11-15T22:13:20+00:00"
        );
        assert!(claims.issued_at().unwrap() < claims.expires_at().unwrap());
    }

    #[test]
    fn test_missing_optional_claims_default() {
        let claims = decode_claims(&token_with(r#"{"id":"abc123"}"#)).unwrap();
        assert_eq!(claims.id, Some(UserId::from("abc123")));
        assert!(!claims.is_admin);
        assert!(claims.first_name.is_empty());
        assert!(claims.expires_at().is_none());
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"id":1}"#);
        let token = format!("h.{payload}.s");
        assert_eq!(decode_claims(&token).unwrap().id, Some(UserId::Numeric(1)));
    }

    #[test]
    fn test_wrong_segment_count_is_malformed() {
        assert!(matches!(decode_claims(""), Err(DecodeError::Malformed)));
        assert!(matches!(decode_claims("only-one"), Err(DecodeError::Malformed)));
        assert!(matches!(decode_claims("a.b"), Err(DecodeError::Malformed)));
        assert!(matches!(decode_claims("a.b.c.d"), Err(DecodeError::Malformed)));
        assert!(matches!(decode_claims("a..c"), Err(DecodeError::Malformed)));
    }

    #[test]
    fn test_bad_base64_and_bad_json() {
        assert!(matches!(
            decode_claims("h.!!!not-base64!!!.s"),
            Err(DecodeError::Base64(_))
        ));
        let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode("plain text"));
        assert!(matches!(decode_claims(&not_json), Err(DecodeError::Json(_))));
        for payload in ["[1,2]", "42", "\"text\"", "null"] {
            assert!(
                matches!(
                    decode_claims(&token_with(payload)),
                    Err(DecodeError::NotAnObject)
                ),
                "{payload}"
            );
        }
    }

    #[test]
    fn test_null_and_mistyped_claims_take_defaults() {
        let claims = decode_claims(&token_with(
            r#"{"id":7,"firstName":null,"lastName":["x"],"email":false,"mobileNo":null,"isAdmin":null,"exp":"soon"}"#,
        ))
        .unwrap();
        assert_eq!(claims.id, Some(UserId::Numeric(7)));
        assert!(claims.first_name.is_empty());
        assert!(claims.last_name.is_empty());
        assert_eq!(claims.email, "false");
        assert!(claims.mobile_no.is_empty());
        assert!(!claims.is_admin);
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_numeric_mobile_is_rendered_as_text() {
        let claims = decode_claims(&token_with(r#"{"id":7,"mobileNo":9170000000}"#)).unwrap();
        assert_eq!(claims.mobile_no, "9170000000");
    }

    #[test]
    fn test_missing_id_decodes() {
        let claims = decode_claims(&token_with(r#"{"_id":"64f1","firstName":"Ada"}"#)).unwrap();
        assert!(claims.id.is_none());
        assert_eq!(claims.first_name, "Ada");

        let claims = decode_claims(&token_with(r#"{"id":{"oid":"64f1"}}"#)).unwrap();
        assert!(claims.id.is_none());
        assert_eq!(decode_claims(&token_with("{}")).unwrap(), Claims::default());
    }

    #[test]
    fn test_admin_flag_is_truthy_coerced() {
        for (raw, expected) in [
            ("true", true),
            ("1", true),
            ("\"yes\"", true),
            ("false", false),
            ("0", false),
            ("\"\"", false),
            ("null", false),
        ] {
            let claims =
                decode_claims(&token_with(&format!(r#"{{"id":1,"isAdmin":{raw}}}"#))).unwrap();
            assert_eq!(claims.is_admin, expected, "{raw}");
        }
    }

    #[test]
    fn test_fractional_timestamps_are_truncated() {
        let claims = decode_claims(&token_with(r#"{"id":1,"iat":1700000000.9}"#)).unwrap();
        assert_eq!(claims.iat, Some(1_700_000_000));
    }
}
