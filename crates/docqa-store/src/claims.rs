//! Best-effort JWT claim decoding for the stored access token.
//!
//! The signature is NOT verified. The decoded expiry is only used for
//! display and for warnings when a restored session has already lapsed.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("invalid JWT format")]
    Format,

    #[error("base64 decode failed: {0}")]
    Base64(String),

    #[error("JSON parse failed: {0}")]
    Json(String),

    #[error("missing exp claim")]
    MissingExp,

    #[error("invalid exp timestamp")]
    InvalidExp,
}

/// Decode the `exp` claim of a JWT.
///
/// # Errors
///
/// Returns [`ClaimsError`] if the token is not a three-part JWT, the payload
/// is not base64url JSON, or `exp` is missing or out of range.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, ClaimsError> {
    let mut parts = jwt.split('.');
    let (Some(_), Some(payload), Some(_), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ClaimsError::Format);
    };
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClaimsError::Base64(e.to_string()))?;
    let value: serde_json::Value =
        serde_json::from_slice(&payload).map_err(|e| ClaimsError::Json(e.to_string()))?;
    let exp = value["exp"].as_i64().ok_or(ClaimsError::MissingExp)?;
    DateTime::from_timestamp(exp, 0).ok_or(ClaimsError::InvalidExp)
}

/// Whether the token's `exp` lies in the past. Undecodable tokens are not
/// considered expired.
#[must_use]
pub fn is_expired(jwt: &str, now: DateTime<Utc>) -> bool {
    decode_expiry(jwt).is_ok_and(|exp| exp <= now)
}

#[cfg(test)]
pub(crate) fn make_jwt_with_exp(exp: i64) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = engine.encode(format!(r#"{{"token_type":"access","user_id":"u1","exp":{exp}}}"#));
    let signature = engine.encode("fake_sig");
    format!("{header}.{payload}.{signature}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_expiry_valid_jwt() {
        let exp = Utc::now().timestamp() + 3600;
        let decoded = decode_expiry(&make_jwt_with_exp(exp)).unwrap();
        assert_eq!(decoded.timestamp(), exp);
        assert!(!is_expired(&make_jwt_with_exp(exp), Utc::now()));
    }

    #[test]
    fn expired_jwt_is_detected() {
        let exp = Utc::now().timestamp() - 60;
        assert!(is_expired(&make_jwt_with_exp(exp), Utc::now()));
    }

    #[test]
    fn opaque_token_is_not_expired() {
        assert_eq!(decode_expiry("T1"), Err(ClaimsError::Format));
        assert!(!is_expired("T1", Utc::now()));
    }

    #[test]
    fn missing_exp_claim() {
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let jwt = format!(
            "{}.{}.{}",
            engine.encode("{}"),
            engine.encode(r#"{"user_id":"u1"}"#),
            engine.encode("sig")
        );
        assert_eq!(decode_expiry(&jwt), Err(ClaimsError::MissingExp));
    }

    #[test]
    fn bad_base64() {
        assert!(matches!(
            decode_expiry("header.!!!invalid!!!.signature"),
            Err(ClaimsError::Base64(_))
        ));
    }
}
