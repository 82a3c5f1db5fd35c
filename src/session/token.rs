//! Access token payload decoding.
//!
//! Tokens are compact, dot-separated structures whose middle segment is
//! base64url-encoded JSON. Only the claims this client needs are read; the
//! signature is never checked here.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

/// Claims carried in the token payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub business_id: String,
    pub sub: Option<String>,
    /// Expiry as seconds since the Unix epoch
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Decode the payload segment of `token`
    pub fn decode(token: &str) -> Result<Self, TokenError> {
        let payload = token
            .split('.')
            .nth(1)
            .filter(|segment| !segment.is_empty())
            .ok_or(TokenError::Malformed)?;

        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;

        // Some issuers emit numeric tenant ids
        let business_id = match value.get("business_id") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => return Err(TokenError::MissingBusinessId),
        };

        Ok(Self {
            business_id,
            sub: value.get("sub").and_then(|v| v.as_str()).map(str::to_string),
            exp: value.get("exp").and_then(|v| v.as_i64()),
        })
    }

    /// Expiry as a UTC timestamp, when the token carries one
    pub fn expires_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.exp.and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is not a dot-separated compact token")]
    Malformed,

    #[error("token payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token payload has no business_id claim")]
    MissingBusinessId,
}

#[cfg(test)]
pub(crate) fn encode_test_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_business_id() {
        let token = encode_test_token(&json!({
            "sub": "user-1",
            "business_id": "6f1c2d9e-0000-4000-8000-000000000001",
            "exp": 1_900_000_000
        }));

        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.business_id, "6f1c2d9e-0000-4000-8000-000000000001");
        assert_eq!(claims.sub.as_deref(), Some("user-1"));
        assert_eq!(claims.exp, Some(1_900_000_000));
        assert!(claims.expires_at().is_some());
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"business_id":"b1"}"#);
        let token = format!("h.{payload}.s");
        assert_eq!(TokenClaims::decode(&token).unwrap().business_id, "b1");
    }

    #[test]
    fn test_numeric_business_id() {
        let token = encode_test_token(&json!({ "business_id": 42 }));
        assert_eq!(TokenClaims::decode(&token).unwrap().business_id, "42");
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(matches!(TokenClaims::decode("no-dots"), Err(TokenError::Malformed)));
        assert!(matches!(TokenClaims::decode("a..c"), Err(TokenError::Malformed)));
        assert!(matches!(TokenClaims::decode("a.!!!.c"), Err(TokenError::Base64(_))));

        let not_json = URL_SAFE_NO_PAD.encode("plain text");
        assert!(matches!(
            TokenClaims::decode(&format!("a.{not_json}.c")),
            Err(TokenError::Json(_))
        ));

        let token = encode_test_token(&json!({ "sub": "user-1" }));
        assert!(matches!(
            TokenClaims::decode(&token),
            Err(TokenError::MissingBusinessId)
        ));
    }
}
