//! Bearer Token Codec
//!
//! HS256 JWTs carrying a subject and a role name. The codec holds the keys
//! and lifetime; callers decide what `sub` and `role` mean.

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default access-token lifetime (minutes)
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("malformed token")]
    Malformed,
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// JWT claims payload
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | subject identifier |
/// | `role` | role name, e.g. `ADMIN` |
/// | `exp` | expiration, seconds since UNIX epoch |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Sign a token expiring `ttl` from now
    pub fn issue(&self, sub: &str, role: &str) -> Result<String, TokenError> {
        let claims = Claims {
            sub: sub.to_string(),
            role: role.to_string(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        self.encode_claims(&claims)
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Validate signature and expiry (`exp` and `sub` required, 60s leeway)
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("keys", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-for-unit-tests";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES))
    }

    #[test]
    fn test_issue_and_decode() {
        let token = codec().issue("a0f6c7e2-0000-4000-8000-000000000001", "ADMIN").unwrap();
        let claims = codec().decode(&token).unwrap();
        assert_eq!(claims.sub, "a0f6c7e2-0000-4000-8000-000000000001");
        assert_eq!(claims.role, "ADMIN");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_expired() {
        let expired = Claims {
            sub: "someone".into(),
            role: "ANONYMOUS".into(),
            exp: 1_000_000,
        };
        let token = codec().encode_claims(&expired).unwrap();
        assert_eq!(codec().decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret() {
        let token = codec().issue("someone", "MANAGER").unwrap();
        let other = TokenCodec::new(b"another-secret", Duration::minutes(5));
        assert_eq!(other.decode(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(codec().decode("not-a-jwt"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_debug_hides_keys() {
        let out = format!("{:?}", codec());
        assert!(!out.contains("test-secret"));
    }
}
