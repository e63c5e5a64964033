//! Verification Token Value Object
//!
//! Single-use opaque token mailed to a new account. Comparison is exact and
//! case-sensitive.

use platform::crypto::{constant_time_eq, random_token};
use std::fmt;

/// 256 bits of entropy, 43 URL-safe characters
const TOKEN_ENTROPY_BYTES: usize = 32;

#[derive(Clone, PartialEq, Eq)]
pub struct VerificationToken(String);

impl VerificationToken {
    pub fn generate() -> Self {
        Self(random_token(TOKEN_ENTROPY_BYTES))
    }

    pub fn from_db(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), candidate.as_bytes())
    }
}

impl fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VerificationToken")
            .field(&"[REDACTED]")
            .finish()
    }
}
