//! Account Password Value Object
//!
//! Domain wrapper over `platform::password`: turns policy violations into
//! user-facing [`AppError`]s and keeps the hash type opaque to the rest of
//! the crate.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicy, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a new password (registration, reset, update)
    pub fn new(raw: String, policy: &PasswordPolicy) -> AppResult<Self> {
        let clear_text = ClearTextPassword::with_policy(raw, policy).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
                "Password must be at least {min} characters (got {actual})"
            ))
            .with_action("Please choose a longer password"),

            PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "Password must be at most {max} characters (got {actual})"
            ))
            .with_action("Please choose a shorter password"),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
                    .with_action("Please enter a password")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }

            PasswordPolicyError::CommonPattern => {
                AppError::bad_request("Password is too common or follows a predictable pattern")
                    .with_action("Please choose a more unique password")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Password submitted at login; never rejected by policy
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Account Password (Hashed, for storage)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct AccountPassword(HashedPassword);

impl AccountPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        raw.0
            .hash(pepper)
            .map(Self)
            .map_err(|e: PasswordHashError| AppError::internal("Password hashing failed").with_source(e))
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for AccountPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_errors_are_bad_requests() {
        let err = RawPassword::new("short".into(), &PasswordPolicy::default()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.action().is_some());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("pw123".into(), &PasswordPolicy::lenient()).unwrap();
        let hashed = AccountPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        assert!(hashed.verify(&RawPassword::for_login("pw123".into()), Some(b"pepper")));
        assert!(!hashed.verify(&RawPassword::for_login("pw124".into()), Some(b"pepper")));
        assert!(!hashed.verify(&RawPassword::for_login("pw123".into()), None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::for_login("TestPassword123!".into());
        let hashed = AccountPassword::from_raw(&raw, None).unwrap();
        let restored = AccountPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, None));
        assert!(AccountPassword::from_phc_string("garbage").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::for_login("SecretPassword123!".into());
        assert!(!format!("{raw:?}").contains("Secret"));
        let hashed = AccountPassword::from_raw(&raw, None).unwrap();
        assert!(format!("{hashed:?}").contains("HASH"));
    }
}
