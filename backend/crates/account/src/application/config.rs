//! Application Configuration
//!
//! Configuration for the Account application layer. Built once at startup
//! and shared by `Arc`; nothing here changes while the process runs.

use chrono::Duration;
use platform::password::PasswordPolicy;
use platform::token::DEFAULT_TOKEN_TTL_MINUTES;

/// Default lockout threshold (consecutive failed logins)
pub const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 5;

/// Default upload limit: 10 MiB
pub const DEFAULT_MAX_PICTURE_BYTES: usize = 10 * 1024 * 1024;

/// Profile picture upload settings
#[derive(Debug, Clone)]
pub struct PictureConfig {
    pub bucket: String,
    /// Key prefix inside the bucket, without trailing slash
    pub key_prefix: String,
    pub max_bytes: usize,
    pub allowed_content_types: Vec<String>,
}

impl Default for PictureConfig {
    fn default() -> Self {
        Self {
            bucket: "profile-pictures".to_string(),
            key_prefix: "profile-pics".to_string(),
            max_bytes: DEFAULT_MAX_PICTURE_BYTES,
            allowed_content_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        }
    }
}

impl PictureConfig {
    pub fn is_allowed(&self, content_type: &str) -> bool {
        self.allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
    }
}

/// Account application configuration
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Failed logins before the account locks
    pub max_login_attempts: u32,
    /// HMAC secret for bearer tokens
    pub token_secret: Vec<u8>,
    pub token_ttl: Duration,
    /// Externally visible base URL, used in verification mails and links
    pub public_base_url: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    pub password_policy: PasswordPolicy,
    pub picture: PictureConfig,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: DEFAULT_MAX_LOGIN_ATTEMPTS,
            token_secret: Vec::new(),
            token_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
            public_base_url: "http://localhost:8000".to_string(),
            password_pepper: None,
            password_policy: PasswordPolicy::default(),
            picture: PictureConfig::default(),
        }
    }
}

impl AccountConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Development settings: random secret, lenient password policy
    pub fn development() -> Self {
        Self {
            password_policy: PasswordPolicy::lenient(),
            ..Self::with_random_secret()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Link mailed to a new account holder
    pub fn verification_url(&self, account_id: &impl std::fmt::Display, token: &str) -> String {
        format!(
            "{}/verify-email/{}/{}",
            self.public_base_url.trim_end_matches('/'),
            account_id,
            token
        )
    }
}
