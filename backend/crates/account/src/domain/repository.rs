//! Repository Traits
//!
//! Interfaces for persistence, object storage and outbound mail.
//! Implementations are in the infrastructure layer.

use chrono::{DateTime, Utc};
use platform::object_store::StorageError;
use thiserror::Error;

use crate::domain::entity::account::{Account, AccountChanges};
use crate::domain::value_object::{
    account_id::AccountId, account_password::AccountPassword, email::Email, nickname::Nickname,
};
use crate::error::AccountResult;

/// Counter state after a failed login was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailedLogin {
    pub failed_login_attempts: u32,
    /// This call moved the account into the locked state
    pub locked_now: bool,
}

/// Account repository trait
///
/// Email and nickname uniqueness must be enforced by the store itself;
/// a violation surfaces as `AccountError::Conflict`.
///
/// Each state transition is a single write that touches only its own
/// columns and reads the current row, never a snapshot held by the caller.
/// Methods addressing a missing account report it as `false` / `None`.
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    async fn create(&self, account: &Account) -> AccountResult<()>;

    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>>;

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>>;

    async fn find_by_nickname(&self, nickname: &Nickname) -> AccountResult<Option<Account>>;

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool>;

    async fn exists_by_nickname(&self, nickname: &Nickname) -> AccountResult<bool>;

    /// Reset the failed-login counter and stamp `last_login_at`
    async fn record_login(
        &self,
        account_id: &AccountId,
        at: DateTime<Utc>,
    ) -> AccountResult<bool>;

    /// Increment the counter and lock once it reaches `threshold`
    async fn record_failed_login(
        &self,
        account_id: &AccountId,
        threshold: u32,
    ) -> AccountResult<Option<FailedLogin>>;

    /// Consume the pending token if it still equals `token`; returns the
    /// verified account
    async fn verify_email(
        &self,
        account_id: &AccountId,
        token: &str,
    ) -> AccountResult<Option<Account>>;

    /// `false` if the account is missing or was not locked
    async fn unlock(&self, account_id: &AccountId) -> AccountResult<bool>;

    /// Replace the hash and clear any lockout
    async fn reset_password(
        &self,
        account_id: &AccountId,
        password_hash: &AccountPassword,
    ) -> AccountResult<bool>;

    async fn set_profile_picture_url(
        &self,
        account_id: &AccountId,
        url: &str,
    ) -> AccountResult<bool>;

    /// Apply an administrative edit; returns the updated account
    async fn apply_changes(
        &self,
        account_id: &AccountId,
        changes: &AccountChanges,
    ) -> AccountResult<Option<Account>>;

    /// Returns `false` if nothing was deleted
    async fn delete(&self, account_id: &AccountId) -> AccountResult<bool>;

    async fn count(&self) -> AccountResult<u64>;

    /// Oldest first
    async fn list(&self, skip: u64, limit: u64) -> AccountResult<Vec<Account>>;
}

/// S3-compatible object storage
#[trait_variant::make(ObjectStorage: Send)]
pub trait LocalObjectStorage {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError>;

    /// Fails with `StorageError::BucketAlreadyExists` if another caller won the race
    async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<(), StorageError>;

    /// Public URL of an object
    fn object_url(&self, bucket: &str, key: &str) -> String;

    /// Key of an object in `bucket` given its public URL
    fn object_key(&self, bucket: &str, url: &str) -> Option<String>;
}

/// Message asking a new account holder to confirm their address
#[derive(Debug, Clone)]
pub struct VerificationEmail {
    pub to: Email,
    pub nickname: Nickname,
    pub verification_url: String,
}

#[derive(Debug, Error)]
#[error("verification email could not be sent: {0}")]
pub struct MailError(pub String);

#[trait_variant::make(VerificationMailer: Send)]
pub trait LocalVerificationMailer {
    async fn send_verification(&self, email: &VerificationEmail) -> Result<(), MailError>;
}
