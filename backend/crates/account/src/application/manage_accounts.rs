//! Account Management Use Cases
//!
//! Administrative read, list, update and delete. Creation goes through
//! `RegisterUseCase`.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::register::optional;
use crate::domain::entity::account::{Account, AccountChanges, ProfilePatch};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_id::AccountId,
    account_password::{AccountPassword, RawPassword},
    account_role::AccountRole,
    email::Email,
    nickname::Nickname,
    profile,
};
use crate::error::{AccountError, AccountResult};

pub const DEFAULT_PAGE_LIMIT: u64 = 10;
pub const MAX_PAGE_LIMIT: u64 = 100;

// ============================================================================
// Get
// ============================================================================

pub struct GetAccountUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> GetAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, account_id: &AccountId) -> AccountResult<Account> {
        self.repo
            .find_by_id(account_id)
            .await?
            .ok_or(AccountError::AccountNotFound)
    }
}

// ============================================================================
// List
// ============================================================================

/// One page of accounts plus the total row count
#[derive(Debug)]
pub struct AccountPage {
    pub items: Vec<Account>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

impl AccountPage {
    /// 1-based page number
    pub fn page(&self) -> u64 {
        self.skip / self.limit + 1
    }
}

pub struct ListAccountsUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> ListAccountsUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// `limit` is clamped to `1..=MAX_PAGE_LIMIT`
    pub async fn execute(&self, skip: u64, limit: u64) -> AccountResult<AccountPage> {
        let limit = limit.clamp(1, MAX_PAGE_LIMIT);
        let total = self.repo.count().await?;
        let items = self.repo.list(skip, limit).await?;

        Ok(AccountPage {
            items,
            total,
            skip,
            limit,
        })
    }
}

// ============================================================================
// Update
// ============================================================================

/// Fields left `None` are not touched. An empty profile string clears
/// that field.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub password: Option<String>,
    pub role: Option<AccountRole>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub github_profile_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
}

impl UpdateAccountInput {
    fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.nickname.is_none()
            && self.password.is_none()
            && self.role.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.bio.is_none()
            && self.github_profile_url.is_none()
            && self.linkedin_profile_url.is_none()
    }
}

pub struct UpdateAccountUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> UpdateAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        account_id: &AccountId,
        input: UpdateAccountInput,
    ) -> AccountResult<Account> {
        if input.is_empty() {
            return Err(AccountError::NothingToUpdate);
        }

        let current = self
            .repo
            .find_by_id(account_id)
            .await?
            .ok_or(AccountError::AccountNotFound)?;
        let mut changes = AccountChanges::default();

        if let Some(email) = input.email {
            let email = Email::new(email)?;
            if email != current.email {
                let owner = self.repo.find_by_email(&email).await?;
                if owner.is_some_and(|other| other.account_id != current.account_id) {
                    return Err(AccountError::EmailTaken);
                }
                changes.email = Some(email);
            }
        }

        if let Some(nickname) = input.nickname {
            let nickname = Nickname::new(nickname)?;
            if nickname != current.nickname {
                let owner = self.repo.find_by_nickname(&nickname).await?;
                if owner.is_some_and(|other| other.account_id != current.account_id) {
                    return Err(AccountError::NicknameTaken);
                }
                changes.nickname = Some(nickname);
            }
        }

        if let Some(password) = input.password {
            let raw_password = RawPassword::new(password, &self.config.password_policy)?;
            changes.password_hash = Some(AccountPassword::from_raw(
                &raw_password,
                self.config.pepper(),
            )?);
        }

        changes.account_role = input.role;
        changes.profile = ProfilePatch {
            first_name: patch_field(input.first_name, |v| {
                profile::personal_name("First name", v)
            })?,
            last_name: patch_field(input.last_name, |v| profile::personal_name("Last name", v))?,
            bio: patch_field(input.bio, profile::bio)?,
            github_profile_url: patch_field(input.github_profile_url, |v| {
                profile::profile_url("GitHub profile URL", v)
            })?,
            linkedin_profile_url: patch_field(input.linkedin_profile_url, |v| {
                profile::profile_url("LinkedIn profile URL", v)
            })?,
        };

        // Same email or nickname as before
        if changes.is_empty() {
            return Ok(current);
        }

        let account = self
            .repo
            .apply_changes(account_id, &changes)
            .await?
            .ok_or(AccountError::AccountNotFound)?;

        tracing::info!(account_id = %account_id, "Account updated");
        Ok(account)
    }
}

fn patch_field<F>(value: Option<String>, validate: F) -> AccountResult<Option<Option<String>>>
where
    F: FnOnce(&str) -> kernel::error::app_error::AppResult<Option<String>>,
{
    match value {
        Some(v) => Ok(Some(optional(Some(v), validate)?)),
        None => Ok(None),
    }
}

// ============================================================================
// Delete
// ============================================================================

pub struct DeleteAccountUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, account_id: &AccountId) -> AccountResult<()> {
        if !self.repo.delete(account_id).await? {
            return Err(AccountError::AccountNotFound);
        }
        tracing::info!(account_id = %account_id, "Account deleted");
        Ok(())
    }
}
