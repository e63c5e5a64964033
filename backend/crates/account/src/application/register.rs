//! Register Use Case
//!
//! Creates a new account. Used both for self-service registration and for
//! accounts created by an administrator.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::entity::account::{Account, Profile};
use crate::domain::repository::{AccountRepository, VerificationEmail, VerificationMailer};
use crate::domain::value_object::{
    account_password::{AccountPassword, RawPassword},
    email::Email,
    nickname::Nickname,
    profile,
};
use crate::error::{AccountError, AccountResult};

/// Generated nicknames tried before giving up
const MAX_NICKNAME_ATTEMPTS: usize = 16;

#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    /// Generated when absent
    pub nickname: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub github_profile_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
}

pub struct RegisterUseCase<R, M>
where
    R: AccountRepository,
    M: VerificationMailer,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<AccountConfig>,
}

impl<R, M> RegisterUseCase<R, M>
where
    R: AccountRepository,
    M: VerificationMailer,
{
    pub fn new(repo: Arc<R>, mailer: Arc<M>, config: Arc<AccountConfig>) -> Self {
        Self {
            repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<Account> {
        let email = Email::new(&input.email)?;
        if self.repo.exists_by_email(&email).await? {
            return Err(AccountError::EmailTaken);
        }

        let profile = Profile {
            first_name: optional(input.first_name, |v| profile::personal_name("First name", v))?,
            last_name: optional(input.last_name, |v| profile::personal_name("Last name", v))?,
            bio: optional(input.bio, profile::bio)?,
            github_profile_url: optional(input.github_profile_url, |v| {
                profile::profile_url("GitHub profile URL", v)
            })?,
            linkedin_profile_url: optional(input.linkedin_profile_url, |v| {
                profile::profile_url("LinkedIn profile URL", v)
            })?,
        };

        let raw_password = RawPassword::new(input.password, &self.config.password_policy)?;
        let password_hash = AccountPassword::from_raw(&raw_password, self.config.pepper())?;

        let nickname = match input.nickname {
            Some(requested) => {
                let nickname = Nickname::new(requested)?;
                if self.repo.exists_by_nickname(&nickname).await? {
                    return Err(AccountError::NicknameTaken);
                }
                nickname
            }
            None => self.unique_generated_nickname().await?,
        };

        let is_first_account = self.repo.count().await? == 0;
        let account = Account::register(email, nickname, password_hash, profile, is_first_account);

        self.repo.create(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            nickname = %account.nickname,
            role = %account.account_role,
            "Account registered"
        );

        if let Some(token) = &account.verification_token {
            let message = VerificationEmail {
                to: account.email.clone(),
                nickname: account.nickname.clone(),
                verification_url: self
                    .config
                    .verification_url(&account.account_id, token.as_str()),
            };
            // Mail failure never fails registration
            if let Err(e) = self.mailer.send_verification(&message).await {
                tracing::warn!(
                    account_id = %account.account_id,
                    error = %e,
                    "Verification email not sent"
                );
            }
        }

        Ok(account)
    }

    async fn unique_generated_nickname(&self) -> AccountResult<Nickname> {
        for _ in 0..MAX_NICKNAME_ATTEMPTS {
            let candidate = Nickname::generate();
            if !self.repo.exists_by_nickname(&candidate).await? {
                return Ok(candidate);
            }
            tracing::debug!(nickname = %candidate, "Generated nickname collided");
        }
        Err(AccountError::NicknameTaken)
    }
}

/// Validate an optional text field; `None` and blank both mean "not set"
pub(crate) fn optional<F>(value: Option<String>, validate: F) -> AccountResult<Option<String>>
where
    F: FnOnce(&str) -> kernel::error::app_error::AppResult<Option<String>>,
{
    match value {
        Some(v) => Ok(validate(&v)?),
        None => Ok(None),
    }
}
