//! Login Use Case
//!
//! Password check with lockout. Every "no" answer is the same `None` so a
//! caller cannot tell an unknown email from a wrong password.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_password::RawPassword, email::Email};
use crate::error::AccountResult;

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    /// `Some(account)` on success. `None` when the account is absent,
    /// unverified, locked, or the password does not match.
    pub async fn execute(&self, input: LoginInput) -> AccountResult<Option<Account>> {
        let threshold = self.config.max_login_attempts;

        let Ok(email) = Email::new(&input.email) else {
            return Ok(None);
        };
        let Some(mut account) = self.repo.find_by_email(&email).await? else {
            return Ok(None);
        };

        if !account.is_login_permitted() {
            tracing::debug!(
                account_id = %account.account_id,
                email_verified = account.email_verified,
                is_locked = account.is_locked,
                "Login refused"
            );
            return Ok(None);
        }

        let raw_password = RawPassword::for_login(input.password);
        if account
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            let at = account.record_login();
            if !self.repo.record_login(&account.account_id, at).await? {
                return Ok(None);
            }
            tracing::info!(account_id = %account.account_id, "Account logged in");
            return Ok(Some(account));
        }

        // Counted against the stored row, not the snapshot read above
        let failed = self
            .repo
            .record_failed_login(&account.account_id, threshold)
            .await?;
        if let Some(failed) = failed.filter(|f| f.locked_now) {
            tracing::warn!(
                account_id = %account.account_id,
                failed_login_attempts = failed.failed_login_attempts,
                "Account locked after repeated failed logins"
            );
        }
        Ok(None)
    }

    /// `true` only for an existing, locked account
    pub async fn is_account_locked(&self, email: &str) -> AccountResult<bool> {
        let Ok(email) = Email::new(email) else {
            return Ok(false);
        };
        Ok(self
            .repo
            .find_by_email(&email)
            .await?
            .is_some_and(|account| account.is_locked))
    }
}
