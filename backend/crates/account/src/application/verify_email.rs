//! Verify Email Use Case

use std::sync::Arc;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AccountError, AccountResult};

pub struct VerifyEmailUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> VerifyEmailUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Unknown account, no pending token and wrong token all fail the same way
    pub async fn execute(&self, account_id: &AccountId, token: &str) -> AccountResult<Account> {
        let pending = self
            .repo
            .find_by_id(account_id)
            .await?
            .ok_or(AccountError::InvalidVerificationToken)?;

        if !pending.verification_matches(token) {
            return Err(AccountError::InvalidVerificationToken);
        }

        // Consumed concurrently if the store no longer holds this token
        let account = self
            .repo
            .verify_email(account_id, token)
            .await?
            .ok_or(AccountError::InvalidVerificationToken)?;

        tracing::info!(
            account_id = %account.account_id,
            role = %account.account_role,
            "Email verified"
        );

        Ok(account)
    }
}
