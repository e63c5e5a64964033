//! Unlock Account Use Case

use std::sync::Arc;

use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AccountError, AccountResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    Unlocked,
    /// Account was not locked; nothing written
    AlreadyUnlocked,
}

pub struct UnlockAccountUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> UnlockAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, account_id: &AccountId) -> AccountResult<UnlockOutcome> {
        if self.repo.find_by_id(account_id).await?.is_none() {
            return Err(AccountError::AccountNotFound);
        }

        if !self.repo.unlock(account_id).await? {
            return Ok(UnlockOutcome::AlreadyUnlocked);
        }
        tracing::info!(account_id = %account_id, "Account unlocked");

        Ok(UnlockOutcome::Unlocked)
    }
}
