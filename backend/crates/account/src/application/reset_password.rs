//! Reset Password Use Case
//!
//! Administrative password replacement. Also clears any lockout.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_id::AccountId,
    account_password::{AccountPassword, RawPassword},
};
use crate::error::{AccountError, AccountResult};

pub struct ResetPasswordUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> ResetPasswordUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, account_id: &AccountId, new_password: String) -> AccountResult<()> {
        if self.repo.find_by_id(account_id).await?.is_none() {
            return Err(AccountError::AccountNotFound);
        }

        let raw_password = RawPassword::new(new_password, &self.config.password_policy)?;
        let password_hash = AccountPassword::from_raw(&raw_password, self.config.pepper())?;

        if !self.repo.reset_password(account_id, &password_hash).await? {
            return Err(AccountError::AccountNotFound);
        }

        tracing::info!(account_id = %account_id, "Password reset");
        Ok(())
    }
}
