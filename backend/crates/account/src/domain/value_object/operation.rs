//! Authorization Policy
//!
//! Each protected operation has a fixed set of roles allowed to perform it.
//! Checked at the HTTP boundary; use cases assume the caller was authorized.

use super::account_role::AccountRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListAccounts,
    ReadAccount,
    CreateAccount,
    UpdateAccount,
    DeleteAccount,
    UnlockAccount,
    ResetPassword,
    /// Always applies to the caller's own account
    UploadProfilePicture,
}

impl Operation {
    pub const fn permitted_roles(&self) -> &'static [AccountRole] {
        use AccountRole::*;
        match self {
            Operation::ListAccounts
            | Operation::ReadAccount
            | Operation::CreateAccount
            | Operation::UpdateAccount
            | Operation::DeleteAccount
            | Operation::UnlockAccount
            | Operation::ResetPassword => &[Admin, Manager],
            Operation::UploadProfilePicture => &[Anonymous, Authenticated, Manager, Admin],
        }
    }

    pub fn permits(&self, role: AccountRole) -> bool {
        self.permitted_roles().contains(&role)
    }
}
