//! Application Layer
//!
//! Use cases for the account lifecycle and profile pictures. Each use case
//! holds its dependencies by `Arc` and exposes a single `execute`.

pub mod config;
pub mod login;
pub mod manage_accounts;
pub mod profile_picture;
pub mod register;
pub mod reset_password;
pub mod unlock_account;
pub mod verify_email;

pub use config::{AccountConfig, PictureConfig};
pub use login::{LoginInput, LoginUseCase};
pub use manage_accounts::{
    AccountPage, DeleteAccountUseCase, GetAccountUseCase, ListAccountsUseCase,
    UpdateAccountInput, UpdateAccountUseCase,
};
pub use profile_picture::{UploadPictureInput, UploadProfilePictureUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use reset_password::ResetPasswordUseCase;
pub use unlock_account::{UnlockAccountUseCase, UnlockOutcome};
pub use verify_email::VerifyEmailUseCase;
