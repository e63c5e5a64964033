//! Account Management Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Account entity, value objects, repository/storage/mailer traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL, S3 and SMTP implementations
//! - `presentation/` - HTTP handlers, DTOs, bearer auth, router
//!
//! ## Features
//! - Registration with generated nicknames and email verification
//! - Login with lockout after repeated failures
//! - Role-based administration (Anonymous, Authenticated, Manager, Admin)
//! - Profile pictures stored in an S3-compatible bucket
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional pepper)
//! - Stateless HS256 bearer tokens carrying account id and role
//! - The first registered account becomes Admin

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AccountConfig, PictureConfig};
pub use error::{AccountError, AccountResult};
pub use infra::{PgAccountRepository, S3ObjectStorage, SmtpConfig, SmtpMailer};
pub use presentation::{AccountAppState, account_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
