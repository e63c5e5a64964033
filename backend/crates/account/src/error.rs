//! Account Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::PG_UNIQUE_VIOLATION, kind::ErrorKind};
use platform::object_store::StorageError;
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Account not found")]
    AccountNotFound,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Nickname already taken")]
    NicknameTaken,

    /// Unique constraint hit at write time (lost a check-then-insert race)
    #[error("Account conflicts with an existing record")]
    Conflict,

    /// Input rejected by a value object
    #[error("{0}")]
    Validation(AppError),

    #[error("Invalid or expired verification token")]
    InvalidVerificationToken,

    #[error("Account locked due to too many failed login attempts")]
    AccountLocked,

    #[error("No fields to update")]
    NothingToUpdate,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("Operation not permitted")]
    Forbidden,

    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    #[error("File is too large (max {max_bytes} bytes)")]
    PayloadTooLarge { max_bytes: usize },

    #[error("Object storage unavailable")]
    StorageUnavailable(#[source] StorageError),

    #[error("Object storage misconfigured")]
    StorageMisconfigured(#[source] StorageError),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(AppError),
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::AccountNotFound => ErrorKind::NotFound,
            AccountError::EmailTaken | AccountError::NicknameTaken | AccountError::Conflict => {
                ErrorKind::Conflict
            }
            AccountError::Validation(e) => e.kind(),
            AccountError::InvalidVerificationToken
            | AccountError::AccountLocked
            | AccountError::NothingToUpdate => ErrorKind::BadRequest,
            AccountError::InvalidCredentials | AccountError::Unauthenticated => {
                ErrorKind::Unauthorized
            }
            AccountError::Forbidden => ErrorKind::Forbidden,
            AccountError::UnsupportedMediaType(_) => ErrorKind::UnsupportedMediaType,
            AccountError::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
            AccountError::StorageUnavailable(_) => ErrorKind::ServiceUnavailable,
            AccountError::StorageMisconfigured(_) => ErrorKind::InternalServerError,
            AccountError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
                ErrorKind::ServiceUnavailable
            }
            AccountError::Database(_) => ErrorKind::InternalServerError,
            AccountError::Internal(e) => e.kind(),
        }
    }

    /// Convert to AppError. Server-side details never reach the client.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountError::Validation(e) => {
                let err = AppError::new(e.kind(), e.message().to_string());
                match e.action() {
                    Some(action) => err.with_action(action.to_string()),
                    None => err,
                }
            }
            AccountError::EmailTaken => AppError::conflict(self.to_string())
                .with_action("Sign in, or register with a different email"),
            AccountError::AccountLocked => AppError::bad_request(self.to_string())
                .with_action("Contact an administrator to unlock your account"),
            AccountError::Database(_) | AccountError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            AccountError::StorageUnavailable(_) => {
                AppError::service_unavailable(self.to_string())
                    .with_action("Please try again later")
            }
            AccountError::StorageMisconfigured(_) => {
                AppError::internal("Error uploading profile picture")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Storage failures split by whether retrying could help
    pub fn from_storage(err: StorageError) -> Self {
        if err.is_transient() {
            AccountError::StorageUnavailable(err)
        } else {
            AccountError::StorageMisconfigured(err)
        }
    }

    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(e) => {
                tracing::error!(error = ?e, "Account internal error");
            }
            AccountError::StorageUnavailable(e) => {
                tracing::error!(error = %e, "Object storage unavailable");
            }
            AccountError::StorageMisconfigured(e) => {
                tracing::error!(error = %e, "Object storage rejected request");
            }
            AccountError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountError::AccountLocked => {
                tracing::warn!("Login attempt on locked account");
            }
            AccountError::Forbidden => {
                tracing::warn!("Operation not permitted for caller role");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        let challenge = matches!(
            self,
            AccountError::InvalidCredentials | AccountError::Unauthenticated
        );
        let mut response = self.to_app_error().into_response();
        if challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<sqlx::Error> for AccountError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) {
                return AccountError::Conflict;
            }
        }
        AccountError::Database(err)
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        if err.kind().is_server_error() {
            AccountError::Internal(err)
        } else {
            AccountError::Validation(err)
        }
    }
}
