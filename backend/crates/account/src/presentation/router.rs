//! Account Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::domain::repository::{AccountRepository, ObjectStorage, VerificationMailer};
use crate::infra::{PgAccountRepository, S3ObjectStorage, SmtpMailer};
use crate::presentation::handlers::{self, AccountAppState};

/// Room for multipart boundaries and headers on top of the picture itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// State wired to the production backends
pub type PgAccountAppState = AccountAppState<PgAccountRepository, S3ObjectStorage, SmtpMailer>;

/// Create the account router for any backend implementation
pub fn account_router<R, S, M>(state: AccountAppState<R, S, M>) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let upload_limit = state
        .config
        .picture
        .max_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/register", post(handlers::register::<R, S, M>))
        .route("/login", post(handlers::login::<R, S, M>))
        .route(
            "/verify-email/{id}/{token}",
            get(handlers::verify_email::<R, S, M>),
        )
        .route(
            "/users",
            get(handlers::list_accounts::<R, S, M>).post(handlers::create_account::<R, S, M>),
        )
        .route(
            "/users/{id}",
            get(handlers::get_account::<R, S, M>)
                .put(handlers::update_account::<R, S, M>)
                .delete(handlers::delete_account::<R, S, M>),
        )
        .route(
            "/users/{id}/unlock",
            post(handlers::unlock_account::<R, S, M>),
        )
        .route(
            "/users/{id}/reset-password",
            post(handlers::reset_password::<R, S, M>),
        )
        .route(
            "/user/upload-profile-picture",
            post(handlers::upload_profile_picture::<R, S, M>)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
