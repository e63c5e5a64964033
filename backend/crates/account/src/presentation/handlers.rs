//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::error::app_error::AppError;
use platform::token::TokenCodec;

use crate::application::config::AccountConfig;
use crate::application::{
    DeleteAccountUseCase, GetAccountUseCase, ListAccountsUseCase, LoginInput, LoginUseCase,
    RegisterUseCase, ResetPasswordUseCase, UnlockAccountUseCase, UnlockOutcome,
    UpdateAccountUseCase, UploadPictureInput, UploadProfilePictureUseCase, VerifyEmailUseCase,
    manage_accounts::DEFAULT_PAGE_LIMIT,
};
use crate::domain::repository::{AccountRepository, ObjectStorage, VerificationMailer};
use crate::domain::value_object::{account_id::AccountId, operation::Operation};
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{
    AccountListResponse, AccountResponse, ListAccountsQuery, LoginForm, MessageResponse,
    ProfilePictureResponse, RegisterRequest, ResetPasswordRequest, TokenResponse,
    UpdateAccountRequest,
};
use crate::presentation::middleware::CurrentAccount;

/// Multipart field carrying the picture
pub const PICTURE_FIELD: &str = "file";

/// Shared state for account handlers
pub struct AccountAppState<R, S, M> {
    pub repo: Arc<R>,
    pub storage: Arc<S>,
    pub mailer: Arc<M>,
    pub config: Arc<AccountConfig>,
    pub tokens: Arc<TokenCodec>,
}

impl<R, S, M> AccountAppState<R, S, M> {
    pub fn new(repo: R, storage: S, mailer: M, config: AccountConfig) -> Self {
        let tokens = TokenCodec::new(&config.token_secret, config.token_ttl);
        Self {
            repo: Arc::new(repo),
            storage: Arc::new(storage),
            mailer: Arc::new(mailer),
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}

// Arc fields only; no bounds on the backends
impl<R, S, M> Clone for AccountAppState<R, S, M> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            storage: self.storage.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<R, S, M> FromRef<AccountAppState<R, S, M>> for Arc<TokenCodec> {
    fn from_ref(state: &AccountAppState<R, S, M>) -> Self {
        state.tokens.clone()
    }
}

fn parse_account_id(raw: &str) -> AccountResult<AccountId> {
    raw.parse()
        .map_err(|_| AccountError::Validation(AppError::bad_request("Invalid account id")))
}

// ============================================================================
// Registration / Login / Verification
// ============================================================================

/// POST /register
pub async fn register<R, S, M>(
    State(state): State<AccountAppState<R, S, M>>,
    Json(req): Json<RegisterRequest>,
) -> AccountResult<Json<AccountResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );
    let account = use_case.execute(req.into()).await?;

    Ok(Json(AccountResponse::from_account(
        account,
        &state.config.public_base_url,
    )))
}

/// POST /login (form-encoded)
pub async fn login<R, S, M>(
    State(state): State<AccountAppState<R, S, M>>,
    axum::Form(form): axum::Form<LoginForm>,
) -> AccountResult<Json<TokenResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    if use_case.is_account_locked(&form.username).await? {
        return Err(AccountError::AccountLocked);
    }

    let account = use_case
        .execute(LoginInput {
            email: form.username,
            password: form.password,
        })
        .await?
        .ok_or(AccountError::InvalidCredentials)?;

    let access_token = state
        .tokens
        .issue(&account.account_id.to_string(), account.account_role.code())
        .map_err(|e| {
            AccountError::Internal(AppError::internal("Could not issue access token").with_source(e))
        })?;

    Ok(Json(TokenResponse::bearer(access_token)))
}

/// GET /verify-email/{id}/{token}
pub async fn verify_email<R, S, M>(
    State(state): State<AccountAppState<R, S, M>>,
    Path((account_id, token)): Path<(String, String)>,
) -> AccountResult<Json<MessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let account_id = account_id
        .parse::<AccountId>()
        .map_err(|_| AccountError::InvalidVerificationToken)?;

    VerifyEmailUseCase::new(state.repo.clone())
        .execute(&account_id, &token)
        .await?;

    Ok(Json(MessageResponse {
        message: "Email verified successfully",
    }))
}

// ============================================================================
// Account Management (ADMIN / MANAGER)
// ============================================================================

/// GET /users?skip&limit
pub async fn list_accounts<R, S, M>(
    State(state): State<AccountAppState<R, S, M>>,
    caller: CurrentAccount,
    Query(query): Query<ListAccountsQuery>,
) -> AccountResult<Json<AccountListResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    caller.require(Operation::ListAccounts)?;

    let page = ListAccountsUseCase::new(state.repo.clone())
        .execute(
            query.skip.unwrap_or(0),
            query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        )
        .await?;

    Ok(Json(AccountListResponse::from_page(
        page,
        &state.config.public_base_url,
    )))
}

/// POST /users
pub async fn create_account<R, S, M>(
    State(state): State<AccountAppState<R, S, M>>,
    caller: CurrentAccount,
    Json(req): Json<RegisterRequest>,
) -> AccountResult<(StatusCode, Json<AccountResponse>)>
where
    R: AccountRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    caller.require(Operation::CreateAccount)?;

    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );
    let account = use_case.execute(req.into()).await?;

    tracing::info!(
        account_id = %account.account_id,
        created_by = %caller.account_id,
        "Account created by administrator"
    );

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse::from_account(
            account,
            &state.config.public_base_url,
        )),
    ))
}

/// GET /users/{id}
pub async fn get_account<R, S, M>(
    State(state): State<AccountAppState<R, S, M>>,
    caller: CurrentAccount,
    Path(account_id): Path<String>,
) -> AccountResult<Json<AccountResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    caller.require(Operation::ReadAccount)?;
    let account_id = parse_account_id(&account_id)?;

    let account = GetAccountUseCase::new(state.repo.clone())
        .execute(&account_id)
        .await?;

    Ok(Json(AccountResponse::from_account(
        account,
        &state.config.public_base_url,
    )))
}

/// PUT /users/{id}
pub async fn update_account<R, S, M>(
    State(state): State<AccountAppState<R, S, M>>,
    caller: CurrentAccount,
    Path(account_id): Path<String>,
    Json(req): Json<UpdateAccountRequest>,
) -> AccountResult<Json<AccountResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    caller.require(Operation::UpdateAccount)?;
    let account_id = parse_account_id(&account_id)?;

    let account = UpdateAccountUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&account_id, req.into())
        .await?;

    Ok(Json(AccountResponse::from_account(
        account,
        &state.config.public_base_url,
    )))
}

/// DELETE /users/{id}
pub async fn delete_account<R, S, M>(
    State(state): State<AccountAppState<R, S, M>>,
    caller: CurrentAccount,
    Path(account_id): Path<String>,
) -> AccountResult<StatusCode>
where
    R: AccountRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    caller.require(Operation::DeleteAccount)?;
    let account_id = parse_account_id(&account_id)?;

    DeleteAccountUseCase::new(state.repo.clone())
        .execute(&account_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /users/{id}/unlock
pub async fn unlock_account<R, S, M>(
    State(state): State<AccountAppState<R, S, M>>,
    caller: CurrentAccount,
    Path(account_id): Path<String>,
) -> AccountResult<Json<MessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    caller.require(Operation::UnlockAccount)?;
    let account_id = parse_account_id(&account_id)?;

    let outcome = UnlockAccountUseCase::new(state.repo.clone())
        .execute(&account_id)
        .await?;

    let message = match outcome {
        UnlockOutcome::Unlocked => "Account unlocked successfully",
        UnlockOutcome::AlreadyUnlocked => "Account is not locked; nothing to do",
    };
    Ok(Json(MessageResponse { message }))
}

/// POST /users/{id}/reset-password
pub async fn reset_password<R, S, M>(
    State(state): State<AccountAppState<R, S, M>>,
    caller: CurrentAccount,
    Path(account_id): Path<String>,
    Json(req): Json<ResetPasswordRequest>,
) -> AccountResult<Json<MessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    caller.require(Operation::ResetPassword)?;
    let account_id = parse_account_id(&account_id)?;

    ResetPasswordUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&account_id, req.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password reset successfully",
    }))
}

// ============================================================================
// Profile Picture (any authenticated caller, own account)
// ============================================================================

/// POST /user/upload-profile-picture (multipart, field `file`)
pub async fn upload_profile_picture<R, S, M>(
    State(state): State<AccountAppState<R, S, M>>,
    caller: CurrentAccount,
    mut multipart: Multipart,
) -> AccountResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    caller.require(Operation::UploadProfilePicture)?;

    let max_bytes = state.config.picture.max_bytes;
    let multipart_error = |e: axum::extract::multipart::MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AccountError::PayloadTooLarge { max_bytes }
        } else {
            AccountError::Validation(AppError::bad_request(format!(
                "Failed to process uploaded file: {}",
                e.body_text()
            )))
        }
    };

    let mut input = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(PICTURE_FIELD) {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let filename = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        input = Some(UploadPictureInput {
            bytes: bytes.to_vec(),
            content_type,
            filename,
        });
        break;
    }

    let input = input.ok_or_else(|| {
        AccountError::Validation(
            AppError::bad_request("No file uploaded")
                .with_action(format!("Send the picture in the multipart field '{PICTURE_FIELD}'")),
        )
    })?;

    let use_case = UploadProfilePictureUseCase::new(
        state.repo.clone(),
        state.storage.clone(),
        state.config.clone(),
    );
    let profile_picture_url = use_case.execute(&caller.account_id, input).await?;

    Ok(Json(ProfilePictureResponse {
        message: "Profile picture uploaded successfully",
        profile_picture_url,
    }))
}
