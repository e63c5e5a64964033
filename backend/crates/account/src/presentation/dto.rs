//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::manage_accounts::AccountPage;
use crate::application::{RegisterInput, UpdateAccountInput};
use crate::domain::entity::account::Account;
use crate::domain::value_object::account_role::AccountRole;
use crate::presentation::links::{self, Link};

// ============================================================================
// Registration / Creation
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub nickname: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub github_profile_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        RegisterInput {
            email: req.email,
            password: req.password,
            nickname: req.nickname,
            first_name: req.first_name,
            last_name: req.last_name,
            bio: req.bio,
            github_profile_url: req.github_profile_url,
            linkedin_profile_url: req.linkedin_profile_url,
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// OAuth2 password-flow form; `username` carries the email
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

// ============================================================================
// Account
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub nickname: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub github_profile_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub role: AccountRole,
    pub email_verified: bool,
    pub is_locked: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub links: Vec<Link>,
}

impl AccountResponse {
    pub fn from_account(account: Account, base_url: &str) -> Self {
        let links = links::account_links(base_url, &account.account_id);
        Self {
            id: account.account_id.to_string(),
            email: account.email.as_str().to_string(),
            nickname: account.nickname.as_str().to_string(),
            first_name: account.profile.first_name,
            last_name: account.profile.last_name,
            bio: account.profile.bio,
            profile_picture_url: account.profile_picture_url,
            github_profile_url: account.profile.github_profile_url,
            linkedin_profile_url: account.profile.linkedin_profile_url,
            role: account.account_role,
            email_verified: account.email_verified,
            is_locked: account.is_locked,
            last_login_at: account.last_login_at,
            created_at: account.created_at,
            updated_at: account.updated_at,
            links,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAccountsQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountListResponse {
    pub items: Vec<AccountResponse>,
    pub total: u64,
    /// 1-based
    pub page: u64,
    pub size: usize,
    pub links: Vec<Link>,
}

impl AccountListResponse {
    pub fn from_page(page: AccountPage, base_url: &str) -> Self {
        let links = links::pagination_links(base_url, page.skip, page.limit, page.total);
        let page_number = page.page();
        let items: Vec<_> = page
            .items
            .into_iter()
            .map(|account| AccountResponse::from_account(account, base_url))
            .collect();

        Self {
            size: items.len(),
            items,
            total: page.total,
            page: page_number,
            links,
        }
    }
}

/// Absent fields are left unchanged; an empty profile string clears the field
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub password: Option<String>,
    pub role: Option<AccountRole>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub github_profile_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
}

impl From<UpdateAccountRequest> for UpdateAccountInput {
    fn from(req: UpdateAccountRequest) -> Self {
        UpdateAccountInput {
            email: req.email,
            nickname: req.nickname,
            password: req.password,
            role: req.role,
            first_name: req.first_name,
            last_name: req.last_name,
            bio: req.bio,
            github_profile_url: req.github_profile_url,
            linkedin_profile_url: req.linkedin_profile_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ============================================================================
// Misc
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfilePictureResponse {
    pub message: &'static str,
    pub profile_picture_url: String,
}
