//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::account::{Account, AccountChanges, Profile};
use crate::domain::repository::{AccountRepository, FailedLogin};
use crate::domain::value_object::{
    account_id::AccountId, account_password::AccountPassword, account_role::AccountRole,
    email::Email, nickname::Nickname, verification_token::VerificationToken,
};
use crate::error::{AccountError, AccountResult};

macro_rules! account_columns {
    () => {
        r#"
                account_id,
                email,
                nickname,
                password_hash,
                verification_token,
                first_name,
                last_name,
                bio,
                profile_picture_url,
                github_profile_url,
                linkedin_profile_url,
                account_role,
                email_verified,
                is_locked,
                failed_login_attempts,
                last_login_at,
                created_at,
                updated_at
        "#
    };
}

macro_rules! select_accounts {
    ($tail:literal) => {
        concat!("SELECT", account_columns!(), "FROM accounts ", $tail)
    };
}

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &Account) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                nickname,
                password_hash,
                verification_token,
                first_name,
                last_name,
                bio,
                profile_picture_url,
                github_profile_url,
                linkedin_profile_url,
                account_role,
                email_verified,
                is_locked,
                failed_login_attempts,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.nickname.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.verification_token.as_ref().map(|t| t.as_str()))
        .bind(account.profile.first_name.as_deref())
        .bind(account.profile.last_name.as_deref())
        .bind(account.profile.bio.as_deref())
        .bind(account.profile_picture_url.as_deref())
        .bind(account.profile.github_profile_url.as_deref())
        .bind(account.profile.linkedin_profile_url.as_deref())
        .bind(account.account_role.id())
        .bind(account.email_verified)
        .bind(account.is_locked)
        .bind(attempts_to_db(account.failed_login_attempts))
        .bind(account.last_login_at)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(select_accounts!("WHERE account_id = $1"))
            .bind(account_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(select_accounts!("WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_by_nickname(&self, nickname: &Nickname) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(select_accounts!("WHERE nickname = $1"))
            .bind(nickname.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_nickname(&self, nickname: &Nickname) -> AccountResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE nickname = $1)",
        )
        .bind(nickname.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn record_login(
        &self,
        account_id: &AccountId,
        at: DateTime<Utc>,
    ) -> AccountResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE accounts SET
                failed_login_attempts = 0,
                last_login_at = $2,
                updated_at = $2
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn record_failed_login(
        &self,
        account_id: &AccountId,
        threshold: u32,
    ) -> AccountResult<Option<FailedLogin>> {
        // The row lock serializes concurrent failures; SET sees pre-update values
        let row = sqlx::query_as::<_, (i32, bool, bool)>(
            r#"
            WITH previous AS (
                SELECT account_id, is_locked
                FROM accounts
                WHERE account_id = $1
                FOR UPDATE
            )
            UPDATE accounts AS a SET
                failed_login_attempts = LEAST(a.failed_login_attempts, 2147483646) + 1,
                is_locked = a.is_locked OR LEAST(a.failed_login_attempts, 2147483646) + 1 >= $2,
                updated_at = $3
            FROM previous
            WHERE a.account_id = previous.account_id
            RETURNING a.failed_login_attempts, a.is_locked, previous.is_locked
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(attempts_to_db(threshold))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(attempts, is_locked, was_locked)| FailedLogin {
            failed_login_attempts: u32::try_from(attempts).unwrap_or(0),
            locked_now: is_locked && !was_locked,
        }))
    }

    async fn verify_email(
        &self,
        account_id: &AccountId,
        token: &str,
    ) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(concat!(
            r#"
            UPDATE accounts SET
                verification_token = NULL,
                email_verified = TRUE,
                account_role = CASE WHEN account_role = $3 THEN $4 ELSE account_role END,
                updated_at = $5
            WHERE account_id = $1 AND verification_token = $2
            RETURNING"#,
            account_columns!()
        ))
        .bind(account_id.as_uuid())
        .bind(token)
        .bind(AccountRole::Anonymous.id())
        .bind(AccountRole::Authenticated.id())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn unlock(&self, account_id: &AccountId) -> AccountResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE accounts SET
                is_locked = FALSE,
                failed_login_attempts = 0,
                updated_at = $2
            WHERE account_id = $1 AND is_locked
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn reset_password(
        &self,
        account_id: &AccountId,
        password_hash: &AccountPassword,
    ) -> AccountResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE accounts SET
                password_hash = $2,
                is_locked = FALSE,
                failed_login_attempts = 0,
                updated_at = $3
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(password_hash.as_phc_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn set_profile_picture_url(
        &self,
        account_id: &AccountId,
        url: &str,
    ) -> AccountResult<bool> {
        let updated = sqlx::query(
            "UPDATE accounts SET profile_picture_url = $2, updated_at = $3 WHERE account_id = $1",
        )
        .bind(account_id.as_uuid())
        .bind(url)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn apply_changes(
        &self,
        account_id: &AccountId,
        changes: &AccountChanges,
    ) -> AccountResult<Option<Account>> {
        let profile = &changes.profile;
        let row = sqlx::query_as::<_, AccountRow>(concat!(
            r#"
            UPDATE accounts SET
                email = COALESCE($2, email),
                nickname = COALESCE($3, nickname),
                password_hash = COALESCE($4, password_hash),
                account_role = COALESCE($5, account_role),
                first_name = CASE WHEN $6 THEN $7 ELSE first_name END,
                last_name = CASE WHEN $8 THEN $9 ELSE last_name END,
                bio = CASE WHEN $10 THEN $11 ELSE bio END,
                github_profile_url = CASE WHEN $12 THEN $13 ELSE github_profile_url END,
                linkedin_profile_url = CASE WHEN $14 THEN $15 ELSE linkedin_profile_url END,
                updated_at = $16
            WHERE account_id = $1
            RETURNING"#,
            account_columns!()
        ))
        .bind(account_id.as_uuid())
        .bind(changes.email.as_ref().map(|e| e.as_str()))
        .bind(changes.nickname.as_ref().map(|n| n.as_str()))
        .bind(changes.password_hash.as_ref().map(|p| p.as_phc_string()))
        .bind(changes.account_role.map(|r| r.id()))
        .bind(profile.first_name.is_some())
        .bind(profile.first_name.clone().flatten())
        .bind(profile.last_name.is_some())
        .bind(profile.last_name.clone().flatten())
        .bind(profile.bio.is_some())
        .bind(profile.bio.clone().flatten())
        .bind(profile.github_profile_url.is_some())
        .bind(profile.github_profile_url.clone().flatten())
        .bind(profile.linkedin_profile_url.is_some())
        .bind(profile.linkedin_profile_url.clone().flatten())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn delete(&self, account_id: &AccountId) -> AccountResult<bool> {
        let deleted = sqlx::query("DELETE FROM accounts WHERE account_id = $1")
            .bind(account_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn count(&self) -> AccountResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn list(&self, skip: u64, limit: u64) -> AccountResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountRow>(select_accounts!(
            "ORDER BY created_at, account_id OFFSET $1 LIMIT $2"
        ))
        .bind(i64::try_from(skip).unwrap_or(i64::MAX))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AccountRow::into_account).collect()
    }
}

fn attempts_to_db(attempts: u32) -> i32 {
    i32::try_from(attempts).unwrap_or(i32::MAX)
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    nickname: String,
    password_hash: String,
    verification_token: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    bio: Option<String>,
    profile_picture_url: Option<String>,
    github_profile_url: Option<String>,
    linkedin_profile_url: Option<String>,
    account_role: i16,
    email_verified: bool,
    is_locked: bool,
    failed_login_attempts: i32,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AccountResult<Account> {
        let account_role = AccountRole::from_id(self.account_role).ok_or_else(|| {
            AccountError::Internal(kernel::error::app_error::AppError::internal(format!(
                "Invalid account_role in database: {}",
                self.account_role
            )))
        })?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            nickname: Nickname::from_db(self.nickname),
            password_hash: AccountPassword::from_phc_string(self.password_hash)?,
            verification_token: self.verification_token.map(VerificationToken::from_db),
            profile: Profile {
                first_name: self.first_name,
                last_name: self.last_name,
                bio: self.bio,
                github_profile_url: self.github_profile_url,
                linkedin_profile_url: self.linkedin_profile_url,
            },
            profile_picture_url: self.profile_picture_url,
            account_role,
            email_verified: self.email_verified,
            is_locked: self.is_locked,
            failed_login_attempts: u32::try_from(self.failed_login_attempts).unwrap_or(0),
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
