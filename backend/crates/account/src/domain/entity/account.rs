//! Account Entity
//!
//! Aggregate root of the account lifecycle. Login, verification and lockout
//! rules live here as plain state transitions; persistence and clocks beyond
//! `Utc::now()` are the caller's concern.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId, account_password::AccountPassword, account_role::AccountRole,
    email::Email, nickname::Nickname, verification_token::VerificationToken,
};

/// Optional profile fields supplied at registration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub github_profile_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
}

/// Partial profile update; `Some(None)` clears a field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub first_name: Option<Option<String>>,
    pub last_name: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub github_profile_url: Option<Option<String>>,
    pub linkedin_profile_url: Option<Option<String>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.bio.is_none()
            && self.github_profile_url.is_none()
            && self.linkedin_profile_url.is_none()
    }
}

/// Administrative edit; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub email: Option<Email>,
    pub nickname: Option<Nickname>,
    pub password_hash: Option<AccountPassword>,
    pub account_role: Option<AccountRole>,
    pub profile: ProfilePatch,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.nickname.is_none()
            && self.password_hash.is_none()
            && self.account_role.is_none()
            && self.profile.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    pub email: Email,
    pub nickname: Nickname,
    pub password_hash: AccountPassword,
    /// Present only until the email is verified
    pub verification_token: Option<VerificationToken>,
    pub profile: Profile,
    pub profile_picture_url: Option<String>,
    pub account_role: AccountRole,
    pub email_verified: bool,
    pub is_locked: bool,
    pub failed_login_attempts: u32,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// New account. The first account in the system becomes a verified
    /// admin; every later one starts anonymous with a verification token.
    pub fn register(
        email: Email,
        nickname: Nickname,
        password_hash: AccountPassword,
        profile: Profile,
        is_first_account: bool,
    ) -> Self {
        let now = Utc::now();
        let (account_role, verification_token) = if is_first_account {
            (AccountRole::Admin, None)
        } else {
            (AccountRole::Anonymous, Some(VerificationToken::generate()))
        };

        Self {
            account_id: AccountId::new(),
            email,
            nickname,
            password_hash,
            verification_token,
            profile,
            profile_picture_url: None,
            account_role,
            email_verified: account_role == AccountRole::Admin,
            is_locked: false,
            failed_login_attempts: 0,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Verified and not locked
    pub fn is_login_permitted(&self) -> bool {
        self.email_verified && !self.is_locked
    }

    /// Count a password mismatch; locks once the counter reaches `threshold`.
    /// Returns `true` when this call locked the account.
    pub fn record_failed_login(&mut self, threshold: u32) -> bool {
        self.failed_login_attempts = self.failed_login_attempts.saturating_add(1);
        self.updated_at = Utc::now();

        if !self.is_locked && self.failed_login_attempts >= threshold {
            self.is_locked = true;
            return true;
        }
        false
    }

    /// Successful login. Lock state is left untouched.
    pub fn record_login(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        self.failed_login_attempts = 0;
        self.last_login_at = Some(now);
        self.updated_at = now;
        now
    }

    /// Constant-time check against the pending token
    pub fn verification_matches(&self, token: &str) -> bool {
        self.verification_token
            .as_ref()
            .is_some_and(|pending| pending.matches(token))
    }

    /// Consume the verification token. On mismatch (or when no token is
    /// pending) nothing changes and `false` is returned.
    pub fn verify_email(&mut self, token: &str) -> bool {
        if !self.verification_matches(token) {
            return false;
        }

        self.verification_token = None;
        self.email_verified = true;
        if self.account_role == AccountRole::Anonymous {
            self.account_role = AccountRole::Authenticated;
        }
        self.updated_at = Utc::now();
        true
    }

    /// Clear the lock. Returns `false` if the account was not locked.
    pub fn unlock(&mut self) -> bool {
        if !self.is_locked {
            return false;
        }
        self.is_locked = false;
        self.failed_login_attempts = 0;
        self.updated_at = Utc::now();
        true
    }

    /// Replace the password and clear any lockout
    pub fn reset_password(&mut self, password_hash: AccountPassword) {
        self.password_hash = password_hash;
        self.is_locked = false;
        self.failed_login_attempts = 0;
        self.updated_at = Utc::now();
    }

    /// Apply an administrative edit
    pub fn apply_changes(&mut self, changes: AccountChanges) {
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(nickname) = changes.nickname {
            self.nickname = nickname;
        }
        if let Some(password_hash) = changes.password_hash {
            self.password_hash = password_hash;
        }
        if let Some(role) = changes.account_role {
            self.account_role = role;
        }

        let patch = changes.profile;
        let p = &mut self.profile;
        if let Some(v) = patch.first_name {
            p.first_name = v;
        }
        if let Some(v) = patch.last_name {
            p.last_name = v;
        }
        if let Some(v) = patch.bio {
            p.bio = v;
        }
        if let Some(v) = patch.github_profile_url {
            p.github_profile_url = v;
        }
        if let Some(v) = patch.linkedin_profile_url {
            p.linkedin_profile_url = v;
        }
        self.updated_at = Utc::now();
    }
}
