use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum AccountRole {
    /// Registered but email not yet verified
    #[default]
    Anonymous = 0,
    Authenticated = 1,
    Manager = 2,
    Admin = 3,
}

impl AccountRole {
    pub const ALL: [AccountRole; 4] = [
        AccountRole::Anonymous,
        AccountRole::Authenticated,
        AccountRole::Manager,
        AccountRole::Admin,
    ];

    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use AccountRole::*;
        match self {
            Anonymous => "ANONYMOUS",
            Authenticated => "AUTHENTICATED",
            Manager => "MANAGER",
            Admin => "ADMIN",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.id() == id)
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_role_from_id() {
        assert_eq!(AccountRole::from_id(0), Some(AccountRole::Anonymous));
        assert_eq!(AccountRole::from_id(1), Some(AccountRole::Authenticated));
        assert_eq!(AccountRole::from_id(2), Some(AccountRole::Manager));
        assert_eq!(AccountRole::from_id(3), Some(AccountRole::Admin));
        assert_eq!(AccountRole::from_id(4), None);
    }

    #[test]
    fn test_account_role_code_matches_serde() {
        for role in AccountRole::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.code()));
            assert_eq!(AccountRole::from_code(role.code()), Some(role));
        }
        assert_eq!(AccountRole::from_code("admin"), None);
    }
}
