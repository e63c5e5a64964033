//! Bearer Authentication
//!
//! Extractor that authenticates the caller from an `Authorization: Bearer`
//! header, plus the role check used by protected handlers.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header, request::Parts};
use platform::token::TokenCodec;

use crate::domain::value_object::{
    account_id::AccountId, account_role::AccountRole, operation::Operation,
};
use crate::error::AccountError;

/// Authenticated caller, taken from a valid bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentAccount {
    pub account_id: AccountId,
    pub role: AccountRole,
}

impl CurrentAccount {
    /// `Forbidden` unless the caller's role may perform `operation`
    pub fn require(&self, operation: Operation) -> Result<(), AccountError> {
        if operation.permits(self.role) {
            return Ok(());
        }
        tracing::debug!(
            account_id = %self.account_id,
            role = %self.role,
            operation = ?operation,
            "Role not permitted"
        );
        Err(AccountError::Forbidden)
    }
}

impl<S> FromRequestParts<S> for CurrentAccount
where
    Arc<TokenCodec>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AccountError::Unauthenticated)?;
        let codec = Arc::<TokenCodec>::from_ref(state);

        let claims = codec.decode(token).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            AccountError::Unauthenticated
        })?;

        let account_id = claims
            .sub
            .parse::<AccountId>()
            .map_err(|_| AccountError::Unauthenticated)?;
        let role = AccountRole::from_code(&claims.role).ok_or(AccountError::Unauthenticated)?;

        Ok(Self { account_id, role })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/users");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts(Some("bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts(None)), None);
    }

    #[test]
    fn test_require() {
        let caller = CurrentAccount {
            account_id: AccountId::new(),
            role: AccountRole::Authenticated,
        };
        assert!(caller.require(Operation::UploadProfilePicture).is_ok());
        assert!(matches!(
            caller.require(Operation::ListAccounts),
            Err(AccountError::Forbidden)
        ));
    }
}
