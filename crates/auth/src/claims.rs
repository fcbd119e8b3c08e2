use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// Bearer token claims (transport-agnostic).
///
/// This is the minimal set of claims the storefront expects once a token has
/// been decoded/verified by whatever transport layer is in use. Timestamps
/// are unix seconds to match the JWT `iat`/`exp` registered claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the account's username.
    pub sub: String,

    /// Role granted to the account.
    pub role: Role,

    /// Issued-at, unix seconds.
    pub iat: i64,

    /// Expiration, unix seconds.
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(sub: impl Into<String>, role: Role, issued_at: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        Self {
            sub: sub.into(),
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate token claims.
///
/// Note: this validates the *claims* only. Signature verification/decoding is
/// intentionally outside this crate.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn fresh_claims_validate() {
        let now = Utc::now();
        let claims = TokenClaims::new("alice", Role::Customer, now, Duration::hours(24));
        assert!(validate_claims(&claims, now).is_ok());
    }

    #[test]
    fn expired_claims_rejected() {
        let issued = Utc::now() - Duration::hours(25);
        let claims = TokenClaims::new("alice", Role::Customer, issued, Duration::hours(24));
        assert_eq!(
            validate_claims(&claims, Utc::now()),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn inverted_window_rejected() {
        let now = Utc::now();
        let claims = TokenClaims::new("alice", Role::Admin, now, Duration::seconds(0));
        assert_eq!(
            validate_claims(&claims, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }
}
