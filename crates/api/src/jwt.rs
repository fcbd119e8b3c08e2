//! Bearer token encode/decode.
//!
//! HS256 JWTs carrying [`TokenClaims`]. Claims semantics (expiry windows)
//! live in `leafy-auth`; this module only does the signature work.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use leafy_auth::{Account, TokenClaims, validate_claims};
use leafy_core::DomainError;

/// Token lifetime, matching the original 24 h sessions.
pub fn token_ttl() -> Duration {
    Duration::hours(24)
}

pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mint a token for a freshly authenticated account.
    pub fn issue(&self, account: &Account, now: DateTime<Utc>) -> Result<String, DomainError> {
        let claims = TokenClaims::new(account.username.as_str(), account.role, now, token_ttl());
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| DomainError::dependency(format!("token encoding failed: {e}")))
    }

    /// Verify signature and claim window. Any failure is `None`: callers
    /// treat an invalid token the same as no token.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Option<TokenClaims> {
        let decoded = jsonwebtoken::decode::<TokenClaims>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        )
        .ok()?;

        validate_claims(&decoded.claims, now).ok()?;
        Some(decoded.claims)
    }
}
