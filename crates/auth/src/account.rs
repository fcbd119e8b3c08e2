//! Registered accounts and credential handling.
//!
//! Passwords are stored as salted bcrypt hashes and verified with bcrypt's
//! constant-time comparison. Plaintext never leaves the registration/login
//! call frames.

use chrono::{DateTime, Utc};

use leafy_core::{DomainError, Username};

use crate::Role;

/// A registered account.
///
/// # Invariants
/// - `username` is unique (enforced by the persistence gateway).
/// - `password_hash` is always a bcrypt hash, never plaintext.
/// - `role` is fixed at creation; there is no role-mutation operation.
///
/// Deliberately not serde-serializable: the hash must never ride along into
/// a response body by accident. Transport layers pick fields explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create an account from raw registration input.
    ///
    /// Validates the credential pair and hashes the password. The role is a
    /// parameter so seeding can create admins; the public registration path
    /// always passes `Role::Customer`.
    pub fn register(
        username: impl Into<String>,
        password: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let username = Username::new(username)?;
        if password.trim().is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| DomainError::dependency(format!("password hashing failed: {e}")))?;

        Ok(Self {
            username,
            password_hash,
            role,
            created_at: now,
        })
    }

    /// Constant-time credential check.
    ///
    /// A malformed stored hash counts as a mismatch rather than an error so
    /// login cannot be used to probe for corrupt records.
    pub fn verify_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}
