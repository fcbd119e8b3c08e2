//! `leafy-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it models who
//! is acting (guest, customer, admin), account credentials, and token claims.
//! Signature verification / token encoding is a transport concern and lives in
//! the API crate.

pub mod account;
pub mod actor;
pub mod claims;
pub mod policy;
pub mod roles;

pub use account::Account;
pub use actor::Actor;
pub use claims::{TokenClaims, TokenValidationError, validate_claims};
pub use policy::{ensure_admin, ensure_authenticated};
pub use roles::Role;
