use thiserror::Error;

use leafy_core::DomainError;

/// Gateway operation error.
///
/// These are **infrastructure** failures (connectivity, corrupt rows,
/// constraint conflicts), distinct from domain errors. The service boundary
/// translates them into the domain taxonomy.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return StoreError::Conflict(db.message().to_string());
            }
        }
        StoreError::Unavailable(e.to_string())
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(msg) | StoreError::Corrupt(msg) => DomainError::Dependency(msg),
            StoreError::Conflict(msg) => DomainError::Validation(msg),
        }
    }
}
