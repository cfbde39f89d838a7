use rusqlite::ffi;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by the repositories.
///
/// Constraint failures reported by SQLite are split out by kind so callers
/// can map them to their own responses; anything else stays a raw
/// `rusqlite::Error`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Not null constraint violation: {0}")]
    NotNullViolation(String),

    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Database error: {0}")]
    Sqlite(rusqlite::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StoreError::NotFound { entity, id }
    }

    /// True for any of the engine-reported constraint failures.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::ForeignKeyViolation(_)
                | StoreError::UniqueViolation(_)
                | StoreError::NotNullViolation(_)
                | StoreError::CheckViolation(_)
        )
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        let classified = match &err {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                let detail = message.clone().unwrap_or_else(|| failure.to_string());
                match failure.extended_code {
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(StoreError::ForeignKeyViolation(detail)),
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        Some(StoreError::UniqueViolation(detail))
                    }
                    ffi::SQLITE_CONSTRAINT_NOTNULL => Some(StoreError::NotNullViolation(detail)),
                    ffi::SQLITE_CONSTRAINT_CHECK => Some(StoreError::CheckViolation(detail)),
                    _ => None,
                }
            }
            _ => None,
        };

        match classified {
            Some(violation) => {
                tracing::warn!("Constraint violation: {}", violation);
                violation
            }
            None => StoreError::Sqlite(err),
        }
    }
}
