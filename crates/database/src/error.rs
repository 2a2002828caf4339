use sea_orm::{DbErr, SqlErr};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the catalog and schedule stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record matched the key
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    /// A record with the same identity already exists
    #[error("{entity} '{key}' already exists")]
    Conflict { entity: &'static str, key: String },

    /// A stored document no longer decodes into its domain type
    #[error("stored {entity} is corrupt: {message}")]
    Corrupt {
        entity: &'static str,
        message: String,
    },

    /// The backing database failed
    #[error("database error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn conflict(entity: &'static str, key: impl ToString) -> Self {
        Self::Conflict {
            entity,
            key: key.to_string(),
        }
    }

    pub fn corrupt(entity: &'static str, err: impl ToString) -> Self {
        Self::Corrupt {
            entity,
            message: err.to_string(),
        }
    }

    /// Maps a failed insert, turning unique-key violations into [`StoreError::Conflict`]
    pub fn from_insert(err: DbErr, entity: &'static str, key: impl ToString) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::conflict(entity, key),
            _ => Self::from(err),
        }
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        StoreError::Backend(err.to_string())
    }
}
