//! Error types for the PostgreSQL storage backend.

use guildtally_storage::StorageError;
use sqlx_core::error::Error as SqlxError;

/// PostgreSQL error code for unique constraint violations (23505).
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// Checks if a sqlx error has a specific PostgreSQL error code.
pub fn has_pg_error_code(err: &SqlxError, code: &str) -> bool {
    if let SqlxError::Database(db_err) = err {
        db_err.code().as_deref() == Some(code)
    } else {
        false
    }
}

/// Checks if a sqlx error is a unique constraint violation (23505).
pub fn is_unique_violation(err: &SqlxError) -> bool {
    has_pg_error_code(err, PG_UNIQUE_VIOLATION)
}

/// Errors specific to the PostgreSQL storage backend.
#[derive(Debug, thiserror::Error)]
pub enum PostgresError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx_core::error::Error),

    /// Schema setup error.
    #[error("Schema setup error: {0}")]
    Setup(String),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PostgresError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<PostgresError> for StorageError {
    fn from(err: PostgresError) -> Self {
        match err {
            PostgresError::Connection(e) => StorageError::connection(e.to_string()),
            PostgresError::Setup(e) => StorageError::internal(format!("Schema setup error: {e}")),
            PostgresError::Config { message } => {
                StorageError::internal(format!("Configuration error: {message}"))
            }
        }
    }
}

/// Result type alias for PostgreSQL operations.
pub type Result<T> = std::result::Result<T, PostgresError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PostgresError::config("invalid URL");
        assert!(err.to_string().contains("Configuration error"));

        let err = PostgresError::Setup("table locked".to_string());
        assert!(err.to_string().contains("Schema setup error"));
    }

    #[test]
    fn test_conversion_to_storage_error() {
        let pg_err = PostgresError::config("test error");
        let storage_err: StorageError = pg_err.into();
        assert!(matches!(storage_err, StorageError::Internal { .. }));
    }
}
