//! Error types for the LMDB storage backend.

use guildtally_storage::StorageError;

/// Errors specific to the LMDB storage backend.
#[derive(Debug, thiserror::Error)]
pub enum LmdbError {
    /// Failed to open or create the LMDB environment.
    #[error("Failed to open LMDB environment: {0}")]
    EnvOpen(String),

    /// Failed to open the database within the environment.
    #[error("Failed to open database: {0}")]
    DbOpen(String),

    /// Transaction error.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Record codec error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LmdbError> for StorageError {
    fn from(err: LmdbError) -> Self {
        match err {
            LmdbError::EnvOpen(e) => StorageError::connection(e),
            LmdbError::DbOpen(e) => StorageError::connection(e),
            LmdbError::Transaction(e) => StorageError::internal(e),
            LmdbError::Serialization(e) => StorageError::serialization(e.to_string()),
            LmdbError::Io(e) => StorageError::connection(e.to_string()),
        }
    }
}

/// Result type alias for LMDB operations.
pub type Result<T> = std::result::Result<T, LmdbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_storage_error() {
        let err = LmdbError::Transaction("MDB_BAD_TXN".to_string());
        let storage_err: StorageError = err.into();
        assert!(matches!(storage_err, StorageError::Internal { .. }));

        let err = LmdbError::EnvOpen("permission denied".to_string());
        let storage_err: StorageError = err.into();
        assert!(matches!(storage_err, StorageError::Connection { .. }));
    }
}
