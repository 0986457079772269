//! Storage error types for the counter persistence boundary.

/// Errors that can occur during counter store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Attempted to create a record for a guild that already has one.
    #[error("Counter record already exists for guild {guild_id}")]
    AlreadyExists {
        /// The guild that already has a record.
        guild_id: String,
    },

    /// Failed to reach the storage backend.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Failed to encode or decode a stored record.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the codec error.
        message: String,
    },

    /// An internal storage error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `AlreadyExists` error.
    #[must_use]
    pub fn already_exists(guild_id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            guild_id: guild_id.into(),
        }
    }

    /// Creates a new `Connection` error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a new `Serialization` error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an already exists error.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::already_exists("G1");
        assert_eq!(err.to_string(), "Counter record already exists for guild G1");

        let err = StorageError::connection("refused");
        assert_eq!(err.to_string(), "Connection error: refused");
    }

    #[test]
    fn test_error_predicates() {
        assert!(StorageError::already_exists("G1").is_already_exists());
        assert!(!StorageError::internal("oops").is_already_exists());
    }
}
