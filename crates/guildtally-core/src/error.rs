use thiserror::Error;

/// Core error types for guildtally domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid enabled-flag string: {0:?}")]
    InvalidFlags(String),

    #[error("Invalid channel kind: {0:?}")]
    InvalidChannelKind(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a new InvalidFlags error
    pub fn invalid_flags(flags: impl Into<String>) -> Self {
        Self::InvalidFlags(flags.into())
    }

    /// Create a new InvalidChannelKind error
    pub fn invalid_channel_kind(kind: impl Into<String>) -> Self {
        Self::InvalidChannelKind(kind.into())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
