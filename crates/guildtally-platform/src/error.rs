//! Error types for the platform client boundary.

/// Errors surfaced by platform calls.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The guild is unknown to the platform or cannot be reached.
    #[error("Guild unavailable: {guild_id}")]
    GuildUnavailable {
        /// The guild that could not be reached.
        guild_id: String,
    },

    /// The platform rejected or failed an API call.
    #[error("Platform API error: {message}")]
    Api {
        /// Description of the API failure.
        message: String,
    },
}

impl PlatformError {
    /// Creates a new `GuildUnavailable` error.
    #[must_use]
    pub fn guild_unavailable(guild_id: impl Into<String>) -> Self {
        Self::GuildUnavailable {
            guild_id: guild_id.into(),
        }
    }

    /// Creates a new `Api` error.
    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a guild unavailable error.
    #[must_use]
    pub fn is_guild_unavailable(&self) -> bool {
        matches!(self, Self::GuildUnavailable { .. })
    }
}
