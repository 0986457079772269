//! Error types surfaced by counter commands and reconciliation.

use guildtally_platform::PlatformError;
use guildtally_storage::StorageError;

/// Errors surfaced by [`crate::CounterManager`] operations.
///
/// Best-effort store writes after a cache mutation are logged, not surfaced;
/// `Storage` only appears where a backend failure prevents an operation from
/// starting (the startup cache fill).
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The guild has no counter record.
    #[error("Guild not registered: {guild_id}")]
    NotRegistered {
        /// The guild without a record.
        guild_id: String,
    },

    /// The guild already has a counter record.
    #[error("Guild already registered: {guild_id}")]
    AlreadyRegistered {
        /// The guild that is already set up.
        guild_id: String,
    },

    /// A platform call failed. Channels created before the failure remain
    /// and self-heal on the next reconcile pass.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// A persistence failure outside the best-effort write path.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SyncError {
    /// Creates a new `NotRegistered` error.
    #[must_use]
    pub fn not_registered(guild_id: impl Into<String>) -> Self {
        Self::NotRegistered {
            guild_id: guild_id.into(),
        }
    }

    /// Creates a new `AlreadyRegistered` error.
    #[must_use]
    pub fn already_registered(guild_id: impl Into<String>) -> Self {
        Self::AlreadyRegistered {
            guild_id: guild_id.into(),
        }
    }

    /// Returns `true` if this is a not registered error.
    #[must_use]
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Self::NotRegistered { .. })
    }

    /// Returns `true` if this is an already registered error.
    #[must_use]
    pub fn is_already_registered(&self) -> bool {
        matches!(self, Self::AlreadyRegistered { .. })
    }
}
