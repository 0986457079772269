//! The persistence contract all counter store backends implement.

use async_trait::async_trait;
use guildtally_core::{CounterRecord, GuildId};

use crate::error::StorageError;
use crate::types::CounterUpdate;

/// Contract for counter-record persistence backends.
///
/// Backends are selected at construction and used behind
/// `Arc<dyn CounterStore>`. Implementations must be thread-safe
/// (`Send + Sync`).
///
/// Absence of a record on `update`/`delete` is a normal outcome, not an
/// error: after a cache mutation the engine writes through on a best-effort
/// basis, and the startup fill reconciles any drift.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Persists a new counter record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if the guild already has a
    /// record, or an infrastructure error.
    async fn create(&self, record: &CounterRecord) -> Result<(), StorageError>;

    /// Applies a partial update to an existing record.
    ///
    /// Updating an absent record is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure or codec issues.
    async fn update(&self, guild_id: &GuildId, update: &CounterUpdate) -> Result<(), StorageError>;

    /// Deletes the record for a guild.
    ///
    /// Deleting an absent record is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn delete(&self, guild_id: &GuildId) -> Result<(), StorageError>;

    /// Returns every stored record.
    ///
    /// Used once, for the startup cache fill.
    ///
    /// # Errors
    ///
    /// Returns an error for infrastructure or codec issues.
    async fn list_all(&self) -> Result<Vec<CounterRecord>, StorageError>;

    /// Returns the name of this backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test that CounterStore is object-safe
    fn _assert_store_object_safe(_: &dyn CounterStore) {}
}
