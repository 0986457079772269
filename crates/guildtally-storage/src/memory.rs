//! In-memory counter store.
//!
//! Reference implementation of [`CounterStore`] backed by a `RwLock`'d map.
//! Engine tests use it in place of a real backend; the mutation counter lets
//! them assert that failed commands issued no writes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use guildtally_core::{CounterRecord, GuildId};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::CounterStore;
use crate::types::CounterUpdate;

/// In-memory [`CounterStore`] for tests.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    records: RwLock<HashMap<GuildId, CounterRecord>>,
    mutations: AtomicU64,
}

impl MemoryCounterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of create/update/delete calls issued so far.
    #[must_use]
    pub fn mutation_count(&self) -> u64 {
        self.mutations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn create(&self, record: &CounterRecord) -> Result<(), StorageError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.write().await;
        if records.contains_key(&record.guild_id) {
            return Err(StorageError::already_exists(record.guild_id.as_str()));
        }
        records.insert(record.guild_id.clone(), record.clone());
        Ok(())
    }

    async fn update(&self, guild_id: &GuildId, update: &CounterUpdate) -> Result<(), StorageError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(guild_id) {
            update.apply(record);
        }
        Ok(())
    }

    async fn delete(&self, guild_id: &GuildId) -> Result<(), StorageError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.records.write().await.remove(guild_id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<CounterRecord>, StorageError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
