//! LMDB implementation of the CounterStore trait.

use std::path::Path;

use async_trait::async_trait;
use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};
use tracing::debug;

use guildtally_core::{CounterRecord, GuildId};
use guildtally_storage::{CounterStore, CounterUpdate, StorageError};

use crate::error::LmdbError;

/// Maximum size of the memory-mapped environment. Counter records are tiny;
/// this bounds the file, not resident memory.
const MAP_SIZE_MB: usize = 64;

/// Embedded LMDB storage backend for counter records.
///
/// One unnamed database maps guild ids to JSON documents holding the full
/// [`CounterRecord`]. LMDB gives ACID transactions: reads use read
/// transactions, mutations use write transactions, and `update` is a
/// load/merge/rewrite inside a single write transaction.
pub struct LmdbCounterStore {
    env: Env,
    db: Database<Str, Bytes>,
}

impl LmdbCounterStore {
    /// Opens the backing environment under `path`, creating the directory
    /// and database file if they do not exist yet. Safe to call every start.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the LMDB
    /// environment or database cannot be opened.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(&path)?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(MAP_SIZE_MB * 1024 * 1024)
                .max_dbs(1)
                .open(path.as_ref())
        }
        .map_err(|e| LmdbError::EnvOpen(e.to_string()))?;

        let mut wtxn = env
            .write_txn()
            .map_err(|e| LmdbError::Transaction(e.to_string()))?;
        let db: Database<Str, Bytes> = env
            .create_database(&mut wtxn, None)
            .map_err(|e| LmdbError::DbOpen(e.to_string()))?;
        wtxn.commit()
            .map_err(|e| LmdbError::Transaction(e.to_string()))?;

        Ok(Self { env, db })
    }
}

#[async_trait]
impl CounterStore for LmdbCounterStore {
    async fn create(&self, record: &CounterRecord) -> Result<(), StorageError> {
        let document = serde_json::to_vec(record).map_err(LmdbError::Serialization)?;

        let mut wtxn = self
            .env
            .write_txn()
            .map_err(|e| LmdbError::Transaction(e.to_string()))?;

        let exists = self
            .db
            .get(&wtxn, record.guild_id.as_str())
            .map_err(|e| LmdbError::Transaction(e.to_string()))?
            .is_some();
        if exists {
            return Err(StorageError::already_exists(record.guild_id.as_str()));
        }

        self.db
            .put(&mut wtxn, record.guild_id.as_str(), &document)
            .map_err(|e| LmdbError::Transaction(e.to_string()))?;
        wtxn.commit()
            .map_err(|e| LmdbError::Transaction(e.to_string()))?;

        Ok(())
    }

    async fn update(&self, guild_id: &GuildId, update: &CounterUpdate) -> Result<(), StorageError> {
        let mut wtxn = self
            .env
            .write_txn()
            .map_err(|e| LmdbError::Transaction(e.to_string()))?;

        let Some(bytes) = self
            .db
            .get(&wtxn, guild_id.as_str())
            .map_err(|e| LmdbError::Transaction(e.to_string()))?
        else {
            debug!(guild = %guild_id, "update for absent record, skipping");
            return Ok(());
        };

        let mut record: CounterRecord =
            serde_json::from_slice(bytes).map_err(LmdbError::Serialization)?;
        update.apply(&mut record);
        let document = serde_json::to_vec(&record).map_err(LmdbError::Serialization)?;

        self.db
            .put(&mut wtxn, guild_id.as_str(), &document)
            .map_err(|e| LmdbError::Transaction(e.to_string()))?;
        wtxn.commit()
            .map_err(|e| LmdbError::Transaction(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, guild_id: &GuildId) -> Result<(), StorageError> {
        let mut wtxn = self
            .env
            .write_txn()
            .map_err(|e| LmdbError::Transaction(e.to_string()))?;

        let deleted = self
            .db
            .delete(&mut wtxn, guild_id.as_str())
            .map_err(|e| LmdbError::Transaction(e.to_string()))?;
        wtxn.commit()
            .map_err(|e| LmdbError::Transaction(e.to_string()))?;

        if !deleted {
            debug!(guild = %guild_id, "delete for absent record, skipping");
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<CounterRecord>, StorageError> {
        let rtxn = self
            .env
            .read_txn()
            .map_err(|e| LmdbError::Transaction(e.to_string()))?;

        let mut records = Vec::new();
        let iter = self
            .db
            .iter(&rtxn)
            .map_err(|e| LmdbError::Transaction(e.to_string()))?;
        for entry in iter {
            let (_, bytes) = entry.map_err(|e| LmdbError::Transaction(e.to_string()))?;
            let record = serde_json::from_slice(bytes).map_err(LmdbError::Serialization)?;
            records.push(record);
        }
        Ok(records)
    }

    fn backend_name(&self) -> &'static str {
        "lmdb"
    }
}
