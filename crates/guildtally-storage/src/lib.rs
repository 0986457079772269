//! # guildtally-storage
//!
//! Persistence abstraction for guildtally counter records.
//!
//! This crate defines the contract every counter store backend implements,
//! plus the partial-update payload the engine hands to backends. The real
//! backends live in separate crates (`guildtally-db-postgres`,
//! `guildtally-db-lmdb`); the in-memory store shipped here exists for tests
//! and examples.
//!
//! ## Overview
//!
//! The main trait is [`CounterStore`], which defines the four operations the
//! engine needs:
//! - `create` a record for a newly registered guild
//! - `update` parts of an existing record
//! - `delete` a record on guild removal
//! - `list_all` records for the startup cache fill
//!
//! Backends treat the absence of a record on `update`/`delete` as a normal
//! outcome, not a fault: the engine cache is the near-term source of truth
//! and the next startup fill reconciles drift.

mod error;
mod memory;
mod traits;
mod types;

pub use error::StorageError;
pub use memory::MemoryCounterStore;
pub use traits::CounterStore;
pub use types::CounterUpdate;

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shared store trait object.
pub type DynCounterStore = std::sync::Arc<dyn CounterStore>;
