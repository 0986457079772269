//! # guildtally-db-lmdb
//!
//! Embedded file-backed storage backend for guildtally counter records.
//!
//! Uses the heed crate (Rust bindings for LMDB) as a simple on-disk
//! key→document store: keys are guild ids, values are the JSON-serialized
//! [`guildtally_core::CounterRecord`]. The backing environment directory is
//! created lazily at construction, so a fresh deployment needs no setup step.

mod error;
mod storage;

pub use error::LmdbError;
pub use storage::LmdbCounterStore;
