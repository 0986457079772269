//! # guildtally-engine
//!
//! The counter synchronization engine.
//!
//! [`CounterManager`] owns per-guild counter configuration, keeps the
//! in-process cache consistent with a pluggable persistence backend, and
//! reconciles both against the live platform whenever configuration changes
//! or members join and leave.
//!
//! ## Overview
//!
//! - [`CounterManager::start`] fills the cache from the store, subscribes to
//!   the platform's membership events, and runs one best-effort reconcile
//!   pass over every guild the platform knows.
//! - The guild commands (`create_counters`, `remove_counters`,
//!   `set_counter_enabled`, `rename_counter`) mutate the cache, write through
//!   to the store, and trigger reconciliation.
//! - [`CounterManager::reconcile`] makes the platform channels of one guild
//!   match its record and the current member counts; passes for the same
//!   guild are serialized so an older in-flight pass can never clobber a
//!   newer one.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use guildtally_db_lmdb::LmdbCounterStore;
//! use guildtally_engine::{CounterConfig, CounterManager};
//!
//! let store = Arc::new(LmdbCounterStore::new("/var/lib/guildtally")?);
//! let manager = CounterManager::new_shared(platform, store, CounterConfig::default());
//! manager.start().await?;
//! ```

mod cache;
mod commands;
pub mod config;
mod error;
mod manager;
mod reconcile;

pub use config::{CounterConfig, CreateCounterOptions, valid_locale, valid_order};
pub use error::SyncError;
pub use manager::CounterManager;
