//! # guildtally-db-postgres
//!
//! PostgreSQL storage backend for guildtally counter records.
//!
//! Persists one row per guild in the `counters` table, whose columns are
//! exactly the [`guildtally_core::CounterRecord`] fields: the enabled flags
//! in their compact 3-character form, the three channel ids (NULL when never
//! created), the three name templates, the category id, locale, and channel
//! kind. The table is created idempotently at construction, so every start
//! may run the setup.

mod config;
mod error;
mod row;
mod schema;
mod storage;

pub use config::PostgresConfig;
pub use error::{PostgresError, is_unique_violation};
pub use storage::PostgresCounterStore;
