//! Schema management for the counters table.

use sqlx_core::query::query;
use sqlx_postgres::PgPool;
use tracing::debug;

use crate::error::PostgresError;

/// The counters table: one row per guild, columns are exactly the counter
/// record fields. `CHAR(3)` holds the positional enabled-flag string.
const CREATE_COUNTERS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS counters (
    guild_id TEXT NOT NULL PRIMARY KEY,
    enabled CHAR(3) NOT NULL,
    all_channel TEXT DEFAULT NULL,
    bots_channel TEXT DEFAULT NULL,
    humans_channel TEXT DEFAULT NULL,
    category TEXT NOT NULL,
    all_name TEXT NOT NULL,
    bots_name TEXT NOT NULL,
    humans_name TEXT NOT NULL,
    locale TEXT NOT NULL,
    channel_kind TEXT NOT NULL
)"#;

/// Creates the counters table if it does not exist. Idempotent; safe to run
/// on every start.
pub(crate) async fn ensure_schema(pool: &PgPool) -> Result<(), PostgresError> {
    query(CREATE_COUNTERS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| PostgresError::Setup(e.to_string()))?;

    debug!("counters table ensured");
    Ok(())
}
