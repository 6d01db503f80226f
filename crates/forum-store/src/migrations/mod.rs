//! Database migration runner.
//!
//! Migrations are executed in order on every [`Database::open_at`] call.
//! Each migration is guarded by a `user_version` pragma so it runs exactly
//! once.
//!
//! [`Database::open_at`]: crate::Database::open_at

pub mod v001_initial;

use rusqlite::Connection;

use crate::error::{Result, StoreError};

type Migration = fn(&Connection) -> rusqlite::Result<()>;

/// Schema steps in order. Entry `i` moves the schema to version `i + 1`.
const MIGRATIONS: &[(&str, Migration)] = &[("v001_initial", v001_initial::up)];

/// Schema version once every migration has run.
const CURRENT_VERSION: u32 = MIGRATIONS.len() as u32;

/// Run all pending migrations against the open connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for (version, (name, up)) in (1u32..).zip(MIGRATIONS).skip(current as usize) {
        tracing::info!(migration = name, version, "Migrating forum database");
        up(conn).map_err(|e| StoreError::Migration(format!("{name}: {e}")))?;
        conn.pragma_update(None, "user_version", version)?;
    }

    let keys: u32 = conn.query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?;
    tracing::debug!(from = current, to = CURRENT_VERSION, keys, "Forum database up to date");
    Ok(())
}
