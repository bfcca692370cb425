//! Database schema migrations.
//!
//! Migrations are versioned and applied automatically when opening the
//! database. The `schema_version` table tracks the current version.

use rusqlite::{Connection, Result as SqliteResult};
use tracing::{info, warn};

/// Apply all pending migrations.
///
/// # Errors
/// Returns an error if a migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Current schema version, 0 for a fresh database.
fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            warn!("failed to read schema_version: {e}");
        }
        0
    })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration v1: baseline schema.
///
/// Draw log, favorites relation and the kv table for state blobs.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS draws (
            id         TEXT PRIMARY KEY NOT NULL,
            created_at INTEGER NOT NULL,
            mode       TEXT NOT NULL,
            card_ids   TEXT NOT NULL,
            pack_ids   TEXT NOT NULL,
            question   TEXT,
            note       TEXT,
            is_daily   INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS favorites (
            id         TEXT PRIMARY KEY NOT NULL,
            draw_id    TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_draws_created_at ON draws(created_at DESC);
        CREATE INDEX IF NOT EXISTS idx_favorites_draw_id ON favorites(draw_id);",
    )?;
    set_schema_version(conn, 1)?;
    info!("applied baseline schema");
    Ok(())
}

/// Migration v2: denormalized card-text column.
///
/// Older records carry no resolvable card ids, so substring search over
/// them needs the card text stored on the row itself.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "ALTER TABLE draws ADD COLUMN card_text TEXT;
         CREATE INDEX IF NOT EXISTS idx_draws_card_text ON draws(card_text);",
    )?;

    tx.execute("DELETE FROM schema_version", [])?;
    tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [2])?;

    tx.commit()?;
    info!("applied card-text migration");
    Ok(())
}
