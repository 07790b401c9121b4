use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

use crate::error::PersistenceError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "library.sqlite";

/// Layout version written to `PRAGMA user_version`. Bump it whenever a table
/// changes shape so older or newer files are detected on load.
pub const SCHEMA_VERSION: i64 = 1;

/// Create the tables for a fresh snapshot and stamp the schema version.
/// Every table carries a `position` key so rows come back in insertion order.
pub(crate) fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            position INTEGER PRIMARY KEY,
            id INTEGER NOT NULL UNIQUE,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            issued INTEGER NOT NULL
        )",
        [],
    )
    .context("failed to create books table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS members (
            position INTEGER PRIMARY KEY,
            id INTEGER NOT NULL UNIQUE,
            name TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create members table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS loans (
            position INTEGER PRIMARY KEY,
            book_id INTEGER NOT NULL UNIQUE,
            member_id INTEGER NOT NULL,
            issue_date TEXT NOT NULL,
            due_date TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create loans table")?;

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)
        .context("failed to record schema version")?;

    Ok(())
}

/// Read the layout version stamped into the file. Zero means the file was
/// never written by this program.
pub(crate) fn schema_version(conn: &Connection) -> Result<i64> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read schema version")
}

/// Resolve the absolute path to the data file inside the user's home.
pub fn default_db_path() -> Result<PathBuf, PersistenceError> {
    let base_dirs = BaseDirs::new().ok_or(PersistenceError::NoHomeDirectory)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
