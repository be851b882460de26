//! SQLite schema for the feature store.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{FlagError, Result};

/// The current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// SQL statement to create the features table.
pub const CREATE_FEATURES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS features (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    enabled INTEGER NOT NULL DEFAULT 0,
    description TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_FEATURES_TABLE, CREATE_METADATA_TABLE];

/// Creates missing tables and records the schema version.
///
/// Fails if the database was written by a newer schema than this build knows.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    let version = schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(FlagError::Internal(format!(
            "database schema version {} is newer than supported version {}",
            version, CURRENT_VERSION
        )));
    }
    if version < CURRENT_VERSION {
        conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            (VERSION_KEY, CURRENT_VERSION.to_string()),
        )?;
    }

    Ok(())
}

/// Reads the stored schema version; 0 for a fresh database.
pub fn schema_version(conn: &Connection) -> Result<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        Some(value) => value
            .parse()
            .map_err(|_| FlagError::Internal(format!("invalid schema version: {}", value))),
        None => Ok(0),
    }
}
