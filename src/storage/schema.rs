//! Schema materialization for the SQLite store.
//!
//! The schema is created in one step when the store is new. There is no
//! versioning: an existing store is used as-is.

use super::StorageError;
use log::debug;
use rusqlite::Connection;

const SCHEMA_TABLES: &[&str] = &["categories", "todos"];

const INIT_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    is_completed BOOLEAN NOT NULL DEFAULT 0,
    FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS ix_todos_category_id ON todos (category_id);
"#;

/// Creates the schema unless every table already exists.
///
/// Returns `true` when tables were created.
pub(crate) fn ensure_created(conn: &Connection) -> Result<bool, StorageError> {
    let existing = table_names(conn)?;
    if SCHEMA_TABLES
        .iter()
        .all(|table| existing.iter().any(|name| name == table))
    {
        debug!("event=ensure_created status=exists");
        return Ok(false);
    }

    conn.execute_batch(INIT_SCHEMA)?;
    debug!("event=ensure_created status=created tables={}", SCHEMA_TABLES.join(","));
    Ok(true)
}

/// Lists user tables in the store, sorted by name.
pub fn table_names(conn: &Connection) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}
