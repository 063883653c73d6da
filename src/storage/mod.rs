//! SQLite persistence context and typed tables.
//!
//! [`DataContext`] owns the connection; [`Table`] gives per-entity access to
//! one table. Entities describe their own table layout through [`Entity`].

use rusqlite::types::Value;
use rusqlite::Row;
use thiserror::Error;

mod context;
mod schema;
mod table;
#[cfg(test)]
pub(crate) mod test_utils;

pub use context::DataContext;
pub use schema::table_names;
pub use table::Table;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Unknown column `{column}` on table `{table}`")]
    InvalidColumn {
        table: &'static str,
        column: String,
    },
}

/// A record type persisted in its own table with an integer primary key.
///
/// Rows are always selected as `id` followed by [`Entity::COLUMNS`], and
/// [`Entity::values`] must yield one value per column in the same order.
pub trait Entity: Sized {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
    fn values(&self) -> Vec<Value>;

    /// Resolves relationships that are not stored in the entity's own row.
    fn load_references(&mut self, _context: &DataContext) -> Result<(), StorageError> {
        Ok(())
    }
}
