use super::schema;
use super::{Entity, StorageError, Table};
use crate::config::StoreLocation;
use log::{debug, trace};
use rusqlite::{Connection, Params};
use std::cell::Cell;
use std::path::Path;

/// Owns the session with the backing store.
///
/// Writes made through [`Table`] are held in an open transaction until
/// [`DataContext::save_changes`] commits them. Dropping the context with
/// uncommitted writes rolls them back.
pub struct DataContext {
    conn: Connection,
    pending: Cell<usize>,
}

impl DataContext {
    /// Opens (or creates) a file database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        debug!("event=db_open mode=file path={}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        debug!("event=db_open mode=memory");
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_location(location: &StoreLocation) -> Result<Self, StorageError> {
        match location {
            StoreLocation::File(path) => Self::open(path),
            StoreLocation::InMemory => Self::open_in_memory(),
        }
    }

    /// Wraps a connection configured by the caller.
    ///
    /// Foreign key enforcement is switched on regardless of how the
    /// connection was opened.
    pub fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn,
            pending: Cell::new(0),
        })
    }

    /// Creates the schema if the store is new. Returns `true` if it did.
    pub fn ensure_created(&self) -> Result<bool, StorageError> {
        schema::ensure_created(&self.conn)
    }

    pub fn set<E: Entity>(&self) -> Table<'_, E> {
        Table::new(self)
    }

    /// Commits pending writes and returns how many rows they touched.
    pub fn save_changes(&self) -> Result<usize, StorageError> {
        if self.conn.is_autocommit() {
            return Ok(0);
        }

        self.conn.execute_batch("COMMIT")?;
        let written = self.pending.replace(0);
        debug!("event=save_changes status=ok rows={written}");
        Ok(written)
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.conn.is_autocommit()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Runs one write statement inside the context's transaction.
    ///
    /// The transaction is opened by the first write after a commit. If that
    /// first write fails or touches no rows, the transaction is rolled back
    /// at once so the store is not left locked with nothing to commit.
    pub(crate) fn execute_write<P: Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<usize, StorageError> {
        let began = self.conn.is_autocommit();
        if began {
            trace!("event=begin_transaction");
            self.conn.execute_batch("BEGIN DEFERRED")?;
        }

        match self.conn.execute(sql, params) {
            Ok(changed) => {
                if began && changed == 0 {
                    self.rollback("no_rows_written");
                }
                self.pending.set(self.pending.get() + changed);
                Ok(changed)
            }
            Err(err) => {
                if began {
                    self.rollback("first_write_failed");
                }
                Err(err.into())
            }
        }
    }

    fn rollback(&self, reason: &str) {
        if self.conn.is_autocommit() {
            return;
        }
        let discarded = self.pending.replace(0);
        debug!("event=rollback reason={reason} rows={discarded}");
        if let Err(err) = self.conn.execute_batch("ROLLBACK") {
            debug!("event=rollback status=failed error={err}");
        }
    }
}

impl Drop for DataContext {
    fn drop(&mut self) {
        self.rollback("dropped_uncommitted");
    }
}
