//! Pooled SQLite access.
//!
//! A [`Database`] owns an `r2d2` pool of SQLite connections. It is built
//! once by the caller and handed to each store; stores check a connection
//! out per operation and the guard returns it to the pool on drop.

use std::path::{Path, PathBuf};
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Transaction, TransactionBehavior};

use super::schema::{self, SchemaReport};
use super::{data_dir, Config};
use crate::error::DatabaseError;

/// A connection checked out of the pool.
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the checklist database.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
    path: Option<PathBuf>,
    schema: SchemaReport,
}

impl Database {
    /// Open the database named in `config` inside the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory or the pool cannot be set up.
    /// Schema problems are not errors: they are logged and kept in
    /// [`Database::schema_report`].
    pub fn open(config: &Config) -> Result<Self, DatabaseError> {
        let dir = data_dir().map_err(|e| DatabaseError::OpenFailed {
            path: PathBuf::from(&config.database.file),
            message: e.to_string(),
        })?;
        Self::open_at(dir.join(&config.database.file), config.database.pool_size)
    }

    /// Open (or create) a database file at `path` with a pool of `pool_size`.
    ///
    /// # Errors
    /// Returns an error if the pool cannot establish its connections.
    pub fn open_at(path: impl AsRef<Path>, pool_size: u32) -> Result<Self, DatabaseError> {
        let path = path.as_ref().to_path_buf();
        let manager = SqliteConnectionManager::file(&path).with_init(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })?;
            Ok(())
        });
        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build(manager)
            .map_err(|e| DatabaseError::OpenFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;
        tracing::debug!(path = %path.display(), pool_size, "opened database");
        Ok(Self::with_schema(pool, Some(path)))
    }

    /// Open a private in-memory database.
    ///
    /// The pool holds exactly one connection that is never recycled, so
    /// every checkout sees the same data.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build(SqliteConnectionManager::memory())?;
        Ok(Self::with_schema(pool, None))
    }

    fn with_schema(pool: Pool<SqliteConnectionManager>, path: Option<PathBuf>) -> Self {
        let schema = match pool.get() {
            Ok(conn) => schema::setup(&conn),
            Err(e) => {
                tracing::warn!("schema setup skipped: {e}");
                SchemaReport::failed(e.to_string())
            }
        };
        Self { pool, path, schema }
    }

    /// Path of the database file, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// What schema setup did when this handle was opened.
    pub fn schema_report(&self) -> &SchemaReport {
        &self.schema
    }

    /// Check a connection out of the pool.
    ///
    /// # Errors
    /// Returns [`DatabaseError::Pool`] if no connection becomes available.
    pub fn conn(&self) -> Result<PooledConn, DatabaseError> {
        Ok(self.pool.get()?)
    }

    /// Run `f` inside one immediate transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back
    /// otherwise, so callers never leave a half-applied change behind.
    ///
    /// # Errors
    /// Returns the error from `f`, or from begin/commit.
    pub fn with_transaction<T, F>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, rusqlite::Error>,
    {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}
