//! SQLite storage for the race and sport event catalogs.
//!
//! Each catalog lives in its own database file. Schema creation and seeding
//! are explicit startup steps and are safe to repeat.

pub mod schema;
pub mod seed;

use anyhow::{bail, Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{CatalogError, CatalogResult};

pub use schema::{create_races_table, create_sport_events_table};
pub use seed::{seed_events, seed_races};

/// Shared handle to a single SQLite connection.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open (or create) a database file.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create database directory")?;
            }
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database {}", db_path.display()))?;

        Ok(Self::from_connection(conn))
    }

    /// Open an existing database file read-only.
    ///
    /// Never creates the file or its schema.
    pub fn open_read_only(db_path: &Path) -> Result<Self> {
        if !db_path.is_file() {
            bail!("Database not found: {}", db_path.display());
        }

        let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("Failed to open database {}", db_path.display()))?;

        Ok(Self::from_connection(conn))
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_conn<T, F>(&self, f: F) -> CatalogResult<T>
    where
        F: FnOnce(&Connection) -> CatalogResult<T>,
    {
        let conn = self.conn.lock().map_err(|_| CatalogError::LockPoisoned)?;
        f(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("racing.db");

        let store = Store::open(&path).unwrap();
        store
            .with_conn(|conn| Ok(create_races_table(conn)?))
            .unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_with_conn_propagates_errors() {
        let store = Store::in_memory().unwrap();
        let result: CatalogResult<i64> = store.with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM missing_table", [], |row| row.get(0))?)
        });
        assert!(matches!(result, Err(CatalogError::Store(_))));
    }

    #[test]
    fn test_open_read_only_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("typo.db");

        assert!(Store::open_read_only(&path).is_err());
        assert!(!path.exists());
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn test_open_read_only_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("racing.db");
        Store::open(&path)
            .unwrap()
            .with_conn(|conn| Ok(create_races_table(conn)?))
            .unwrap();

        let store = Store::open_read_only(&path).unwrap();
        let result = store.with_conn(|conn| {
            Ok(conn.execute(
                "INSERT INTO races (id, meeting_id, name, number, visible, advertised_start_time) VALUES (1, 1, 'x', 1, 1, '2024-01-01T00:00:00Z')",
                [],
            )?)
        });
        assert!(matches!(result, Err(CatalogError::Store(_))));
    }
}
