//! `SQLite` database handle and initialization latch.
//!
//! The database is stored at `~/.daymark/daymark.db` and contains:
//! - `Task`: dated tasks with their lifecycle status
//! - `UserData`: the single profile row
//!
//! A [`Database`] is cheap to construct. The file is opened, migrated and
//! seeded on first use through a one-shot latch; overlapping first calls all
//! wait on the same attempt and then share the resulting connection.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::config::Paths;
use crate::core::{Clock, SystemClock};
use crate::error::DaymarkError;

use super::migrations;

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A file on disk.
    File(PathBuf),
    /// A private in-memory database (useful for testing).
    Memory,
}

/// Database connection wrapper.
pub struct Database {
    location: Location,
    clock: Arc<dyn Clock>,
    conn: OnceCell<Mutex<Connection>>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("location", &self.location)
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Describe a database without touching the disk.
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self {
            location,
            clock: Arc::new(SystemClock),
            conn: OnceCell::new(),
        }
    }

    /// Replace the clock used for "today" and timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Open the database at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the database
    /// cannot be opened, or migrations fail.
    pub fn open(paths: &Paths) -> Result<Self, DaymarkError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, DaymarkError> {
        let db = Self::new(Location::File(path.to_path_buf()));
        db.initialize()?;
        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, DaymarkError> {
        let db = Self::new(Location::Memory);
        db.initialize()?;
        Ok(db)
    }

    /// Open, migrate and seed the database if that has not happened yet.
    ///
    /// Safe to call any number of times from any number of threads. Exactly
    /// one attempt runs at a time; a failed attempt can be retried.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, migrated, verified
    /// or seeded.
    pub fn initialize(&self) -> Result<(), DaymarkError> {
        self.handle().map(|_| ())
    }

    /// Whether [`Database::initialize`] has completed successfully.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.conn.get().is_some()
    }

    fn handle(&self) -> Result<&Mutex<Connection>, DaymarkError> {
        self.conn.get_or_try_init(|| self.connect().map(Mutex::new))
    }

    fn connect(&self) -> Result<Connection, DaymarkError> {
        let conn = match &self.location {
            Location::File(path) => Connection::open(path).map_err(|e| {
                DaymarkError::Database(format!("Failed to open database {}: {e}", path.display()))
            })?,
            Location::Memory => Connection::open_in_memory().map_err(|e| {
                DaymarkError::Database(format!("Failed to open in-memory database: {e}"))
            })?,
        };

        migrations::run(&conn)?;
        migrations::verify_schema(&conn)?;
        migrations::seed_user_data(&conn)?;

        info!(location = ?self.location, "database initialized");
        Ok(conn)
    }

    /// Run `f` against the shared connection, initializing first if needed.
    ///
    /// # Errors
    ///
    /// Returns initialization errors, a poisoned-lock error, or whatever `f`
    /// returns.
    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, DaymarkError>,
    ) -> Result<T, DaymarkError> {
        let guard = self
            .handle()?
            .lock()
            .map_err(|_| DaymarkError::Database("Database connection lock poisoned".to_string()))?;
        f(&guard)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, DaymarkError> {
        self.with_connection(migrations::get_version)
    }

    /// The clock every storage operation reads.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Execute a statement that returns no rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn execute(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<usize, DaymarkError> {
        self.with_connection(|conn| {
            debug!(sql, "execute");
            conn.execute(sql, params)
                .map_err(|e| DaymarkError::Database(format!("Query failed: {e}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.is_initialized());
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_new_is_lazy() {
        let db = Database::new(Location::Memory);
        assert!(!db.is_initialized());

        // Any operation initializes through the latch.
        assert!(db.schema_version().unwrap() > 0);
        assert!(db.is_initialized());
    }

    #[test]
    fn test_open_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open_at(&db_path).unwrap();
        assert!(db.schema_version().unwrap() > 0);
        assert!(db_path.exists());
    }

    #[test]
    fn test_open_with_paths_creates_root() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        let db = Database::open(&paths).unwrap();
        assert!(db.is_initialized());
        assert!(paths.database.exists());
    }

    #[test]
    fn test_reopen_database() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.execute("UPDATE UserData SET name = 'Ada' WHERE id = 0", &[])
                .unwrap();
        }

        {
            let db = Database::open_at(&db_path).unwrap();
            let name: String = db
                .with_connection(|conn| {
                    conn.query_row("SELECT name FROM UserData WHERE id = 0", [], |row| {
                        row.get(0)
                    })
                    .map_err(|e| DaymarkError::Database(e.to_string()))
                })
                .unwrap();
            assert_eq!(name, "Ada");
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let db = Database::new(Location::Memory);
        db.initialize().unwrap();
        let first = std::ptr::from_ref(db.handle().unwrap());

        db.initialize().unwrap();
        let second = std::ptr::from_ref(db.handle().unwrap());

        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_initialize_shares_one_handle() {
        let db = Database::new(Location::Memory);

        let handles: Vec<usize> = std::thread::scope(|s| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        db.initialize().unwrap();
                        std::ptr::from_ref(db.handle().unwrap()) as usize
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        assert!(handles.windows(2).all(|w| w[0] == w[1]));

        // In-memory databases are private per connection, so a single
        // UserData row proves only one schema creation happened.
        let rows: i64 = db
            .with_connection(|conn| {
                conn.query_row("SELECT COUNT(*) FROM UserData", [], |row| row.get(0))
                    .map_err(|e| DaymarkError::Database(e.to_string()))
            })
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_failed_initialize_can_retry() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("missing").join("test.db");
        let db = Database::new(Location::File(db_path.clone()));

        assert!(db.initialize().is_err());
        assert!(!db.is_initialized());

        std::fs::create_dir_all(db_path.parent().unwrap()).unwrap();
        db.initialize().unwrap();
        assert!(db.is_initialized());
    }

    #[test]
    fn test_schema_drift_fails_initialize() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("drift.db");
        {
            let conn = Connection::open(&db_path).unwrap();
            conn.execute_batch(
                "PRAGMA user_version = 1;
                 CREATE TABLE Task (id INTEGER PRIMARY KEY, name TEXT);
                 CREATE TABLE UserData (id INTEGER PRIMARY KEY, name TEXT, numFMTimers INTEGER, sumDurFMTimers INTEGER);",
            )
            .unwrap();
        }

        let err = Database::open_at(&db_path).unwrap_err();
        assert!(matches!(err, DaymarkError::Schema(_)));
    }
}
