//! Database migrations for daymark.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is initialized, after
//! which the column layout is verified and the `UserData` singleton seeded.

use rusqlite::Connection;
use tracing::info;

use crate::error::DaymarkError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Columns every `Task` table must carry.
pub const TASK_COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "date",
    "createdAt",
    "completedAt",
    "status",
];

/// Columns every `UserData` table must carry.
pub const USER_DATA_COLUMNS: &[&str] = &["id", "name", "numFMTimers", "sumDurFMTimers"];

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, DaymarkError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| DaymarkError::Database(format!("Failed to get schema version: {e}")))
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), DaymarkError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| DaymarkError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), DaymarkError> {
    let current = get_version(conn)?;

    if current > CURRENT_VERSION {
        return Err(DaymarkError::Schema(format!(
            "Database schema version {current} is newer than supported version {CURRENT_VERSION}"
        )));
    }

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
        info!(version, "applied schema migration");
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), DaymarkError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(DaymarkError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Creates tables for:
/// - `Task`: dated tasks and their lifecycle status
/// - `UserData`: the single profile row with focus-timer aggregates
fn migrate_v1(conn: &Connection) -> Result<(), DaymarkError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS Task (
            id INTEGER PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            date TEXT NOT NULL,
            createdAt INTEGER NOT NULL,
            completedAt INTEGER,
            status TEXT NOT NULL DEFAULT 'pending'
        );

        CREATE INDEX IF NOT EXISTS idx_task_status_date
        ON Task(status, date);

        CREATE INDEX IF NOT EXISTS idx_task_created
        ON Task(createdAt);

        CREATE TABLE IF NOT EXISTS UserData (
            id INTEGER PRIMARY KEY NOT NULL,
            name TEXT NOT NULL DEFAULT 'User',
            numFMTimers INTEGER NOT NULL DEFAULT 0,
            sumDurFMTimers INTEGER NOT NULL DEFAULT 0
        );
        ",
    )
    .map_err(|e| DaymarkError::Database(format!("Migration v1 failed: {e}")))
}

/// Insert the `UserData` singleton if it is missing.
pub fn seed_user_data(conn: &Connection) -> Result<(), DaymarkError> {
    conn.execute(
        "INSERT OR IGNORE INTO UserData (id, name, numFMTimers, sumDurFMTimers)
         VALUES (0, 'User', 0, 0)",
        [],
    )
    .map_err(|e| DaymarkError::Database(format!("Failed to seed user data: {e}")))?;
    Ok(())
}

/// Check that both tables carry every column the row mappers read.
pub fn verify_schema(conn: &Connection) -> Result<(), DaymarkError> {
    verify_table(conn, "Task", TASK_COLUMNS)?;
    verify_table(conn, "UserData", USER_DATA_COLUMNS)
}

fn verify_table(conn: &Connection, table: &str, expected: &[&str]) -> Result<(), DaymarkError> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .map_err(|e| DaymarkError::Database(format!("Failed to inspect {table}: {e}")))?;

    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))
        .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
        .map_err(|e| DaymarkError::Database(format!("Failed to inspect {table}: {e}")))?;

    if columns.is_empty() {
        return Err(DaymarkError::Schema(format!("Table {table} is missing")));
    }

    let missing: Vec<&str> = expected
        .iter()
        .copied()
        .filter(|col| !columns.iter().any(|c| c == col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DaymarkError::Schema(format!(
            "Table {table} is missing columns: {}",
            missing.join(", ")
        )))
    }
}
