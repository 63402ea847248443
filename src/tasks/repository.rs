//! Task persistence.
//!
//! Row-level access to the `Task` table. Reads that feed task lists run the
//! expiry sweep first, since status is stored rather than computed.

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};

use super::lifecycle;
use super::types::{Task, TaskStatus};
use crate::core::{format_date, today_in};
use crate::error::DaymarkError;
use crate::storage::Database;

const SELECT_TASK: &str =
    "SELECT id, name, description, date, createdAt, completedAt, status FROM Task";

/// Storage for tasks.
#[derive(Debug, Clone, Copy)]
pub struct TaskRepository<'a> {
    db: &'a Database,
}

impl<'a> TaskRepository<'a> {
    /// Create a repository over an existing database.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// The underlying database.
    #[must_use]
    pub const fn database(&self) -> &'a Database {
        self.db
    }

    /// Insert a fully formed task.
    ///
    /// # Errors
    ///
    /// Returns [`DaymarkError::Database`] on constraint violations such as a
    /// duplicate id.
    pub fn create_task(&self, task: &Task) -> Result<(), DaymarkError> {
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO Task (id, name, description, date, createdAt, completedAt, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    task.id,
                    task.name,
                    task.description,
                    task.date,
                    task.created_at,
                    task.completed_at,
                    task.status,
                ],
            )
            .map_err(|e| DaymarkError::Database(format!("Failed to create task: {e}")))?;

            debug!(id = task.id, date = %task.date, "task created");
            Ok(())
        })
    }

    /// Get a task by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row does not decode.
    pub fn get_task(&self, id: i64) -> Result<Option<Task>, DaymarkError> {
        self.db.with_connection(|conn| {
            conn.query_row(&format!("{SELECT_TASK} WHERE id = ?1"), [id], row_to_task)
                .optional()
                .map_err(|e| DaymarkError::from_sqlite("Failed to query task", e))
        })
    }

    /// Delete a task by id.
    ///
    /// Deleting a missing task is not an error; returns whether a row was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn delete_task(&self, id: i64) -> Result<bool, DaymarkError> {
        self.db.with_connection(|conn| {
            let rows = conn
                .execute("DELETE FROM Task WHERE id = ?1", [id])
                .map_err(|e| DaymarkError::Database(format!("Failed to delete task: {e}")))?;
            debug!(id, removed = rows > 0, "task delete");
            Ok(rows > 0)
        })
    }

    /// Toggle a task between `pending` and `done`.
    ///
    /// Only tasks due today are updatable here; anything older should have
    /// been expired by the sweep and is left alone. The stored status must
    /// allow the move (see [`TaskStatus::can_transition_to`]), so expired
    /// rows and same-status requests are no-ops. Moving to `done` stamps
    /// `completedAt` with the current time; moving back to `pending` clears
    /// it. Both happen in one statement.
    ///
    /// Returns whether the stored row changed.
    ///
    /// # Errors
    ///
    /// Returns [`DaymarkError::InvalidInput`] when asked to set `expired`, or
    /// a database error if the statement fails.
    pub fn update_task_status(
        &self,
        task: &Task,
        status: TaskStatus,
    ) -> Result<bool, DaymarkError> {
        if status == TaskStatus::Expired {
            return Err(DaymarkError::InvalidInput(
                "Tasks expire automatically; status can only be set to pending or done"
                    .to_string(),
            ));
        }

        let clock = self.db.clock();
        let today = clock.today();
        if !task.is_due_on(today) {
            warn!(id = task.id, date = %task.date, "task is not due today; status left unchanged");
            return Ok(false);
        }

        let today = format_date(today);
        let completed_at = status.is_completed().then(|| clock.now_millis());

        self.db.with_connection(|conn| {
            let current: Option<TaskStatus> = conn
                .query_row("SELECT status FROM Task WHERE id = ?1", [task.id], |row| {
                    row.get("status")
                })
                .optional()
                .map_err(|e| DaymarkError::from_sqlite("Failed to read task status", e))?;

            let Some(current) = current else {
                debug!(id = task.id, "task vanished before status update");
                return Ok(false);
            };
            if !current.can_transition_to(status) {
                debug!(id = task.id, from = %current, to = %status, "status transition refused");
                return Ok(false);
            }

            let rows = conn
                .execute(
                    "UPDATE Task SET status = ?1, completedAt = ?2 WHERE id = ?3 AND date = ?4",
                    params![status, completed_at, task.id, today],
                )
                .map_err(|e| DaymarkError::Database(format!("Failed to update task status: {e}")))?;
            debug!(id = task.id, %status, updated = rows > 0, "task status update");
            Ok(rows > 0)
        })
    }

    /// All tasks, newest first, after running the expiry sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if the sweep or query fails.
    pub fn get_all_tasks(&self) -> Result<Vec<Task>, DaymarkError> {
        self.expire_tasks()?;
        self.db.with_connection(|conn| {
            query_tasks(conn, &format!("{SELECT_TASK} ORDER BY createdAt DESC"), [])
        })
    }

    /// Tasks due today, newest first, after running the expiry sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if the sweep or query fails.
    pub fn get_today_tasks(&self) -> Result<Vec<Task>, DaymarkError> {
        self.expire_tasks()?;
        let today = today_in(self.db.clock());
        self.db.with_connection(|conn| {
            query_tasks(
                conn,
                &format!("{SELECT_TASK} WHERE date = ?1 ORDER BY createdAt DESC"),
                [today],
            )
        })
    }

    /// Expired tasks whose `completedAt` is at or after `since`, most recent
    /// expiry first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_recently_expired_tasks(&self, since: i64) -> Result<Vec<Task>, DaymarkError> {
        self.db.with_connection(|conn| {
            query_tasks(
                conn,
                &format!(
                    "{SELECT_TASK} WHERE status = 'expired' AND completedAt >= ?1
                     ORDER BY completedAt DESC"
                ),
                [since],
            )
        })
    }

    /// Expire every pending task dated before today.
    ///
    /// Returns the number of tasks expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn expire_tasks(&self) -> Result<usize, DaymarkError> {
        let clock = self.db.clock();
        let today = today_in(clock);
        let now = clock.now_millis();
        self.db
            .with_connection(|conn| lifecycle::expire_overdue(conn, &today, now))
    }

    /// Expire every pending task regardless of date.
    ///
    /// A maintenance override, separate from the date-driven sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn force_expire_all_pending_tasks(&self) -> Result<usize, DaymarkError> {
        let now = self.db.clock().now_millis();
        self.db
            .with_connection(|conn| lifecycle::expire_all_pending(conn, now))
    }
}

fn query_tasks<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<Task>, DaymarkError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| DaymarkError::Database(format!("Failed to prepare query: {e}")))?;

    let rows = stmt
        .query_map(params, row_to_task)
        .map_err(|e| DaymarkError::Database(format!("Failed to query tasks: {e}")))?;

    let mut tasks = Vec::new();
    for row in rows {
        tasks.push(row.map_err(|e| DaymarkError::from_sqlite("Failed to read task", e))?);
    }

    Ok(tasks)
}

/// Convert a database row to a [`Task`].
///
/// Columns are read by name so a missing column or a mistyped value fails
/// instead of being defaulted.
fn row_to_task(row: &Row<'_>) -> Result<Task, rusqlite::Error> {
    Ok(Task {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        date: row.get("date")?,
        created_at: row.get("createdAt")?,
        completed_at: row.get("completedAt")?,
        status: row.get("status")?,
    })
}
