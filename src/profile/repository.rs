//! `UserData` persistence.

use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, warn};

use super::types::{UserData, USER_DATA_ID};
use crate::error::DaymarkError;
use crate::storage::Database;

/// Storage for the profile singleton.
#[derive(Debug, Clone, Copy)]
pub struct ProfileRepository<'a> {
    db: &'a Database,
}

impl<'a> ProfileRepository<'a> {
    /// Create a repository over an existing database.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// The profile row, or the default profile if the row has gone missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row does not decode.
    pub fn get_user_data(&self) -> Result<UserData, DaymarkError> {
        let row = self.db.with_connection(|conn| {
            conn.query_row(
                "SELECT id, name, numFMTimers, sumDurFMTimers FROM UserData WHERE id = ?1",
                [USER_DATA_ID],
                row_to_user_data,
            )
            .optional()
            .map_err(|e| DaymarkError::from_sqlite("Failed to query user data", e))
        })?;

        Ok(row.unwrap_or_else(|| {
            warn!("user data row missing; using defaults");
            UserData::default()
        }))
    }

    /// Rename the user.
    ///
    /// # Errors
    ///
    /// Returns [`DaymarkError::InvalidInput`] for a blank name, or a database
    /// error if the update fails.
    pub fn change_user_name(&self, name: &str) -> Result<(), DaymarkError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DaymarkError::InvalidInput(
                "User name cannot be empty".to_string(),
            ));
        }

        self.db.with_connection(|conn| {
            conn.execute(
                "UPDATE UserData SET name = ?1 WHERE id = ?2",
                params![name, USER_DATA_ID],
            )
            .map_err(|e| DaymarkError::Database(format!("Failed to change user name: {e}")))?;
            Ok(())
        })
    }

    /// Count one focus session and add its duration, in one statement.
    ///
    /// # Errors
    ///
    /// Returns [`DaymarkError::InvalidInput`] for a negative duration, or a
    /// database error if the update fails.
    pub fn add_fm_timer(&self, duration_ms: i64) -> Result<(), DaymarkError> {
        if duration_ms < 0 {
            return Err(DaymarkError::InvalidInput(format!(
                "Focus duration cannot be negative: {duration_ms}ms"
            )));
        }

        self.db.with_connection(|conn| {
            conn.execute(
                "UPDATE UserData
                 SET numFMTimers = numFMTimers + 1, sumDurFMTimers = sumDurFMTimers + ?1
                 WHERE id = ?2",
                params![duration_ms, USER_DATA_ID],
            )
            .map_err(|e| DaymarkError::Database(format!("Failed to record focus timer: {e}")))?;
            debug!(duration_ms, "focus timer recorded");
            Ok(())
        })
    }
}

fn row_to_user_data(row: &Row<'_>) -> Result<UserData, rusqlite::Error> {
    Ok(UserData {
        id: row.get("id")?,
        name: row.get("name")?,
        num_fm_timers: row.get("numFMTimers")?,
        sum_dur_fm_timers: row.get("sumDurFMTimers")?,
    })
}
