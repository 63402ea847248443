//! Task expiry policy.
//!
//! A pending task whose date has passed becomes `expired` the next time a
//! sweep runs. Expiry is one-way. [`ExpiryWatcher`] keeps a session-local
//! watermark so each expiry is reported to the user at most once.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::repository::TaskRepository;
use super::types::Task;
use crate::error::DaymarkError;

/// Expire pending tasks dated before `today`, stamping `completedAt = now`.
pub(crate) fn expire_overdue(
    conn: &Connection,
    today: &str,
    now: i64,
) -> Result<usize, DaymarkError> {
    let rows = conn
        .execute(
            "UPDATE Task SET status = 'expired', completedAt = ?1
             WHERE status = 'pending' AND date < ?2",
            rusqlite::params![now, today],
        )
        .map_err(|e| DaymarkError::Database(format!("Failed to expire tasks: {e}")))?;

    if rows > 0 {
        info!(expired = rows, today, "expired overdue tasks");
    }
    Ok(rows)
}

/// Expire every pending task, whatever its date.
pub(crate) fn expire_all_pending(conn: &Connection, now: i64) -> Result<usize, DaymarkError> {
    let rows = conn
        .execute(
            "UPDATE Task SET status = 'expired', completedAt = ?1 WHERE status = 'pending'",
            [now],
        )
        .map_err(|e| DaymarkError::Database(format!("Failed to force-expire tasks: {e}")))?;

    info!(expired = rows, "force-expired all pending tasks");
    Ok(rows)
}

/// Which sweep a check runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    /// Expire pending tasks dated before today.
    #[default]
    Overdue,
    /// Expire every pending task. A development override.
    ForceAll,
}

/// Reports newly expired tasks once per check cycle.
///
/// The watermark starts at construction time and lives only as long as the
/// watcher; a new session starts a new watermark.
#[derive(Debug)]
pub struct ExpiryWatcher<'a> {
    repo: TaskRepository<'a>,
    mode: SweepMode,
    watermark: i64,
}

impl<'a> ExpiryWatcher<'a> {
    /// Start watching from now.
    #[must_use]
    pub fn new(repo: TaskRepository<'a>, mode: SweepMode) -> Self {
        let watermark = repo.database().clock().now_millis();
        Self::with_watermark(repo, mode, watermark)
    }

    /// Start watching from an explicit instant.
    #[must_use]
    pub const fn with_watermark(repo: TaskRepository<'a>, mode: SweepMode, watermark: i64) -> Self {
        Self {
            repo,
            mode,
            watermark,
        }
    }

    /// Lowest `completedAt` the next check will report.
    #[must_use]
    pub const fn watermark(&self) -> i64 {
        self.watermark
    }

    /// Run the sweep, collect tasks expired since the watermark, and move
    /// the watermark past now.
    ///
    /// # Errors
    ///
    /// Returns an error if the sweep or query fails. The watermark is left
    /// unchanged in that case.
    pub fn check(&mut self) -> Result<Vec<Task>, DaymarkError> {
        let since = self.watermark;

        match self.mode {
            SweepMode::Overdue => self.repo.expire_tasks()?,
            SweepMode::ForceAll => self.repo.force_expire_all_pending_tasks()?,
        };

        let expired = self.repo.get_recently_expired_tasks(since)?;
        self.watermark = self.repo.database().clock().now_millis() + 1;

        debug!(since, reported = expired.len(), next = self.watermark, "expiry check");
        Ok(expired)
    }
}
