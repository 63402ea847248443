//! Metric calculations for the profile.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::DaymarkError;
use crate::profile::{ProfileRepository, UserData};
use crate::storage::Database;
use crate::tasks::{Task, TaskRepository, TaskStatus};

/// Task counts across every stored task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetrics {
    /// Tasks ever created and not deleted
    pub created: usize,
    pub pending: usize,
    pub done: usize,
    pub expired: usize,
    /// Share of created tasks that are done, 0-100
    pub completion_percent: f64,
}

impl TaskMetrics {
    /// Calculate task metrics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate(tasks: &[Task]) -> Self {
        let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();

        let created = tasks.len();
        let done = count(TaskStatus::Done);
        let completion_percent = if created > 0 {
            done as f64 * 100.0 / created as f64
        } else {
            0.0
        };

        Self {
            created,
            pending: count(TaskStatus::Pending),
            done,
            expired: count(TaskStatus::Expired),
            completion_percent,
        }
    }
}

/// Focus-timer totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusMetrics {
    pub sessions: i64,
    pub total_ms: i64,
    /// Mean session length; 0 when no sessions exist
    pub average_ms: i64,
}

impl FocusMetrics {
    /// Calculate focus metrics from the profile row.
    #[must_use]
    pub fn calculate(user: &UserData) -> Self {
        let average_ms = if user.num_fm_timers > 0 {
            user.sum_dur_fm_timers / user.num_fm_timers
        } else {
            0
        };

        Self {
            sessions: user.num_fm_timers,
            total_ms: user.sum_dur_fm_timers,
            average_ms,
        }
    }

    /// Total focus time.
    #[must_use]
    pub fn total(&self) -> Duration {
        Duration::milliseconds(self.total_ms)
    }

    /// Mean session length.
    #[must_use]
    pub fn average(&self) -> Duration {
        Duration::milliseconds(self.average_ms)
    }
}

/// Everything the profile view shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub user: UserData,
    pub tasks: TaskMetrics,
    pub focus: FocusMetrics,
}

impl ProfileStats {
    /// Build stats from already loaded data.
    #[must_use]
    pub fn from_parts(user: UserData, tasks: &[Task]) -> Self {
        Self {
            focus: FocusMetrics::calculate(&user),
            tasks: TaskMetrics::calculate(tasks),
            user,
        }
    }

    /// Load the profile and every task (sweeping expiries first).
    ///
    /// # Errors
    ///
    /// Returns an error if either query fails.
    pub fn collect(db: &Database) -> Result<Self, DaymarkError> {
        let user = ProfileRepository::new(db).get_user_data()?;
        let tasks = TaskRepository::new(db).get_all_tasks()?;
        Ok(Self::from_parts(user, &tasks))
    }
}

/// Render a progress bar for a 0-100 percentage.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
