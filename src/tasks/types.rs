//! Task model.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::core::{format_date, Clock};
use crate::error::DaymarkError;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Done,
    Expired,
}

impl TaskStatus {
    /// The text stored in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
            Self::Expired => "expired",
        }
    }

    /// Statuses that carry a `completedAt` timestamp.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Done | Self::Expired)
    }

    /// Whether a task may move from `self` to `target`.
    ///
    /// `pending` and `done` toggle freely; `pending` may expire; `expired`
    /// never moves again.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Done) | (Self::Done, Self::Pending) | (Self::Pending, Self::Expired)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = DaymarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            "expired" => Ok(Self::Expired),
            other => Err(DaymarkError::Parse(format!("Unknown task status: {other}"))),
        }
    }
}

impl ToSql for TaskStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TaskStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|e: DaymarkError| FromSqlError::Other(Box::new(e)))
    }
}

/// A dated task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Creation timestamp in milliseconds, doubling as the unique id.
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Due day as `YYYY-MM-DD`.
    pub date: String,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    pub status: TaskStatus,
}

impl Task {
    /// Build a pending task due on `date`, created at `created_at` ms.
    ///
    /// The name is trimmed and must not be empty. A blank description is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DaymarkError::InvalidInput`] if the name is blank.
    pub fn new(
        name: &str,
        description: Option<&str>,
        date: NaiveDate,
        created_at: i64,
    ) -> Result<Self, DaymarkError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DaymarkError::InvalidInput(
                "Task name cannot be empty".to_string(),
            ));
        }

        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(ToString::to_string);

        Ok(Self {
            id: created_at,
            name: name.to_string(),
            description,
            date: format_date(date),
            created_at,
            completed_at: None,
            status: TaskStatus::Pending,
        })
    }

    /// Build a pending task due today according to `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`DaymarkError::InvalidInput`] if the name is blank.
    pub fn for_today(
        name: &str,
        description: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<Self, DaymarkError> {
        Self::new(name, description, clock.today(), clock.now_millis())
    }

    /// Whether the task is due on `today`.
    #[must_use]
    pub fn is_due_on(&self, today: NaiveDate) -> bool {
        self.date == format_date(today)
    }

    /// Whether the task can no longer change status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status == TaskStatus::Expired
    }
}
