//! Focus session recording.
//!
//! Finished or interrupted sessions feed the profile aggregates.

use tracing::info;

use super::timer::SessionOutcome;
use crate::error::DaymarkError;
use crate::profile::ProfileRepository;
use crate::storage::Database;

/// Records focus sessions into the profile row.
#[derive(Debug, Clone, Copy)]
pub struct FocusRecorder<'a> {
    profile: ProfileRepository<'a>,
}

impl<'a> FocusRecorder<'a> {
    /// Create a recorder over an existing database.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self {
            profile: ProfileRepository::new(db),
        }
    }

    /// Record the outcome of a reset timer.
    ///
    /// `None` means the timer never started; nothing is stored. Returns
    /// whether a session was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregate update fails.
    pub fn record(&self, outcome: Option<&SessionOutcome>) -> Result<bool, DaymarkError> {
        let Some(outcome) = outcome else {
            return Ok(false);
        };

        self.record_elapsed(outcome.elapsed_ms)?;
        info!(
            elapsed_ms = outcome.elapsed_ms,
            completed = outcome.completed,
            "focus session recorded"
        );
        Ok(true)
    }

    /// Record a session of a known length.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative length or if the update fails.
    pub fn record_elapsed(&self, elapsed_ms: i64) -> Result<(), DaymarkError> {
        self.profile.add_fm_timer(elapsed_ms)
    }
}
