//! Profile model.

use serde::{Deserialize, Serialize};

/// Fixed primary key of the `UserData` singleton.
pub const USER_DATA_ID: i64 = 0;

/// Display name until the user picks one.
pub const DEFAULT_USER_NAME: &str = "User";

/// Profile name plus focus-timer aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub id: i64,
    pub name: String,
    /// Number of recorded focus sessions.
    #[serde(rename = "numFMTimers")]
    pub num_fm_timers: i64,
    /// Total recorded focus time in milliseconds.
    #[serde(rename = "sumDurFMTimers")]
    pub sum_dur_fm_timers: i64,
}

impl UserData {
    /// Whether the user still has the placeholder name.
    #[must_use]
    pub fn has_default_name(&self) -> bool {
        self.name.is_empty() || self.name == DEFAULT_USER_NAME
    }
}

impl Default for UserData {
    fn default() -> Self {
        Self {
            id: USER_DATA_ID,
            name: DEFAULT_USER_NAME.to_string(),
            num_fm_timers: 0,
            sum_dur_fm_timers: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_data() {
        let data = UserData::default();
        assert_eq!(data.id, 0);
        assert_eq!(data.name, "User");
        assert_eq!(data.num_fm_timers, 0);
        assert_eq!(data.sum_dur_fm_timers, 0);
        assert!(data.has_default_name());
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(UserData::default()).unwrap();
        assert_eq!(json["numFMTimers"], 0);
        assert_eq!(json["sumDurFMTimers"], 0);
        assert_eq!(json["name"], "User");
    }
}
