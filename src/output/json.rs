//! JSON output formatting for daymark.

use serde::Serialize;
use serde_json::json;

use crate::error::DaymarkError;
use crate::tasks::Task;

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `DaymarkError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task], list_name: &str) -> Result<String, DaymarkError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON
///
/// # Errors
///
/// Returns `DaymarkError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, DaymarkError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_format_tasks_json() {
        let task = Task::new("Write", None, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 5).unwrap();
        let out = format_tasks_json(&[task], "Today").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["list"], "Today");
        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["name"], "Write");
        assert_eq!(value["items"][0]["date"], "2024-01-02");
    }
}
