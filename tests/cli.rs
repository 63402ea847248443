use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn daymark(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("daymark").unwrap();
    cmd.env("DAYMARK_HOME", home.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn json(home: &TempDir, args: &[&str]) -> Value {
    let output = daymark(home)
        .args(args)
        .args(["--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{args:?} failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help() {
    Command::cargo_bin("daymark")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("focus"));
}

#[test]
fn test_first_run_creates_database_and_default_profile() {
    let home = TempDir::new().unwrap();

    let profile = json(&home, &["profile"]);
    assert_eq!(profile["user"]["name"], "User");
    assert_eq!(profile["user"]["numFMTimers"], 0);
    assert_eq!(profile["user"]["sumDurFMTimers"], 0);
    assert!(home.path().join("daymark.db").exists());
}

#[test]
fn test_add_then_today() {
    let home = TempDir::new().unwrap();

    let added = json(&home, &["add", "Buy milk", "-d", "2 liters"]);
    assert_eq!(added["status"], "pending");
    assert_eq!(added["description"], "2 liters");

    let today = json(&home, &["today"]);
    assert_eq!(today["count"], 1);
    assert_eq!(today["items"][0]["name"], "Buy milk");
}

#[test]
fn test_done_and_undo() {
    let home = TempDir::new().unwrap();
    let added = json(&home, &["add", "Write report"]);
    let id = added["id"].to_string();

    let done = json(&home, &["done", &id]);
    assert_eq!(done["status"], "done");
    assert!(done["completedAt"].is_i64());

    let undone = json(&home, &["undo", &id]);
    assert_eq!(undone["status"], "pending");
    assert!(undone["completedAt"].is_null());
}

#[test]
fn test_past_task_expires_on_read() {
    let home = TempDir::new().unwrap();
    json(&home, &["add", "Old chore", "--date", "yesterday"]);

    let all = json(&home, &["list"]);
    assert_eq!(all["count"], 1);
    assert_eq!(all["items"][0]["status"], "expired");

    let today = json(&home, &["today"]);
    assert_eq!(today["count"], 0);
}

#[test]
fn test_done_twice_leaves_task_unchanged() {
    let home = TempDir::new().unwrap();
    let added = json(&home, &["add", "Stretch"]);
    let id = added["id"].to_string();

    json(&home, &["done", &id]);
    let again = json(&home, &["done", &id]);
    assert_eq!(again["updated"], false);
    assert_eq!(again["task"]["status"], "done");

    daymark(&home)
        .args(["done", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("already done"));
}

#[test]
fn test_check_reports_overdue_task() {
    let home = TempDir::new().unwrap();
    json(&home, &["add", "Old chore", "--date", "yesterday"]);
    json(&home, &["add", "Fresh chore"]);

    let check = json(&home, &["check"]);
    assert_eq!(check["count"], 1);
    assert_eq!(check["items"][0]["name"], "Old chore");
    assert_eq!(check["items"][0]["status"], "expired");

    let again = json(&home, &["check"]);
    assert_eq!(again["count"], 0);
}

#[test]
fn test_check_pretty_output() {
    let home = TempDir::new().unwrap();
    json(&home, &["add", "Old chore", "--date", "yesterday"]);

    daymark(&home)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 task expired"))
        .stdout(predicate::str::contains("Old chore"));
}

#[test]
fn test_expire_sweeps_only_overdue() {
    let home = TempDir::new().unwrap();
    json(&home, &["add", "Old chore", "--date", "in -2 days"]);
    json(&home, &["add", "Today chore"]);
    json(&home, &["add", "Later chore", "--date", "tomorrow"]);

    let result = json(&home, &["expire"]);
    assert_eq!(result["expired"], 1);
    assert_eq!(result["all"], false);

    let today = json(&home, &["today"]);
    assert_eq!(today["items"][0]["status"], "pending");
}

#[test]
fn test_future_task_cannot_be_completed_yet() {
    let home = TempDir::new().unwrap();
    let added = json(&home, &["add", "Dentist", "--date", "tomorrow"]);
    let id = added["id"].to_string();

    let result = json(&home, &["done", &id]);
    assert_eq!(result["updated"], false);
    assert_eq!(result["task"]["status"], "pending");
}

#[test]
fn test_expire_all() {
    let home = TempDir::new().unwrap();
    json(&home, &["add", "One"]);
    json(&home, &["add", "Two", "--date", "tomorrow"]);

    let result = json(&home, &["expire", "--all"]);
    assert_eq!(result["expired"], 2);

    let check = json(&home, &["check"]);
    assert_eq!(check["count"], 0);
}

#[test]
fn test_focus_log_updates_profile() {
    let home = TempDir::new().unwrap();
    json(&home, &["focus", "log", "25m"]);
    json(&home, &["focus", "log", "5m"]);

    let profile = json(&home, &["profile"]);
    assert_eq!(profile["user"]["numFMTimers"], 2);
    assert_eq!(profile["user"]["sumDurFMTimers"], 30 * 60_000);
}

#[test]
fn test_rename() {
    let home = TempDir::new().unwrap();
    json(&home, &["rename", "  Ada  "]);

    let profile = json(&home, &["profile"]);
    assert_eq!(profile["user"]["name"], "Ada");
}

#[test]
fn test_delete_missing_task_is_not_an_error() {
    let home = TempDir::new().unwrap();
    let result = json(&home, &["delete", "42"]);
    assert_eq!(result["deleted"], false);
}

#[test]
fn test_done_missing_task_fails() {
    let home = TempDir::new().unwrap();
    daymark(&home)
        .args(["done", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_invalid_input_fails() {
    let home = TempDir::new().unwrap();

    daymark(&home)
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));

    daymark(&home)
        .args(["add", "Trip", "--date", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized date"));

    daymark(&home)
        .args(["focus", "log", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn test_out_of_range_input_is_an_error_not_a_crash() {
    let home = TempDir::new().unwrap();

    daymark(&home)
        .args(["focus", "log", "999999999999999"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid duration"));

    daymark(&home)
        .args(["focus", "start", "9999999999999999s"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid duration"));

    daymark(&home)
        .args(["add", "Far away", "--date", "in 999999999999 days"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unrecognized date"));
}

#[test]
fn test_pretty_output() {
    let home = TempDir::new().unwrap();
    daymark(&home)
        .args(["add", "Buy milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Buy milk"));

    daymark(&home)
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] Buy milk"));
}
