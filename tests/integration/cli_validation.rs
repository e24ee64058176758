use predicates::prelude::*;
use test_support::cmd_bin;

#[test]
fn errors_when_no_users() {
  cmd_bin("qe-activity-report")
    .args(["--host", "jira.example.com", "--since", "2024/01/01", "--until", "2024/01/31"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("No users to report on"));
}

#[test]
fn errors_when_window_incomplete() {
  cmd_bin("qe-activity-report")
    .args(["--users", "alice", "--host", "jira.example.com", "--since", "2024/01/01"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Provide both --since and --until"));
}

#[test]
fn errors_when_window_inverted() {
  cmd_bin("qe-activity-report")
    .args([
      "--users",
      "alice",
      "--host",
      "jira.example.com",
      "--since",
      "2024/02/01",
      "--until",
      "2024/01/01",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("is after end"));
}

#[test]
fn rejects_unknown_format() {
  cmd_bin("qe-activity-report")
    .args(["--format", "xml"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("xml"));
}
