use test_support::{SEARCH_FIXTURE_ENV, cmd_bin, read_fixture_text, tempdir};

#[test]
fn config_file_supplies_users_host_and_window() {
  let td = tempdir();
  let path = td.path().join("config.json");
  std::fs::write(
    &path,
    r#"{ "users": ["bob"], "host": "jira.example.com", "user": "qe-bot", "start": "2024/01/01", "end": "2024/01/31" }"#,
  )
  .unwrap();

  let out = cmd_bin("qe-activity-report")
    .env(SEARCH_FIXTURE_ENV, read_fixture_text("search_pages.json"))
    .args(["--config", path.to_str().unwrap(), "--format", "json", "--tz", "utc", "-q"])
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  let users = v["users"].as_array().unwrap();
  assert_eq!(users.len(), 1);
  assert_eq!(users[0]["user"], "bob");
  assert_eq!(users[0]["filedProc"], 1);
}

#[test]
fn missing_config_file_is_reported_with_path() {
  let out = cmd_bin("qe-activity-report")
    .args(["--config", "/no/such/qe-config.json"])
    .output()
    .unwrap();
  assert!(!out.status.success());
  assert!(String::from_utf8_lossy(&out.stderr).contains("/no/such/qe-config.json"));
}
