use test_support::{SEARCH_FIXTURE_ENV, cmd_bin};

fn run_with_pages(pages: &str) -> std::process::Output {
  cmd_bin("qe-activity-report")
    .env(SEARCH_FIXTURE_ENV, pages)
    .args([
      "--users",
      "alice",
      "--host",
      "jira.example.com",
      "--since",
      "2024/01/01",
      "--until",
      "2024/01/31",
      "--format",
      "json",
    ])
    .output()
    .unwrap()
}

#[test]
fn malformed_issue_aborts_without_output() {
  let out = run_with_pages(r#"{ "membersOf": { "issues": [{ "key": "QE-1", "fields": {} }] } }"#);
  assert!(!out.status.success());
  assert!(out.stdout.is_empty());
  let err = String::from_utf8_lossy(&out.stderr);
  assert!(err.contains("filed pass"));
  assert!(err.contains("QE-1"));
}

#[test]
fn error_page_is_a_transport_fault() {
  let out = run_with_pages(r#"{ "CHANGED TO Closed": { "errorMessages": ["bad jql"] } }"#);
  assert!(!out.status.success());
  assert!(out.stdout.is_empty());
  let err = String::from_utf8_lossy(&out.stderr);
  assert!(err.contains("closed pass"));
  assert!(err.contains("search request failed"));
}

#[test]
fn unreachable_host_fails_cleanly() {
  let port = {
    let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    l.local_addr().unwrap().port()
  };
  let out = cmd_bin("qe-activity-report")
    .args([
      "--users",
      "alice",
      "--host",
      "127.0.0.1",
      "--port",
      &port.to_string(),
      "--protocol",
      "http",
      "--since",
      "2024/01/01",
      "--until",
      "2024/01/31",
    ])
    .output()
    .unwrap();
  assert!(!out.status.success());
  assert!(out.stdout.is_empty());
  assert!(String::from_utf8_lossy(&out.stderr).contains("search request failed"));
}
