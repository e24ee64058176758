use test_support::{SEARCH_FIXTURE_ENV, cmd_bin, read_fixture_text};

const BASE_ARGS: [&str; 10] = [
  "--users",
  "alice,bob",
  "--host",
  "jira.example.com",
  "--since",
  "2024/01/01",
  "--until",
  "2024/01/31",
  "--tz",
  "utc",
];

fn run_json(extra: &[&str]) -> serde_json::Value {
  let out = cmd_bin("qe-activity-report")
    .env(SEARCH_FIXTURE_ENV, read_fixture_text("search_pages.json"))
    .args(BASE_ARGS)
    .args(["--format", "json"])
    .args(extra)
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  serde_json::from_slice(&out.stdout).unwrap()
}

fn user<'a>(report: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
  report["users"]
    .as_array()
    .unwrap()
    .iter()
    .find(|u| u["user"] == name)
    .unwrap_or_else(|| panic!("user {} missing from report", name))
}

#[test]
fn json_report_counts_every_pass() {
  let v = run_json(&[]);
  assert_eq!(v["window"]["start"], "2024/01/01 00:00");
  assert_eq!(v["window"]["end"], "2024/01/31 00:00");

  let alice = user(&v, "alice");
  assert_eq!(alice["filedQe"], 1);
  assert_eq!(alice["closedProc"], 1);
  assert_eq!(alice["closedPoints"], 0.0);
  assert_eq!(alice["commented"], 1);
  assert_eq!(alice["manualTest"], 1);

  let actions: Vec<&str> = alice["detail"]
    .as_array()
    .unwrap()
    .iter()
    .map(|d| d["action"].as_str().unwrap())
    .collect();
  assert_eq!(actions, vec!["filed", "closed", "commented", "test-manual"]);

  let bob = user(&v, "bob");
  assert_eq!(bob["filedProc"], 1);
  assert_eq!(bob["closedOther"], 1);
  assert_eq!(bob["closedPoints"], 5.0);
  assert_eq!(bob["automatedTest"], 0);
}

#[test]
fn unlisted_creators_are_skipped_by_default() {
  let v = run_json(&[]);
  let names: Vec<&str> = v["users"].as_array().unwrap().iter().map(|u| u["user"].as_str().unwrap()).collect();
  assert_eq!(names, vec!["alice", "bob"]);
}

#[test]
fn track_unlisted_adds_their_activity() {
  let v = run_json(&["--track-unlisted"]);
  let zed = user(&v, "zed");
  assert_eq!(zed["filedOther"], 1);
}

#[test]
fn table_report_prints_detail_then_summary() {
  let out = cmd_bin("qe-activity-report")
    .env(SEARCH_FIXTURE_ENV, read_fixture_text("search_pages.json"))
    .args(BASE_ARGS)
    .output()
    .unwrap();
  assert!(out.status.success());

  let stdout = String::from_utf8_lossy(&out.stdout);
  let detail = stdout.find("Detail:").unwrap();
  let summary = stdout.find("Summary:").unwrap();
  assert!(detail < summary);
  assert!(stdout.contains("Closed Points"));
  assert!(stdout.contains("Login button misaligned"));

  let stderr = String::from_utf8_lossy(&out.stderr);
  assert!(stderr.contains("Begin data collection"));
  assert!(stderr.contains("Retrieving closed tickets..."));
  assert!(stderr.contains("Processing 3 filed tickets"));
}
