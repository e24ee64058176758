// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Issue-tracker search seam (JIRA REST v2) with an HTTP backend and an env-backed test backend
// role: tracker/api
// inputs: Connection settings (protocol, host, port, credentials); JQL + SearchOptions; env QAR_TEST_SEARCH_JSON
// outputs: Raw search pages as serde_json::Value
// side_effects: Network calls to the tracker host
// invariants:
// - Exactly one bounded request per search; no paging, no retry
// - Env backend wins whenever QAR_TEST_SEARCH_JSON is set
// errors: Transport failures and non-2xx statuses surface as ReportError::Transport
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::error::ReportError;

pub const TEST_SEARCH_ENV: &str = "QAR_TEST_SEARCH_JSON";

/// Fields requested for every search.
pub const SEARCH_FIELDS: &[&str] = &[
  "key",
  "issuetype",
  "components",
  "labels",
  "timeoriginalestimate",
  "timespent",
  "creator",
  "parent",
  "customfield_10001",
  "summary",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
  pub max_results: u32,
  pub expand: Vec<String>,
  pub fields: Vec<String>,
}

impl SearchOptions {
  /// Changelog-expanded options, also requesting the story-points field.
  pub fn new(max_results: u32, story_points_field: &str) -> Self {
    let mut fields: Vec<String> = SEARCH_FIELDS.iter().map(|f| f.to_string()).collect();
    if !fields.iter().any(|f| f == story_points_field) {
      fields.push(story_points_field.to_string());
    }
    Self {
      max_results,
      expand: vec!["changelog".to_string()],
      fields,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
  pub protocol: String,
  pub host: String,
  pub port: Option<u16>,
  pub username: Option<String>,
  #[serde(skip_serializing)]
  pub password: Option<String>,
}

impl Connection {
  pub fn base_url(&self) -> String {
    match self.port {
      Some(port) => format!("{}://{}:{}", self.protocol, self.host, port),
      None => format!("{}://{}", self.protocol, self.host),
    }
  }

  fn basic_auth(&self) -> Option<String> {
    let user = self.username.as_deref()?;
    let password = self.password.as_deref().unwrap_or("");
    Some(format!("Basic {}", STANDARD.encode(format!("{}:{}", user, password))))
  }
}

// --- Trait seam for the tracker search API ---
pub trait IssueTracker {
  fn search(&self, jql: &str, options: &SearchOptions) -> Result<serde_json::Value, ReportError>;
}

struct JiraHttpApi {
  search_url: String,
  auth: Option<String>,
  agent: ureq::Agent,
}

impl JiraHttpApi {
  fn new(conn: &Connection) -> Self {
    Self {
      search_url: format!("{}/rest/api/2/search", conn.base_url()),
      auth: conn.basic_auth(),
      agent: ureq::AgentBuilder::new().build(),
    }
  }
}

impl IssueTracker for JiraHttpApi {
  fn search(&self, jql: &str, options: &SearchOptions) -> Result<serde_json::Value, ReportError> {
    let body = serde_json::json!({
      "jql": jql,
      "startAt": 0,
      "maxResults": options.max_results,
      "expand": options.expand,
      "fields": options.fields,
    });

    let mut request = self
      .agent
      .post(&self.search_url)
      .set("Accept", "application/json")
      .set("User-Agent", "qe-activity-report");

    if let Some(auth) = &self.auth {
      request = request.set("Authorization", auth);
    }

    let response = match request.send_json(body) {
      Ok(resp) => resp,
      Err(ureq::Error::Status(code, resp)) => {
        let detail = resp.into_string().unwrap_or_default();
        return Err(ReportError::Transport(format!("HTTP {} from {}: {}", code, self.search_url, detail.trim())));
      }
      Err(e) => return Err(ReportError::Transport(e.to_string())),
    };

    response
      .into_json::<serde_json::Value>()
      .map_err(|e| ReportError::Transport(format!("invalid JSON from {}: {}", self.search_url, e)))
  }
}

/// Canned pages keyed by a JQL substring; the first key found in the query wins.
struct JiraEnvApi;

impl IssueTracker for JiraEnvApi {
  fn search(&self, jql: &str, _options: &SearchOptions) -> Result<serde_json::Value, ReportError> {
    let raw = std::env::var(TEST_SEARCH_ENV).map_err(|_| ReportError::Transport(format!("{} is not set", TEST_SEARCH_ENV)))?;
    let pages: serde_json::Value =
      serde_json::from_str(&raw).map_err(|e| ReportError::Transport(format!("{} is not JSON: {}", TEST_SEARCH_ENV, e)))?;

    let Some(map) = pages.as_object() else {
      return Err(ReportError::Transport(format!("{} must be a JSON object", TEST_SEARCH_ENV)));
    };

    for (needle, page) in map {
      if jql.contains(needle.as_str()) {
        return Ok(page.clone());
      }
    }

    Ok(serde_json::json!({ "issues": [] }))
  }
}

fn env_wants_mock() -> bool {
  std::env::var(TEST_SEARCH_ENV).is_ok()
}

pub fn build_api(conn: &Connection) -> Box<dyn IssueTracker> {
  if env_wants_mock() {
    tracing::debug!("using {} fixtures instead of {}", TEST_SEARCH_ENV, conn.base_url());
    Box::new(JiraEnvApi)
  } else {
    Box::new(JiraHttpApi::new(conn))
  }
}

/// Discover the tracker password: JIRA_PASSWORD first, then JIRA_API_TOKEN.
pub fn get_tracker_password() -> Option<String> {
  for var in ["JIRA_PASSWORD", "JIRA_API_TOKEN"] {
    if let Ok(v) = std::env::var(var) {
      if !v.trim().is_empty() {
        return Some(v);
      }
    }
  }
  None
}
