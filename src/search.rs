// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Build the JQL for each collection pass from the user list and report window
// role: search/builder
// inputs: Template strings with %1$s (user), %2$s (start date), %3$s (end date); user list; ReportWindow
// outputs: One query string per pass
// invariants: Pure; per-user queries are joined with " OR " in user-list order
// errors: Templates missing a placeholder or naming an unknown one are rejected
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ReportError;
use crate::pipeline::Pass;
use crate::window::ReportWindow;

pub const COMMENTED_TEMPLATE: &str = r#"issueFunction in commented("by %1$s after %2$s before %3$s")"#;
pub const CLOSED_TEMPLATE: &str = r#"Status CHANGED TO Closed DURING ("%2$s", "%3$s") by %1$s"#;

pub const MANUAL_TEST_LABEL: &str = "qe-manualtest";
pub const AUTOMATED_TEST_LABEL: &str = "qe-automatedtest";

static RE_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"%(\d+)\$s").unwrap());

/// Substitute `%1$s`, `%2$s` and `%3$s` for every user and OR the results together.
pub fn create_search<S: AsRef<str>>(template: &str, users: &[S], window: &ReportWindow) -> Result<String, ReportError> {
  check_template(template)?;

  let start = window.start_date();
  let end = window.end_date();

  let queries: Vec<String> = users
    .iter()
    .map(|user| {
      template
        .replace("%1$s", user.as_ref())
        .replace("%2$s", &start)
        .replace("%3$s", &end)
    })
    .collect();

  Ok(queries.join(" OR "))
}

fn check_template(template: &str) -> Result<(), ReportError> {
  for caps in RE_PLACEHOLDER.captures_iter(template) {
    let index = &caps[1];
    if !matches!(index, "1" | "2" | "3") {
      return Err(ReportError::UnknownPlaceholder(index.to_string()));
    }
  }

  for index in 1..=3u8 {
    if !template.contains(&format!("%{}$s", index)) {
      return Err(ReportError::MissingPlaceholder(index));
    }
  }

  Ok(())
}

/// Issues created by any member of `group` inside the window.
pub fn filed_query(group: &str, window: &ReportWindow) -> String {
  format!(
    r#"creator in membersOf({}) AND createdDate >= "{}" AND createdDate <= "{}""#,
    group,
    window.start_datetime(),
    window.end_datetime()
  )
}

/// Issues updated inside the window that carry either test label.
pub fn tested_query(window: &ReportWindow) -> String {
  format!(
    r#"(updatedDate >= "{}" and updatedDate <= "{}") and labels in ({}, {})"#,
    window.start_datetime(),
    window.end_datetime(),
    AUTOMATED_TEST_LABEL,
    MANUAL_TEST_LABEL
  )
}

/// The four queries of one run, built up front.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
  pub filed: String,
  pub commented: String,
  pub closed: String,
  pub tested: String,
}

impl SearchPlan {
  pub fn build<S: AsRef<str>>(users: &[S], group: &str, window: &ReportWindow) -> Result<Self, ReportError> {
    Ok(Self {
      filed: filed_query(group, window),
      commented: create_search(COMMENTED_TEMPLATE, users, window)?,
      closed: create_search(CLOSED_TEMPLATE, users, window)?,
      tested: tested_query(window),
    })
  }

  pub fn query(&self, pass: Pass) -> &str {
    match pass {
      Pass::Filed => &self.filed,
      Pass::Commented => &self.commented,
      Pass::Closed => &self.closed,
      Pass::Tested => &self.tested,
    }
  }
}
