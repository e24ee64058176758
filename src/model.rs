// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define tracker issues, changelogs and the per-user report records shared by classify, store and render
// role: model/types
// outputs: Issue/ChangeEvent/FieldChange inputs; DetailRecord/UserStat outputs (serializable)
// invariants: DetailRecord is immutable once built; points default to 0 when the issue has none
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
  pub field: String,
  pub from_value: String,
  pub to_value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
  pub author: String,
  pub timestamp: DateTime<FixedOffset>,
  pub items: Vec<FieldChange>,
}

/// Ordered issue history; an issue without history has an empty log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeLog {
  pub histories: Vec<ChangeEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
  pub key: String,
  pub creator: Option<String>,
  pub summary: String,
  pub story_points: Option<f64>,
  pub changelog: ChangeLog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
  #[serde(rename = "filed")]
  Filed,
  #[serde(rename = "commented")]
  Commented,
  #[serde(rename = "closed")]
  Closed,
  #[serde(rename = "test-manual")]
  TestManual,
  #[serde(rename = "test-automated")]
  TestAutomated,
}

impl Action {
  pub fn as_str(&self) -> &'static str {
    match self {
      Action::Filed => "filed",
      Action::Commented => "commented",
      Action::Closed => "closed",
      Action::TestManual => "test-manual",
      Action::TestAutomated => "test-automated",
    }
  }
}

impl std::fmt::Display for Action {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
  pub action: Action,
  pub key: String,
  pub points: f64,
  pub summary: String,
  /// Filed and commented records keep the issue history they were built from.
  #[serde(skip)]
  pub changelog: Option<ChangeLog>,
}

impl DetailRecord {
  pub fn new(action: Action, issue: &Issue) -> Self {
    Self {
      action,
      key: issue.key.clone(),
      points: issue.story_points.unwrap_or(0.0),
      summary: issue.summary.clone(),
      changelog: None,
    }
  }

  pub fn with_changelog(mut self, changelog: &ChangeLog) -> Self {
    self.changelog = Some(changelog.clone());
    self
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
  FiledQe,
  FiledProc,
  FiledOther,
  Commented,
  ClosedQe,
  ClosedProc,
  ClosedOther,
  ManualTest,
  AutomatedTest,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStat {
  pub filed_qe: u32,
  pub filed_proc: u32,
  pub filed_other: u32,
  pub commented: u32,
  pub closed_qe: u32,
  pub closed_proc: u32,
  pub closed_other: u32,
  pub closed_points: f64,
  pub manual_test: u32,
  pub automated_test: u32,
  pub detail: Vec<DetailRecord>,
}

impl UserStat {
  pub fn counter_mut(&mut self, counter: Counter) -> &mut u32 {
    match counter {
      Counter::FiledQe => &mut self.filed_qe,
      Counter::FiledProc => &mut self.filed_proc,
      Counter::FiledOther => &mut self.filed_other,
      Counter::Commented => &mut self.commented,
      Counter::ClosedQe => &mut self.closed_qe,
      Counter::ClosedProc => &mut self.closed_proc,
      Counter::ClosedOther => &mut self.closed_other,
      Counter::ManualTest => &mut self.manual_test,
      Counter::AutomatedTest => &mut self.automated_test,
    }
  }
}
