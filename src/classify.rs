// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Attribute each returned issue (and its changelog) to tracked users as filed/commented/closed/tested activity
// role: classify/rules
// inputs: Issue values from one search pass; ReportWindow; UnlistedUsers policy
// outputs: Mutations of the AggregationStore (detail record + matching counter)
// invariants:
// - A detail record is appended only together with its counter
// - Changelog events outside the inclusive window are ignored
// - Closed points accumulate only for categories in CLOSED_POINTS_CATEGORIES
// - Authors outside the seeded user list follow one policy for every rule
// errors: MalformedIssue when a rule needs the creator and the issue has none
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::Serialize;

use crate::error::ReportError;
use crate::model::{Action, Counter, DetailRecord, Issue};
use crate::search::{AUTOMATED_TEST_LABEL, MANUAL_TEST_LABEL};
use crate::store::AggregationStore;
use crate::window::ReportWindow;

const CLOSED_STATUS: &str = "Closed";

/// Ticket category encoded in the key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCategory {
  Qe,
  Proc,
  Other,
}

impl KeyCategory {
  pub fn from_key(key: &str) -> Self {
    if key.starts_with("QE") {
      KeyCategory::Qe
    } else if key.starts_with("PROC") {
      KeyCategory::Proc
    } else {
      KeyCategory::Other
    }
  }

  fn filed_counter(self) -> Counter {
    match self {
      KeyCategory::Qe => Counter::FiledQe,
      KeyCategory::Proc => Counter::FiledProc,
      KeyCategory::Other => Counter::FiledOther,
    }
  }

  fn closed_counter(self) -> Counter {
    match self {
      KeyCategory::Qe => Counter::ClosedQe,
      KeyCategory::Proc => Counter::ClosedProc,
      KeyCategory::Other => Counter::ClosedOther,
    }
  }
}

/// Categories whose closures add their story points to `closed_points`.
pub const CLOSED_POINTS_CATEGORIES: &[KeyCategory] = &[KeyCategory::Other];

/// What to do with an author that was not in the configured user list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlistedUsers {
  #[default]
  Skip,
  Track,
}

#[derive(Debug, Clone, Copy)]
pub struct ClassifyContext<'a> {
  pub window: &'a ReportWindow,
  pub unlisted: UnlistedUsers,
}

impl<'a> ClassifyContext<'a> {
  pub fn new(window: &'a ReportWindow, unlisted: UnlistedUsers) -> Self {
    Self { window, unlisted }
  }

  /// Resolve whether `user` may be credited, growing the store under `Track`.
  fn admit(&self, store: &mut AggregationStore, user: &str) -> bool {
    if store.contains(user) {
      return true;
    }
    match self.unlisted {
      UnlistedUsers::Skip => {
        tracing::debug!(user, "skipping activity from unlisted user");
        false
      }
      UnlistedUsers::Track => {
        tracing::debug!(user, "tracking unlisted user");
        store.track(user);
        true
      }
    }
  }
}

fn creator<'i>(issue: &'i Issue) -> Result<&'i str, ReportError> {
  issue
    .creator
    .as_deref()
    .ok_or_else(|| ReportError::malformed(&issue.key, "missing creator"))
}

/// Credit the issue's creator with filing it, bucketed by key prefix.
pub fn classify_filed(store: &mut AggregationStore, issue: &Issue, ctx: &ClassifyContext) -> Result<(), ReportError> {
  let author = creator(issue)?;
  if !ctx.admit(store, author) {
    return Ok(());
  }

  let detail = DetailRecord::new(Action::Filed, issue).with_changelog(&issue.changelog);
  let counter = KeyCategory::from_key(&issue.key).filed_counter();
  store.record(author, detail, counter)
}

/// Credit a comment. The search already filtered by commenter, so the creator
/// field is what names the user here.
pub fn classify_commented(store: &mut AggregationStore, issue: &Issue, ctx: &ClassifyContext) -> Result<(), ReportError> {
  let author = creator(issue)?;
  if !ctx.admit(store, author) {
    return Ok(());
  }

  let detail = DetailRecord::new(Action::Commented, issue).with_changelog(&issue.changelog);
  store.record(author, detail, Counter::Commented)
}

/// Credit every non-Closed → Closed status transition made inside the window.
pub fn classify_closed(store: &mut AggregationStore, issue: &Issue, ctx: &ClassifyContext) -> Result<(), ReportError> {
  let category = KeyCategory::from_key(&issue.key);

  for event in &issue.changelog.histories {
    if !ctx.window.contains_instant(&event.timestamp) {
      continue;
    }

    for change in &event.items {
      let closes = change.field == "status" && change.from_value != CLOSED_STATUS && change.to_value == CLOSED_STATUS;
      if !closes || !ctx.admit(store, &event.author) {
        continue;
      }

      let detail = DetailRecord::new(Action::Closed, issue);
      let points = detail.points;
      store.record(&event.author, detail, category.closed_counter())?;

      if CLOSED_POINTS_CATEGORIES.contains(&category) {
        store.add_closed_points(&event.author, points)?;
      }
    }
  }

  Ok(())
}

fn gained_label(from: &str, to: &str, label: &str) -> bool {
  let has = |labels: &str| labels.split_whitespace().any(|l| l == label);
  !has(from) && has(to)
}

/// Credit manual/automated test labels added inside the window.
pub fn classify_tested(store: &mut AggregationStore, issue: &Issue, ctx: &ClassifyContext) -> Result<(), ReportError> {
  for event in &issue.changelog.histories {
    if !ctx.window.contains_instant(&event.timestamp) {
      continue;
    }

    for change in event.items.iter().filter(|c| c.field == "labels") {
      if gained_label(&change.from_value, &change.to_value, MANUAL_TEST_LABEL) && ctx.admit(store, &event.author) {
        let detail = DetailRecord::new(Action::TestManual, issue);
        store.record(&event.author, detail, Counter::ManualTest)?;
      }

      if gained_label(&change.from_value, &change.to_value, AUTOMATED_TEST_LABEL) && ctx.admit(store, &event.author) {
        let detail = DetailRecord::new(Action::TestAutomated, issue);
        store.record(&event.author, detail, Counter::AutomatedTest)?;
      }
    }
  }

  Ok(())
}
