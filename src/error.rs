// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed faults raised by the search builder, classifier, store and tracker client
// role: errors/taxonomy
// outputs: ReportError; converted into anyhow::Error at orchestration level
// invariants: Every variant aborts the run; nothing here is retried
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
  /// The search request failed or returned an unusable body.
  #[error("search request failed: {0}")]
  Transport(String),

  /// A classifier tried to update a user that was never seeded.
  #[error("user `{0}` is not tracked in this report")]
  UnknownUser(String),

  #[error("issue {key}: {reason}")]
  MalformedIssue { key: String, reason: String },

  #[error("search template is missing placeholder %{0}$s")]
  MissingPlaceholder(u8),

  #[error("search template references unknown placeholder %{0}$s")]
  UnknownPlaceholder(String),
}

impl ReportError {
  pub fn malformed(key: &str, reason: impl Into<String>) -> Self {
    ReportError::MalformedIssue {
      key: key.to_string(),
      reason: reason.into(),
    }
  }
}
