use crate::error::ReportError;
use crate::ext::serde_json::JsonFetch;
use crate::model::{ChangeEvent, ChangeLog, FieldChange, Issue};
use crate::window::parse_tracker_timestamp;

/// Resolve a user object to its identifier (`name`, falling back to `accountId`).
fn user_id(value: &serde_json::Value, path: &str) -> Option<String> {
  value
    .fetch(&format!("{}.name", path))
    .to::<String>()
    .or_else(|| value.fetch(&format!("{}.accountId", path)).to::<String>())
}

fn parse_field_change(item: &serde_json::Value) -> FieldChange {
  FieldChange {
    field: item.fetch("field").to_or_default::<String>(),
    from_value: item.fetch("fromString").to::<String>().unwrap_or_default(),
    to_value: item.fetch("toString").to::<String>().unwrap_or_default(),
  }
}

fn parse_history(key: &str, history: &serde_json::Value) -> Result<ChangeEvent, ReportError> {
  let author = user_id(history, "author").ok_or_else(|| ReportError::malformed(key, "changelog entry without author"))?;

  let created = history.fetch("created").to_or_default::<String>();
  let timestamp = parse_tracker_timestamp(&created)
    .ok_or_else(|| ReportError::malformed(key, format!("unparseable changelog timestamp {:?}", created)))?;

  let items = history
    .fetch("items")
    .to::<Vec<serde_json::Value>>()
    .unwrap_or_default()
    .iter()
    .map(parse_field_change)
    .collect();

  Ok(ChangeEvent {
    author,
    timestamp,
    items,
  })
}

/// How strictly changelog histories are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Histories {
  /// A history without author or with a bad timestamp fails the issue.
  Strict,
  /// Such histories are dropped; the rest of the issue is kept.
  Lenient,
}

/// Map one issue object from a search page.
pub fn parse_issue(value: &serde_json::Value, story_points_field: &str, mode: Histories) -> Result<Issue, ReportError> {
  let key = value
    .fetch("key")
    .to::<String>()
    .ok_or_else(|| ReportError::malformed("<unknown>", "issue without key"))?;

  let raw = value.fetch("changelog.histories").to::<Vec<serde_json::Value>>().unwrap_or_default();
  let histories = match mode {
    Histories::Strict => raw.iter().map(|h| parse_history(&key, h)).collect::<Result<Vec<_>, _>>()?,
    Histories::Lenient => raw
      .iter()
      .filter_map(|h| match parse_history(&key, h) {
        Ok(event) => Some(event),
        Err(e) => {
          tracing::debug!(error = %e, "dropping changelog entry");
          None
        }
      })
      .collect(),
  };

  Ok(Issue {
    creator: user_id(value, "fields.creator"),
    summary: value.fetch("fields.summary").to_or_default::<String>(),
    story_points: value.fetch(&format!("fields.{}", story_points_field)).to::<f64>(),
    changelog: ChangeLog { histories },
    key,
  })
}

/// Map a search response (`{"issues": [...]}`) into issues, in response order.
pub fn parse_issues(page: &serde_json::Value, story_points_field: &str, mode: Histories) -> Result<Vec<Issue>, ReportError> {
  let Some(arr) = page.get("issues").and_then(|v| v.as_array()) else {
    return Err(ReportError::Transport("search response has no `issues` array".into()));
  };

  arr.iter().map(|v| parse_issue(v, story_points_field, mode)).collect()
}
