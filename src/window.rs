use anyhow::{Result, bail};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

// Report window types live here to keep the classifier focused.

pub const QUERY_DATE_FORMAT: &str = "%Y/%m/%d";
pub const QUERY_DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M";

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Tz {
  Local,
  Utc,
}

/// Inclusive `[start, end]` reporting range.
///
/// Bounds are wall-clock times in `tz`; changelog instants are converted into
/// that zone before comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportWindow {
  pub start: NaiveDateTime,
  pub end: NaiveDateTime,
  pub tz: Tz,
}

impl ReportWindow {
  pub fn new(start: NaiveDateTime, end: NaiveDateTime, tz: Tz) -> Self {
    Self { start, end, tz }
  }

  pub fn parse(start: &str, end: &str, tz: Tz) -> Result<Self> {
    let start = parse_bound(start, tz)?;
    let end = parse_bound(end, tz)?;

    if start > end {
      bail!("report window start {} is after end {}", start, end);
    }

    Ok(Self::new(start, end, tz))
  }

  /// True unless `at` lies strictly before `start` or strictly after `end`.
  pub fn contains(&self, at: NaiveDateTime) -> bool {
    !(at < self.start || at > self.end)
  }

  pub fn contains_instant(&self, at: &DateTime<FixedOffset>) -> bool {
    self.contains(wall_clock(at, self.tz))
  }

  pub fn start_date(&self) -> String {
    self.start.format(QUERY_DATE_FORMAT).to_string()
  }

  pub fn end_date(&self) -> String {
    self.end.format(QUERY_DATE_FORMAT).to_string()
  }

  pub fn start_datetime(&self) -> String {
    self.start.format(QUERY_DATETIME_FORMAT).to_string()
  }

  pub fn end_datetime(&self) -> String {
    self.end.format(QUERY_DATETIME_FORMAT).to_string()
  }
}

impl Serialize for ReportWindow {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let mut st = serializer.serialize_struct("ReportWindow", 3)?;
    st.serialize_field("start", &self.start_datetime())?;
    st.serialize_field("end", &self.end_datetime())?;
    st.serialize_field("tz", &self.tz)?;
    st.end()
  }
}

/// Wall-clock time of `at` in `tz`.
fn wall_clock(at: &DateTime<FixedOffset>, tz: Tz) -> NaiveDateTime {
  match tz {
    Tz::Utc => at.naive_utc(),
    Tz::Local => at.with_timezone(&Local).naive_local(),
  }
}

/// Parse a window bound.
///
/// Accepts `YYYY/MM/DD` or `YYYY-MM-DD`, each optionally followed by ` HH:MM`,
/// or an RFC3339 timestamp. Date-only input resolves to midnight. Naive input is
/// already wall-clock time in `tz`; RFC3339 input is converted into `tz`.
pub fn parse_bound(raw: &str, tz: Tz) -> Result<NaiveDateTime> {
  let s = raw.trim();

  for fmt in ["%Y/%m/%d %H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
      return Ok(dt);
    }
  }

  for fmt in ["%Y/%m/%d", "%Y-%m-%d"] {
    if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
      if let Some(dt) = d.and_hms_opt(0, 0, 0) {
        return Ok(dt);
      }
    }
  }

  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(wall_clock(&dt, tz));
  }

  bail!("not a valid date: {:?} (expected YYYY/MM/DD, YYYY-MM-DD or RFC3339)", raw)
}

/// Parse a tracker changelog timestamp such as `2024-01-15T10:00:00.000+0000`.
pub fn parse_tracker_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
  DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
    .ok()
    .or_else(|| DateTime::parse_from_rfc3339(raw).ok())
}
