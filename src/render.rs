// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render the aggregation store as Detail/Summary tables or as a JSON report
// role: output/render
// inputs: AggregationStore; ReportWindow (JSON only); OutputFormat
// outputs: Text written to the provided writer
// invariants:
// - Users appear in store order; detail rows keep the order they were recorded in
// - Summaries are truncated to SUMMARY_WIDTH characters, never mid-character
// errors: IO and serialization failures bubble as anyhow::Error
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use prettytable::{Cell, Row, Table, format};
use serde::Serialize;

use crate::model::{DetailRecord, UserStat};
use crate::store::AggregationStore;
use crate::util::truncate_chars;
use crate::window::ReportWindow;

pub const SUMMARY_WIDTH: usize = 110;

const DETAIL_HEADERS: [&str; 5] = ["Tester", "Action", "Ticket", "Points", "Summary"];
const SUMMARY_HEADERS: [&str; 11] = [
  "Tester",
  "Filed-QE",
  "Filed-PROC",
  "Filed-Other",
  "Commented",
  "Closed-QE",
  "Closed-PROC",
  "Closed-Other",
  "Closed Points",
  "Manual",
  "Automated",
];

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Table,
  Json,
}

fn new_table(headers: &[&str]) -> Table {
  let mut table = Table::new();
  table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
  table.set_titles(Row::new(headers.iter().map(|h| Cell::new(h)).collect()));
  table
}

fn text_row(cells: Vec<String>) -> Row {
  Row::new(cells.iter().map(|c| Cell::new(c)).collect())
}

fn detail_cells(user: &str, detail: &DetailRecord) -> Vec<String> {
  vec![
    user.to_string(),
    detail.action.to_string(),
    detail.key.clone(),
    detail.points.to_string(),
    truncate_chars(&detail.summary, SUMMARY_WIDTH).to_string(),
  ]
}

pub fn detail_table(store: &AggregationStore) -> Table {
  let mut table = new_table(&DETAIL_HEADERS);
  for (user, stat) in store.iter() {
    for detail in &stat.detail {
      table.add_row(text_row(detail_cells(user, detail)));
    }
  }
  table
}

pub fn summary_table(store: &AggregationStore) -> Table {
  let mut table = new_table(&SUMMARY_HEADERS);
  for (user, s) in store.iter() {
    table.add_row(text_row(vec![
      user.clone(),
      s.filed_qe.to_string(),
      s.filed_proc.to_string(),
      s.filed_other.to_string(),
      s.commented.to_string(),
      s.closed_qe.to_string(),
      s.closed_proc.to_string(),
      s.closed_other.to_string(),
      s.closed_points.to_string(),
      s.manual_test.to_string(),
      s.automated_test.to_string(),
    ]));
  }
  table
}

#[derive(Serialize)]
struct UserReport<'a> {
  user: &'a str,
  #[serde(flatten)]
  stat: &'a UserStat,
}

#[derive(Serialize)]
struct JsonReport<'a> {
  window: &'a ReportWindow,
  users: Vec<UserReport<'a>>,
}

pub fn json_report(store: &AggregationStore, window: &ReportWindow) -> Result<serde_json::Value> {
  let report = JsonReport {
    window,
    users: store
      .iter()
      .map(|(user, stat)| UserReport { user: user.as_str(), stat })
      .collect(),
  };
  Ok(serde_json::to_value(&report)?)
}

pub fn write_report<W: Write>(out: &mut W, store: &AggregationStore, window: &ReportWindow, fmt: OutputFormat) -> Result<()> {
  match fmt {
    OutputFormat::Table => {
      writeln!(out, "Detail:")?;
      detail_table(store).print(out)?;
      writeln!(out, "Summary:")?;
      summary_table(store).print(out)?;
    }
    OutputFormat::Json => {
      serde_json::to_writer_pretty(&mut *out, &json_report(store, window)?)?;
      writeln!(out)?;
    }
  }
  Ok(())
}
