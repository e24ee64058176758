use anyhow::{Result, bail};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use crate::classify::UnlistedUsers;
use crate::config::FileConfig;
use crate::render::OutputFormat;
use crate::tracker::Connection;
use crate::tracker::api::get_tracker_password;
use crate::window::{ReportWindow, Tz};

pub const DEFAULT_GROUP: &str = "qe";
pub const DEFAULT_STORY_POINTS_FIELD: &str = "customfield_10003";
pub const DEFAULT_MAX_RESULTS: u32 = 1000;

#[derive(Parser, Debug)]
#[command(
    name = "qe-activity-report",
    version,
    about = "Summarize QE activity (filed, commented, closed, tested tickets) from JIRA",
    long_about = None
)]
pub struct Cli {
  /// JSON config file (users, host, port, user, password, start, end, ...)
  #[arg(long)]
  pub config: Option<PathBuf>,

  /// Comma-separated tracker user names to report on
  #[arg(long, value_delimiter = ',')]
  pub users: Vec<String>,

  /// Tracker host name, e.g. jira.example.com
  #[arg(long)]
  pub host: Option<String>,

  /// Tracker port (default: protocol default)
  #[arg(long)]
  pub port: Option<u16>,

  /// http or https (default https)
  #[arg(long)]
  pub protocol: Option<String>,

  /// User for basic auth
  #[arg(long)]
  pub username: Option<String>,

  /// Password for basic auth (falls back to JIRA_PASSWORD, then JIRA_API_TOKEN)
  #[arg(long)]
  pub password: Option<String>,

  /// Window start: YYYY/MM/DD, YYYY-MM-DD (optionally " HH:MM") or RFC3339
  #[arg(long, alias = "start")]
  pub since: Option<String>,

  /// Window end (inclusive); a bare date means 00:00 of that day
  #[arg(long, alias = "end")]
  pub until: Option<String>,

  /// Tracker group whose members' filed tickets are counted
  #[arg(long)]
  pub group: Option<String>,

  /// Custom field holding story points
  #[arg(long)]
  pub story_points_field: Option<String>,

  /// Result cap for each search
  #[arg(long)]
  pub max_results: Option<u32>,

  /// Timezone the window bounds are interpreted in
  #[arg(long, value_enum, default_value_t = Tz::Local)]
  pub tz: Tz,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
  pub format: OutputFormat,

  /// Credit activity by users not in --users instead of skipping it
  #[arg(long)]
  pub track_unlisted: bool,

  /// More logging (repeatable)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Errors only
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Debug, Serialize)]
pub struct EffectiveConfig {
  pub users: Vec<String>,
  pub connection: Connection,
  pub window: ReportWindow,
  pub group: String,
  pub story_points_field: String,
  pub max_results: u32,
  pub unlisted: UnlistedUsers,
  pub format: OutputFormat,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let file = match &cli.config {
    Some(path) => FileConfig::load(path)?,
    None => FileConfig::default(),
  };

  let users: Vec<String> = if cli.users.is_empty() {
    file.users.unwrap_or_default()
  } else {
    cli.users
  };
  let users: Vec<String> = users
    .into_iter()
    .map(|u| u.trim().to_string())
    .filter(|u| !u.is_empty())
    .collect();
  if users.is_empty() {
    bail!("No users to report on: pass --users or set `users` in the config file");
  }

  let Some(host) = cli.host.or(file.host) else {
    bail!("Missing tracker host: pass --host or set `host` in the config file");
  };

  let protocol = cli.protocol.or(file.protocol).unwrap_or_else(|| "https".to_string());
  if !matches!(protocol.as_str(), "http" | "https") {
    bail!("Unsupported protocol {:?}: expected http or https", protocol);
  }

  let (start, end) = match (cli.since.or(file.start), cli.until.or(file.end)) {
    (Some(s), Some(e)) => (s, e),
    _ => bail!("Provide both --since and --until (or `start` and `end` in the config file)"),
  };
  let window = ReportWindow::parse(&start, &end, cli.tz)?;

  let password = cli.password.or(file.password).or_else(get_tracker_password);

  Ok(EffectiveConfig {
    users,
    connection: Connection {
      protocol,
      host,
      port: cli.port.or(file.port),
      username: cli.username.or(file.user),
      password,
    },
    window,
    group: cli.group.or(file.group).unwrap_or_else(|| DEFAULT_GROUP.to_string()),
    story_points_field: cli
      .story_points_field
      .or(file.story_points_field)
      .unwrap_or_else(|| DEFAULT_STORY_POINTS_FIELD.to_string()),
    max_results: cli.max_results.or(file.max_results).unwrap_or(DEFAULT_MAX_RESULTS),
    unlisted: if cli.track_unlisted {
      UnlistedUsers::Track
    } else {
      UnlistedUsers::Skip
    },
    format: cli.format,
  })
}
