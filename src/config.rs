use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional JSON configuration file. Every key may be omitted; CLI flags win.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
  pub users: Option<Vec<String>>,
  pub host: Option<String>,
  pub port: Option<u16>,
  pub protocol: Option<String>,
  pub user: Option<String>,
  pub password: Option<String>,
  pub start: Option<String>,
  pub end: Option<String>,
  pub group: Option<String>,
  pub story_points_field: Option<String>,
  pub max_results: Option<u32>,
}

impl FileConfig {
  pub fn load(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
  }
}
