use anyhow::Result;
use clap::Parser;

mod classify;
mod cli;
mod config;
mod error;
mod ext;
mod logging;
mod model;
mod pipeline;
mod render;
mod search;
mod store;
mod tracker;
mod util;
mod window;

use crate::cli::{Cli, normalize};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  logging::init(cli.verbose, cli.quiet)?;

  // Phase 1: normalize CLI + config file
  let cfg = normalize(cli)?;
  let cfg_json = serde_json::to_string(&cfg)?;
  tracing::debug!(config = %cfg_json, "effective config");

  // Phase 2: run the passes against the tracker
  let api = tracker::build_api(&cfg.connection);
  let store = pipeline::collect(api.as_ref(), &cfg)?;

  // Phase 3: render
  let stdout = std::io::stdout();
  let mut out = stdout.lock();
  render::write_report(&mut out, &store, &cfg.window, cfg.format)
}
