use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Level selected by `-q` / `-v` flags.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
  if quiet {
    return LevelFilter::ERROR;
  }
  match verbose {
    0 => LevelFilter::INFO,
    1 => LevelFilter::DEBUG,
    _ => LevelFilter::TRACE,
  }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the flags when set.
pub fn init(verbose: u8, quiet: bool) -> anyhow::Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(level_for(verbose, quiet).into())
    .from_env_lossy();

  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(filter)
    .with_target(false)
    .try_init()
    .map_err(|e| anyhow::anyhow!("installing log subscriber: {}", e))
}
