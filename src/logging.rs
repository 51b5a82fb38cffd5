//! File logging. The terminal belongs to the UI, so logs go to a daily
//! rolling file instead of stdout.

use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogConfig;

const LOG_FILE: &str = "tongmotor.log";

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered lines get flushed.
pub fn init(config: &LogConfig) -> Result<WorkerGuard> {
  let directory = match &config.directory {
    Some(dir) => dir.clone(),
    None => default_directory()?,
  };
  std::fs::create_dir_all(&directory)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", directory.display(), e))?;

  let appender = tracing_appender::rolling::daily(&directory, LOG_FILE);
  let (writer, guard) = tracing_appender::non_blocking(appender);

  let filter = build_filter(config.level.as_deref())?;

  tracing_subscriber::registry()
    .with(fmt::layer().with_ansi(false).with_writer(writer))
    .with(filter)
    .try_init()
    .map_err(|e| eyre!("Failed to install log subscriber: {}", e))?;

  Ok(guard)
}

/// RUST_LOG wins when set; otherwise this crate logs at the configured level.
fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
  if let Ok(filter) = EnvFilter::try_from_default_env() {
    return Ok(filter);
  }

  let level = level.unwrap_or("info");
  EnvFilter::try_new(format!("warn,tongmotor={}", level))
    .map_err(|e| eyre!("Invalid log level '{}': {}", level, e))
}

fn default_directory() -> Result<PathBuf> {
  let data_dir = dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .ok_or_else(|| eyre!("Could not determine data directory"))?;

  Ok(data_dir.join("tongmotor").join("logs"))
}
