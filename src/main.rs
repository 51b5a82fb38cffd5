mod app;
mod cache;
mod config;
mod event;
mod inventory;
mod logging;
mod sync;
mod ui;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tongmotor")]
#[command(about = "Terminal inventory for a used-motorcycle shop")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/tongmotor/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Remote table to read and write
  #[arg(short, long)]
  table: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let mut config = config::Config::load(args.config.as_deref())?;

  // Override table if specified on command line
  if let Some(table) = args.table {
    config.backend.table = table;
  }

  // Flushes buffered log lines on drop
  let _guard = logging::init(&config.log)?;
  tracing::info!(table = %config.backend.table, "starting");

  // Initialize and run the app
  let mut app = app::App::from_config(&config)?;
  app.run().await?;

  Ok(())
}
