//! # Config Command
//!
//! Prints the configuration a run would use.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use scorecard_core::{ConfigDirs, ScorecardConfig};

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
  /// Directory whose configuration to show
  #[arg(long = "working-dir", short = 'w', value_name = "DIR", default_value = ".")]
  pub working_dir: PathBuf,

  /// Configuration file to use instead of the discovered one
  #[arg(long, short = 'c', value_name = "FILE")]
  pub config: Option<PathBuf>,
}

/// Handle the config command
pub fn handle_config_command(args: ConfigArgs) -> Result<()> {
  let working_dir = args
    .working_dir
    .canonicalize()
    .with_context(|| format!("Working directory {} does not exist", args.working_dir.display()))?;

  let config_dirs = ConfigDirs::new().ok();
  let config = ScorecardConfig::discover(args.config.as_deref(), &working_dir, config_dirs.as_ref())?;

  print!("{}", config.to_toml()?);
  Ok(())
}
