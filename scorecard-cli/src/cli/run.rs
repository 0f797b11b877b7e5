//! # Run Command
//!
//! Discovers services, runs the configured check groups against them and
//! writes the rendered scorecard page.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use scorecard_core::creds::{azure_devops_credentials, github_credentials, home_dir};
use scorecard_core::output::{format_score, format_service_path, print_header, print_success, print_warning};
use scorecard_core::{ConfigDirs, ScorecardConfig};
use tracing::{debug, info};

use crate::checks::check_by_name;
use crate::provider::ProviderClients;
use crate::render::{render, write_report};
use crate::runner::{CheckGroupRun, CheckRunner, discover_services};

/// Arguments for the run command
#[derive(Args)]
pub struct RunArgs {
  /// Directory to search for services
  #[arg(long = "working-dir", short = 'w', value_name = "DIR", default_value = ".")]
  pub working_dir: PathBuf,

  /// Where to write the scorecard page (overrides the configured output)
  #[arg(long, short = 'o', value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Configuration file to use instead of the discovered one
  #[arg(long, short = 'c', value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Azure DevOps personal access token
  #[arg(long = "azure-pat", value_name = "PAT")]
  pub azure_pat: Option<String>,

  /// GitHub token
  #[arg(long = "github-token", value_name = "TOKEN")]
  pub github_token: Option<String>,
}

/// Handle the run command
pub fn handle_run_command(args: RunArgs) -> Result<()> {
  let working_dir = args
    .working_dir
    .canonicalize()
    .with_context(|| format!("Working directory {} does not exist", args.working_dir.display()))?;

  let config_dirs = ConfigDirs::new().ok();
  let config = ScorecardConfig::discover(args.config.as_deref(), &working_dir, config_dirs.as_ref())?;
  debug!("Effective config: {config:?}");

  let home = home_dir();
  let clients = Arc::new(ProviderClients::from_credentials(
    azure_devops_credentials(args.azure_pat.as_deref(), home.as_deref())?,
    github_credentials(args.github_token.as_deref(), home.as_deref())?,
  ));

  let groups = config
    .groups
    .iter()
    .map(|group| {
      let checks = group
        .checks
        .iter()
        .map(|name| check_by_name(name, &clients))
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("Invalid check in group '{}'", group.name))?;
      Ok(CheckGroupRun {
        name: group.name.clone(),
        checks,
      })
    })
    .collect::<Result<Vec<_>>>()?;
  let runner = CheckRunner::new(groups);

  let services = discover_services(&working_dir, &config)?;
  if services.is_empty() {
    print_warning(&format!("No services found below {}", working_dir.display()));
  }
  info!("Running checks against {} services", services.len());

  let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
  let run_info = rt.block_on(runner.run(&working_dir, &services));

  let page = render(&run_info, chrono::Local::now().naive_local())?;
  let output = output_path(&working_dir, args.output.as_deref().unwrap_or(&config.output));
  write_report(&output, &page)?;

  print_success(&format!("Scorecard written to {}", output.display()));

  if !run_info.service_scores().is_empty() {
    print_header("Average scores");
    for (service, scorecard) in run_info.service_scores() {
      println!("  {} {}", format_service_path(service), format_score(scorecard.average()));
    }
  }

  Ok(())
}

/// Relative output paths resolve against the working directory
fn output_path(working_dir: &Path, output: &Path) -> PathBuf {
  if output.is_absolute() {
    output.to_path_buf()
  } else {
    working_dir.join(output)
  }
}
