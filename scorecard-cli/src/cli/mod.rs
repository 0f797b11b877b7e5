//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the scorecard tool.

mod config;
mod remote;
mod run;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use scorecard_core::ColorMode;

/// Top-level CLI command for the scorecard tool
#[derive(Parser)]
#[command(name = "scorecard")]
#[command(about = "Repository health scorecard generator")]
#[command(
  long_about = "Scorecard runs a set of health checks against every service in a working copy\n\
        and publishes the scores as an HTML table in a markdown wiki page.\n\n\
        Checks include project metadata and open Renovate pull requests on\n\
        Azure DevOps or GitHub."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the scorecard tool
#[derive(Subcommand)]
pub enum Commands {
  /// Check every service and write the scorecard page
  #[command(long_about = "Discovers services below the working directory, runs every configured check\n\
            against each of them and writes the scorecard page.\n\n\
            Credentials for Azure DevOps and GitHub come from the flags, then the\n\
            AZURE_DEVOPS_PAT and GITHUB_TOKEN environment variables, then ~/.netrc.")]
  Run(run::RunArgs),

  /// Show the repository a working copy belongs to
  #[command(long_about = "Lists the git remotes of a working copy and prints the Azure DevOps or GitHub\n\
            repository the dependency-upgrade check would query.")]
  Remote(remote::RemoteArgs),

  /// Print the effective configuration
  #[command(long_about = "Prints the configuration a run in the given directory would use, as TOML.\n\n\
            The configuration comes from --config, else scorecard.toml in the working\n\
            directory, else scorecard.toml in the user config directory, else defaults.")]
  Config(config::ConfigArgs),
}

/// Handle the CLI commands
pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  match cli.command {
    Commands::Run(args) => run::handle_run_command(args),
    Commands::Remote(args) => remote::handle_remote_command(args),
    Commands::Config(args) => config::handle_config_command(args),
  }
}
