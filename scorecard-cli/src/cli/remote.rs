//! # Remote Command
//!
//! Shows which provider repository a working copy resolves to, the same way
//! the dependency-upgrade check resolves it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use scorecard_core::git::list_remotes;
use scorecard_core::output::print_info;
use scorecard_core::remote::resolve_first;

/// Arguments for the remote command
#[derive(Args)]
pub struct RemoteArgs {
  /// Path inside the working copy
  #[arg(value_name = "PATH", default_value = ".")]
  pub path: PathBuf,
}

/// Handle the remote command
pub fn handle_remote_command(args: RemoteArgs) -> Result<()> {
  let remotes = list_remotes(&args.path)?;
  for remote in &remotes {
    print_info(remote);
  }

  let location = args.path.display().to_string();
  let identity = resolve_first(remotes.iter().map(String::as_str), &location)
    .with_context(|| format!("No supported remote for {location}"))?;

  println!("{identity}");
  Ok(())
}
