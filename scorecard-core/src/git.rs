//! # Remote Listing
//!
//! Produces `git remote -v` style lines for the repository that contains a
//! service path, so the remote locator sees the same shape whether the
//! input came from git2 or from a shell.

use std::path::Path;

use anyhow::{Context, Result};
use git2::Repository;
use tracing::debug;

/// List the remotes of the repository containing `path`.
///
/// Each remote yields a `name\turl (fetch)` line, followed by a
/// `name\turl (push)` line when a distinct push URL is configured. Remotes
/// come in the order git2 reports them.
pub fn list_remotes(path: &Path) -> Result<Vec<String>> {
  let repo = Repository::discover(path)
    .with_context(|| format!("Failed to find a git repository containing {}", path.display()))?;

  let names = repo.remotes().context("Failed to list git remotes")?;

  let mut lines = Vec::new();
  for name in names.iter().flatten() {
    let remote = repo
      .find_remote(name)
      .with_context(|| format!("Failed to read remote {name}"))?;

    let Some(url) = remote.url() else {
      debug!("Skipping remote {name} with a non UTF-8 URL");
      continue;
    };
    lines.push(format!("{name}\t{url} (fetch)"));

    if let Some(push_url) = remote.pushurl()
      && push_url != url
    {
      lines.push(format!("{name}\t{push_url} (push)"));
    }
  }

  debug!("Found {} remote lines for {}", lines.len(), path.display());
  Ok(lines)
}
