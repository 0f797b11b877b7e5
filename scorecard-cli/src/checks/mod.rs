//! # Checks
//!
//! A check inspects one service and returns the deductions it found. Checks
//! are looked up by the names used in `scorecard.toml`.

pub mod assembly_info;
pub mod dependency_upgrades;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use futures::future::BoxFuture;
use scorecard_core::config::{DEPENDENCY_UPGRADES, IMPLICIT_ASSEMBLY_INFO};
use scorecard_core::http::HttpFetch;
use scorecard_core::{CheckInfo, Deduction};

pub use self::assembly_info::ImplicitAssemblyInfo;
pub use self::dependency_upgrades::DependencyUpgrades;
use crate::provider::ProviderClients;

/// One health check run against every service
pub trait Check: Send + Sync {
  /// Name used in configuration and as the report column key
  fn name(&self) -> &str;

  /// Shown as the column tooltip in the report
  fn description(&self) -> &str;

  /// Inspect the service at `working_dir/relative_service_path`
  fn run<'a>(&'a self, working_dir: &'a Path, relative_service_path: &'a str) -> BoxFuture<'a, Result<Vec<Deduction>>>;

  fn info(&self) -> CheckInfo {
    CheckInfo::new(self.name(), self.description())
  }
}

/// Build the check registered under `name`
pub fn check_by_name<F>(name: &str, clients: &Arc<ProviderClients<F>>) -> Result<Box<dyn Check>>
where
  F: HttpFetch + Clone + 'static,
{
  match name {
    IMPLICIT_ASSEMBLY_INFO => Ok(Box::new(ImplicitAssemblyInfo)),
    DEPENDENCY_UPGRADES => Ok(Box::new(DependencyUpgrades::new(Arc::clone(clients)))),
    other => bail!("Unknown check '{other}' (known checks: {IMPLICIT_ASSEMBLY_INFO}, {DEPENDENCY_UPGRADES})"),
  }
}

/// First `*.csproj` directly inside `dir`, by file name
pub fn first_project_file(dir: &Path) -> Result<Option<PathBuf>> {
  let entries = fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

  let mut projects = Vec::new();
  for entry in entries {
    let path = entry?.path();
    if path.is_file() && path.extension().is_some_and(|extension| extension == "csproj") {
      projects.push(path);
    }
  }

  projects.sort();
  Ok(projects.into_iter().next())
}
