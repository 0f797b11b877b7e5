//! # Dependency Upgrade Check
//!
//! Deducts points for every open Renovate pull request that already touches
//! a service: the upgrade exists but nobody merged it.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use futures::FutureExt;
use futures::future::BoxFuture;
use scorecard_core::Deduction;
use scorecard_core::config::DEPENDENCY_UPGRADES;
use scorecard_core::git::list_remotes;
use scorecard_core::http::HttpFetch;
use scorecard_core::remote::{Provider, RepositoryIdentity, resolve_first};
use scorecard_core::scanner::scan;
use tracing::{error, warn};

use super::{Check, first_project_file};
use crate::provider::ProviderClients;

/// Manifest used for GitHub when the service has no project file
const FALLBACK_MANIFEST: &str = "package.json";

/// Checks for open Renovate pull requests touching the service
pub struct DependencyUpgrades<F> {
  clients: Arc<ProviderClients<F>>,
}

impl<F> DependencyUpgrades<F> {
  pub fn new(clients: Arc<ProviderClients<F>>) -> Self {
    Self { clients }
  }
}

impl<F: HttpFetch + Clone> Check for DependencyUpgrades<F> {
  fn name(&self) -> &str {
    DEPENDENCY_UPGRADES
  }

  fn description(&self) -> &str {
    "Each open Renovate pull request touching the service costs 20 points"
  }

  fn run<'a>(&'a self, working_dir: &'a Path, relative_service_path: &'a str) -> BoxFuture<'a, Result<Vec<Deduction>>> {
    async move {
      let service_root = working_dir.join(relative_service_path);

      let Some(identity) = locate(&service_root, relative_service_path) else {
        return Ok(Vec::new());
      };

      let Some(target) = scan_target(&identity, &service_root, relative_service_path)? else {
        return Ok(Vec::new());
      };

      let client = match self.clients.client_for(&identity) {
        Ok(client) => client,
        Err(missing) => {
          error!("{missing}; can't check {relative_service_path} for open pull requests");
          return Ok(Vec::new());
        }
      };

      Ok(scan(&identity, &client, &target).await)
    }
    .boxed()
  }
}

/// Identity of the repository holding the service, if one resolves
fn locate(service_root: &Path, relative_service_path: &str) -> Option<RepositoryIdentity> {
  let remotes = match list_remotes(service_root) {
    Ok(remotes) => remotes,
    Err(failure) => {
      error!("Couldn't list git remotes for {relative_service_path}: {failure:#}");
      return None;
    }
  };

  resolve_first(remotes.iter().map(String::as_str), relative_service_path).ok()
}

/// What the provider's match rule compares changed paths against
fn scan_target(identity: &RepositoryIdentity, service_root: &Path, relative_service_path: &str) -> Result<Option<String>> {
  match identity.provider() {
    Provider::AzureDevOps => Ok(Some(relative_service_path.replace('\\', "/"))),
    Provider::GitHub => {
      if let Some(project) = first_project_file(service_root)? {
        return Ok(Some(project.to_string_lossy().into_owned()));
      }

      if service_root.join(FALLBACK_MANIFEST).is_file() {
        return Ok(Some(FALLBACK_MANIFEST.to_string()));
      }

      warn!("No manifest found for {relative_service_path}; can't check for open pull requests");
      Ok(None)
    }
  }
}
