//! # Azure DevOps Iteration Endpoints
//!
//! A pull request's changes are spread over its iterations (one per push).
//! A file may be touched in an early iteration and not the latest, so the
//! changed paths of every iteration are unioned.

use std::collections::HashSet;

use futures::future::join_all;
use scorecard_core::error::ProviderError;
use scorecard_core::http::{HttpFetch, fetch_json};
use scorecard_core::remote::RepositoryIdentity;
use scorecard_core::scanner::PullRequest;

use crate::client::AzureDevOpsClient;
use crate::consts::API_VERSION;
use crate::models::{AzureChanges, AzureIteration, AzureList};

impl<F: HttpFetch> AzureDevOpsClient<F> {
  fn pull_request_url(&self, identity: &RepositoryIdentity, pull_request: &PullRequest) -> String {
    format!(
      "{}/{}/{}/_apis/git/repositories/{}/pullRequests/{}",
      self.base_url,
      identity.organization(),
      identity.project(),
      pull_request.repository_id,
      pull_request.id
    )
  }

  /// URL listing the iterations of a pull request
  pub fn iterations_url(&self, identity: &RepositoryIdentity, pull_request: &PullRequest) -> String {
    format!(
      "{}/iterations?api-version={API_VERSION}",
      self.pull_request_url(identity, pull_request)
    )
  }

  /// URL listing the changes of one iteration
  pub fn iteration_changes_url(
    &self,
    identity: &RepositoryIdentity,
    pull_request: &PullRequest,
    iteration: u64,
  ) -> String {
    format!(
      "{}/iterations/{iteration}/changes?api-version={API_VERSION}",
      self.pull_request_url(identity, pull_request)
    )
  }

  /// Get the iterations of a pull request
  pub async fn get_iterations(
    &self,
    identity: &RepositoryIdentity,
    pull_request: &PullRequest,
  ) -> Result<Vec<AzureIteration>, ProviderError> {
    let url = self.iterations_url(identity, pull_request);
    let list: AzureList<AzureIteration> = fetch_json(&self.fetcher, &url).await?;
    Ok(list.value)
  }

  /// Get the changes introduced by one iteration
  pub async fn get_iteration_changes(
    &self,
    identity: &RepositoryIdentity,
    pull_request: &PullRequest,
    iteration: u64,
  ) -> Result<AzureChanges, ProviderError> {
    let url = self.iteration_changes_url(identity, pull_request, iteration);
    fetch_json(&self.fetcher, &url).await
  }

  /// Union of the paths changed across all iterations, in iteration order
  pub async fn changed_paths(
    &self,
    identity: &RepositoryIdentity,
    pull_request: &PullRequest,
  ) -> Result<Vec<String>, ProviderError> {
    let iterations = self.get_iterations(identity, pull_request).await?;

    let changes = join_all(
      iterations
        .iter()
        .map(|iteration| self.get_iteration_changes(identity, pull_request, iteration.id)),
    )
    .await;

    let mut seen = HashSet::new();
    let mut paths = Vec::new();
    for change in changes {
      for path in change?.paths() {
        if seen.insert(path.clone()) {
          paths.push(path);
        }
      }
    }

    Ok(paths)
  }
}
