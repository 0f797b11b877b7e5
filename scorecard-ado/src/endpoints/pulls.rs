//! # Azure DevOps Pull Request Endpoints
//!
//! The pull request query is project-scoped, so the repository filter is
//! applied client-side together with the Renovate branch filter.

use scorecard_core::error::ProviderError;
use scorecard_core::http::{HttpFetch, fetch_json};
use scorecard_core::remote::RepositoryIdentity;
use scorecard_core::scanner::{FailurePolicy, MatchRule, PullRequest, PullRequestSource, is_renovate_branch};
use tracing::debug;

use crate::client::AzureDevOpsClient;
use crate::consts::API_VERSION;
use crate::models::{AzureList, AzurePullRequest};

impl<F: HttpFetch> AzureDevOpsClient<F> {
  /// URL listing the active pull requests of the identity's project
  pub fn pull_requests_url(&self, identity: &RepositoryIdentity) -> String {
    format!(
      "{}/{}/{}/_apis/git/pullrequests?api-version={API_VERSION}&searchCriteria.status=active",
      self.base_url,
      identity.organization(),
      identity.project()
    )
  }

  /// Get all active pull requests of the identity's project
  pub async fn get_active_pull_requests(
    &self,
    identity: &RepositoryIdentity,
  ) -> Result<Vec<AzurePullRequest>, ProviderError> {
    let url = self.pull_requests_url(identity);
    let list: AzureList<AzurePullRequest> = fetch_json(&self.fetcher, &url).await?;
    Ok(list.value)
  }
}

impl<F: HttpFetch> PullRequestSource for AzureDevOpsClient<F> {
  async fn list_open_renovate_pull_requests(
    &self,
    identity: &RepositoryIdentity,
  ) -> Result<Vec<PullRequest>, ProviderError> {
    let pull_requests = self.get_active_pull_requests(identity).await?;
    debug!("{} active pull requests in {identity}", pull_requests.len());

    Ok(
      pull_requests
        .into_iter()
        .filter(|pull_request| {
          pull_request.repository.name == identity.repository() && is_renovate_branch(&pull_request.source_ref_name)
        })
        .map(|pull_request| PullRequest {
          id: pull_request.pull_request_id,
          source_branch_name: pull_request.source_ref_name,
          repository_name: pull_request.repository.name,
          repository_id: pull_request.repository.id,
        })
        .collect(),
    )
  }

  async fn list_changed_files(
    &self,
    identity: &RepositoryIdentity,
    pull_request: &PullRequest,
  ) -> Result<Vec<String>, ProviderError> {
    self.changed_paths(identity, pull_request).await
  }

  fn match_rule(&self) -> MatchRule {
    MatchRule::ContainsServicePath
  }

  fn failure_policy(&self) -> FailurePolicy {
    FailurePolicy::Abstain
  }
}
