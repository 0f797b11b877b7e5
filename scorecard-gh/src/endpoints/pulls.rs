//! # GitHub Pull Request Endpoints
//!
//! Lists open pull requests of a repository and the files each one changes.
//! GitHub has no iteration concept, so a pull request's changes come from a
//! single flat file list.

use scorecard_core::error::ProviderError;
use scorecard_core::http::{HttpFetch, fetch_json};
use scorecard_core::remote::RepositoryIdentity;
use scorecard_core::scanner::{FailurePolicy, MatchRule, PullRequest, PullRequestSource, is_renovate_branch};
use tracing::debug;

use crate::client::GitHubClient;
use crate::models::{GitHubChangedFile, GitHubPullRequest};

impl<F: HttpFetch> GitHubClient<F> {
  /// URL listing the open pull requests of `identity`
  pub fn pull_requests_url(&self, identity: &RepositoryIdentity) -> String {
    format!(
      "{}/repos/{}/{}/pulls?state=open",
      self.base_url,
      identity.organization(),
      identity.repository()
    )
  }

  /// URL listing the files changed by pull request `number`
  pub fn pull_request_files_url(&self, identity: &RepositoryIdentity, number: u64) -> String {
    format!(
      "{}/repos/{}/{}/pulls/{}/files",
      self.base_url,
      identity.organization(),
      identity.repository(),
      number
    )
  }

  /// Get the open pull requests of a repository
  pub async fn get_open_pull_requests(
    &self,
    identity: &RepositoryIdentity,
  ) -> Result<Vec<GitHubPullRequest>, ProviderError> {
    let url = self.pull_requests_url(identity);
    fetch_json(&self.fetcher, &url).await
  }

  /// Get the files changed by a pull request
  pub async fn get_pull_request_files(
    &self,
    identity: &RepositoryIdentity,
    number: u64,
  ) -> Result<Vec<GitHubChangedFile>, ProviderError> {
    let url = self.pull_request_files_url(identity, number);
    fetch_json(&self.fetcher, &url).await
  }
}

impl<F: HttpFetch> PullRequestSource for GitHubClient<F> {
  async fn list_open_renovate_pull_requests(
    &self,
    identity: &RepositoryIdentity,
  ) -> Result<Vec<PullRequest>, ProviderError> {
    let pull_requests = self.get_open_pull_requests(identity).await?;
    debug!("{} open pull requests in {identity}", pull_requests.len());

    Ok(
      pull_requests
        .into_iter()
        .filter(|pull_request| is_renovate_branch(&pull_request.head.ref_name))
        .map(|pull_request| PullRequest {
          id: pull_request.number,
          source_branch_name: pull_request.head.ref_name,
          repository_name: identity.repository().to_string(),
          repository_id: identity.repository().to_string(),
        })
        .collect(),
    )
  }

  async fn list_changed_files(
    &self,
    identity: &RepositoryIdentity,
    pull_request: &PullRequest,
  ) -> Result<Vec<String>, ProviderError> {
    let files = self.get_pull_request_files(identity, pull_request.id).await?;
    Ok(files.into_iter().map(|file| file.filename).collect())
  }

  fn match_rule(&self) -> MatchRule {
    MatchRule::EndsWithFileName
  }

  fn failure_policy(&self) -> FailurePolicy {
    FailurePolicy::Deduct
  }
}
