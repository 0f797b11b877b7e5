//! # Provider Clients
//!
//! [`ProviderClient`] is the closed set of hosting providers the scanner can
//! talk to. Adding a provider means one more variant and one more arm in
//! each match below.

use scorecard_ado::{AzureDevOpsClient, create_azure_devops_client};
use scorecard_core::http::{HttpFetch, ReqwestFetcher};
use scorecard_core::remote::{Provider, RepositoryIdentity};
use scorecard_core::scanner::{FailurePolicy, MatchRule, PullRequest, PullRequestSource};
use scorecard_core::{Credentials, ProviderError, ScorecardError};
use scorecard_gh::{GitHubClient, create_github_client};

/// A pull request source for one of the supported providers
#[derive(Debug, Clone)]
pub enum ProviderClient<F> {
  AzureDevOps(AzureDevOpsClient<F>),
  GitHub(GitHubClient<F>),
}

impl<F: HttpFetch> PullRequestSource for ProviderClient<F> {
  async fn list_open_renovate_pull_requests(
    &self,
    identity: &RepositoryIdentity,
  ) -> Result<Vec<PullRequest>, ProviderError> {
    match self {
      Self::AzureDevOps(client) => client.list_open_renovate_pull_requests(identity).await,
      Self::GitHub(client) => client.list_open_renovate_pull_requests(identity).await,
    }
  }

  async fn list_changed_files(
    &self,
    identity: &RepositoryIdentity,
    pull_request: &PullRequest,
  ) -> Result<Vec<String>, ProviderError> {
    match self {
      Self::AzureDevOps(client) => client.list_changed_files(identity, pull_request).await,
      Self::GitHub(client) => client.list_changed_files(identity, pull_request).await,
    }
  }

  fn match_rule(&self) -> MatchRule {
    match self {
      Self::AzureDevOps(client) => client.match_rule(),
      Self::GitHub(client) => client.match_rule(),
    }
  }

  fn failure_policy(&self) -> FailurePolicy {
    match self {
      Self::AzureDevOps(client) => client.failure_policy(),
      Self::GitHub(client) => client.failure_policy(),
    }
  }
}

/// The clients available to one run, built once from the run's credentials.
///
/// A provider without credentials has no client.
#[derive(Debug, Clone)]
pub struct ProviderClients<F> {
  azure_devops: Option<AzureDevOpsClient<F>>,
  github: Option<GitHubClient<F>>,
}

impl<F> Default for ProviderClients<F> {
  fn default() -> Self {
    Self {
      azure_devops: None,
      github: None,
    }
  }
}

impl ProviderClients<ReqwestFetcher> {
  /// Live clients for whichever providers have credentials
  pub fn from_credentials(azure_devops: Option<Credentials>, github: Option<Credentials>) -> Self {
    Self {
      azure_devops: azure_devops.as_ref().map(create_azure_devops_client),
      github: github.map(create_github_client),
    }
  }
}

impl<F: HttpFetch + Clone> ProviderClients<F> {
  pub fn new(azure_devops: Option<AzureDevOpsClient<F>>, github: Option<GitHubClient<F>>) -> Self {
    Self { azure_devops, github }
  }

  /// The client serving `identity`'s provider
  pub fn client_for(&self, identity: &RepositoryIdentity) -> Result<ProviderClient<F>, ScorecardError> {
    let missing = || ScorecardError::MissingCredentials(identity.provider().to_string());

    match identity.provider() {
      Provider::AzureDevOps => self
        .azure_devops
        .clone()
        .map(ProviderClient::AzureDevOps)
        .ok_or_else(missing),
      Provider::GitHub => self.github.clone().map(ProviderClient::GitHub).ok_or_else(missing),
    }
  }
}
