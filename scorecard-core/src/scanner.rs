//! # Pull Request Scanner
//!
//! Finds open Renovate pull requests that already touch the target of a
//! check. Each provider variant implements [`PullRequestSource`]; the scanner
//! drives the traversal (pull requests, then changed files) and turns each
//! relevant pull request into one deduction.
//!
//! Changed-file lookups for independent pull requests run concurrently, but
//! results are consumed in the order the provider listed the pull requests,
//! so the returned deductions are deterministic.

use std::future::Future;

use futures::future::join_all;
use tracing::{error, info, trace};

use crate::deduction::Deduction;
use crate::error::ProviderError;
use crate::remote::RepositoryIdentity;
use crate::text::{LINE_BREAK, escape_html};

/// Branch-name substring identifying automated dependency upgrades
pub const RENOVATE_MARKER: &str = "renovate";

/// Points deducted per open pull request touching the target
pub const DEDUCTION_PER_ACTIVE_PULL_REQUEST: u32 = 20;

/// Points deducted when a provider turns the scan itself into the result
pub const FAILED_REQUEST_DEDUCTION: u32 = 100;

/// A pull request as the scanner sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
  pub id: u64,
  pub source_branch_name: String,
  pub repository_name: String,
  /// Provider-side repository id, needed to address iterations
  pub repository_id: String,
}

/// Whether a branch name marks an automated dependency upgrade
pub fn is_renovate_branch(branch: &str) -> bool {
  branch.contains(RENOVATE_MARKER)
}

/// How a changed file is matched against the scan target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
  /// The target is a service directory; any changed path containing it matches
  ContainsServicePath,
  /// The target is a manifest file; any changed path ending in its file name matches
  EndsWithFileName,
}

impl MatchRule {
  /// What the target looks like to this rule
  pub fn subject<'a>(&self, target: &'a str) -> &'a str {
    match self {
      Self::ContainsServicePath => normalize_target(target),
      Self::EndsWithFileName => file_name(target),
    }
  }

  pub fn matches(&self, changed_path: &str, target: &str) -> bool {
    let subject = self.subject(target);
    match self {
      Self::ContainsServicePath => changed_path.contains(subject),
      Self::EndsWithFileName => !subject.is_empty() && changed_path.ends_with(subject),
    }
  }
}

fn normalize_target(target: &str) -> &str {
  target.trim_start_matches("./").trim_matches('/')
}

fn file_name(target: &str) -> &str {
  target.rsplit(['/', '\\']).next().unwrap_or(target)
}

/// What a provider does with a failed required call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
  /// Log the failure and contribute nothing
  Abstain,
  /// Report the failure as a single full-weight deduction
  Deduct,
}

/// Capability shared by every provider client
pub trait PullRequestSource: Send + Sync {
  /// Open pull requests of `identity` whose source branch is a Renovate branch
  fn list_open_renovate_pull_requests(
    &self,
    identity: &RepositoryIdentity,
  ) -> impl Future<Output = Result<Vec<PullRequest>, ProviderError>> + Send;

  /// Every path changed by `pull_request`
  fn list_changed_files(
    &self,
    identity: &RepositoryIdentity,
    pull_request: &PullRequest,
  ) -> impl Future<Output = Result<Vec<String>, ProviderError>> + Send;

  fn match_rule(&self) -> MatchRule;

  fn failure_policy(&self) -> FailurePolicy;
}

/// Scan `identity` for open Renovate pull requests touching `target`.
///
/// Returns one weight-20 deduction per relevant pull request, in provider
/// order. Failures are handled according to the source's
/// [`FailurePolicy`]; partial results are never returned.
pub async fn scan<S>(identity: &RepositoryIdentity, source: &S, target: &str) -> Vec<Deduction>
where
  S: PullRequestSource,
{
  let rule = source.match_rule();

  match find_relevant_pull_requests(identity, source, target).await {
    Ok(relevant) => relevant
      .iter()
      .map(|pull_request| {
        Deduction::create(
          DEDUCTION_PER_ACTIVE_PULL_REQUEST,
          format!(
            "Active pull request #{} in {} is renovating {}",
            pull_request.id,
            pull_request.repository_name,
            rule.subject(target)
          ),
        )
      })
      .collect(),
    Err(failure) => handle_failure(source.failure_policy(), target, failure),
  }
}

async fn find_relevant_pull_requests<S>(
  identity: &RepositoryIdentity,
  source: &S,
  target: &str,
) -> Result<Vec<PullRequest>, ProviderError>
where
  S: PullRequestSource,
{
  let rule = source.match_rule();
  let pull_requests = source.list_open_renovate_pull_requests(identity).await?;

  let changed_files = join_all(
    pull_requests
      .iter()
      .map(|pull_request| source.list_changed_files(identity, pull_request)),
  )
  .await;

  let mut relevant = Vec::new();
  for (pull_request, files) in pull_requests.into_iter().zip(changed_files) {
    let files = files?;
    if files.iter().any(|path| rule.matches(path, target)) {
      info!("Found open PR #{} in {target}", pull_request.id);
      relevant.push(pull_request);
    }
  }

  Ok(relevant)
}

fn handle_failure(policy: FailurePolicy, target: &str, failure: ProviderError) -> Vec<Deduction> {
  match (policy, failure) {
    (FailurePolicy::Deduct, ProviderError::RequestFailed { url, status, body }) => {
      vec![Deduction::create(
        FAILED_REQUEST_DEDUCTION,
        format!(
          "Failed to get pull requests from {url}{LINE_BREAK}{status}{LINE_BREAK}{}",
          escape_html(&body)
        ),
      )]
    }
    (_, failure) => {
      error!("Couldn't fetch open PRs for {target}: {failure}; check verbose output for response");
      if let ProviderError::RequestFailed { body, .. } = &failure {
        trace!("response: {body}");
      }
      Vec::new()
    }
  }
}
