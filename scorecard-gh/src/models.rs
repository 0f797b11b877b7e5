use serde::Deserialize;

/// Represents a GitHub pull request, reduced to what the scanner reads
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubPullRequest {
  pub number: u64,
  pub head: PullRequestRef,
}

/// Represents a GitHub pull request reference (head or base)
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestRef {
  #[serde(rename = "ref")]
  pub ref_name: String,
}

/// Represents one entry of a pull request's file list
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubChangedFile {
  pub filename: String,
}
