//! # Remote Resolution
//!
//! Turns one line of `git remote -v` output (or a bare remote URL) into the
//! provider-qualified identity of the repository behind it.
//!
//! Remote strings in the wild are inconsistent: tab or space separators,
//! trailing `(fetch)`/`(push)` annotations, SCP-style SSH, user names embedded
//! in HTTPS URLs, and the legacy `{org}.visualstudio.com` host that keeps the
//! organization in the hostname. Parsing is string-based and purely
//! positional, keyed by transport and host.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::ScorecardError;

/// Hosting provider of a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
  AzureDevOps,
  GitHub,
}

impl fmt::Display for Provider {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::AzureDevOps => write!(f, "AzureDevOps"),
      Self::GitHub => write!(f, "GitHub"),
    }
  }
}

/// Provider-qualified identity of a hosted repository.
///
/// `organization` and `repository` are never empty. `project` is set for
/// Azure DevOps and always empty for GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryIdentity {
  provider: Provider,
  organization: String,
  project: String,
  repository: String,
}

impl RepositoryIdentity {
  /// Identity of an Azure DevOps repository
  pub fn azure_devops(organization: &str, project: &str, repository: &str) -> Option<Self> {
    if organization.is_empty() || project.is_empty() || repository.is_empty() {
      return None;
    }

    Some(Self {
      provider: Provider::AzureDevOps,
      organization: organization.to_string(),
      project: project.to_string(),
      repository: repository.to_string(),
    })
  }

  /// Identity of a GitHub repository
  pub fn github(organization: &str, repository: &str) -> Option<Self> {
    if organization.is_empty() || repository.is_empty() {
      return None;
    }

    Some(Self {
      provider: Provider::GitHub,
      organization: organization.to_string(),
      project: String::new(),
      repository: repository.to_string(),
    })
  }

  pub fn provider(&self) -> Provider {
    self.provider
  }

  pub fn organization(&self) -> &str {
    &self.organization
  }

  pub fn project(&self) -> &str {
    &self.project
  }

  pub fn repository(&self) -> &str {
    &self.repository
  }
}

impl fmt::Display for RepositoryIdentity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.provider {
      Provider::AzureDevOps => write!(
        f,
        "{}: {}/{}/{}",
        self.provider, self.organization, self.project, self.repository
      ),
      Provider::GitHub => write!(f, "{}: {}/{}", self.provider, self.organization, self.repository),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transport {
  Ssh,
  Https,
}

impl Transport {
  /// An explicit `https` wins over an `@`, so `https://org@dev.azure.com/...`
  /// stays HTTPS.
  fn classify(url: &str) -> Option<Self> {
    if url.contains("https") {
      Some(Self::Https)
    } else if url.contains('@') {
      Some(Self::Ssh)
    } else {
      None
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AzureHost {
  /// `dev.azure.com/{org}/...`
  Modern,
  /// `{org}.visualstudio.com/...`
  Legacy,
}

impl AzureHost {
  fn classify(url: &str) -> Option<Self> {
    if url.contains("dev.azure.com") {
      Some(Self::Modern)
    } else if url.contains("visualstudio.com") {
      Some(Self::Legacy)
    } else {
      None
    }
  }
}

/// Pull the URL out of a `git remote -v` line.
///
/// The URL is the last whitespace-separated token that is not a
/// parenthesised annotation, which also covers a bare URL.
fn extract_url(line: &str) -> Option<&str> {
  line
    .split_whitespace()
    .filter(|token| !(token.starts_with('(') && token.ends_with(')')))
    .next_back()
}

/// Resolve a remote line into a repository identity.
///
/// Returns `Ok(None)` when the remote does not belong to a supported provider
/// or uses neither SSH nor HTTPS, and
/// [`ScorecardError::UnrecognizedRemoteFormat`] when it names a supported host
/// but its path does not have the expected shape.
pub fn resolve(remote: &str) -> Result<Option<RepositoryIdentity>, ScorecardError> {
  let Some(url) = extract_url(remote) else {
    return Ok(None);
  };

  if url.contains("github") {
    return resolve_github(url).map(Some);
  }

  let (Some(transport), Some(host)) = (Transport::classify(url), AzureHost::classify(url)) else {
    return Ok(None);
  };

  resolve_azure_devops(url, transport, host).map(Some)
}

fn unrecognized(url: &str) -> ScorecardError {
  ScorecardError::UnrecognizedRemoteFormat(url.to_string())
}

fn resolve_azure_devops(url: &str, transport: Transport, host: AzureHost) -> Result<RepositoryIdentity, ScorecardError> {
  let segments: Vec<&str> = url.trim_end_matches('/').split('/').collect();

  let identity = match (transport, host) {
    // git@ssh.dev.azure.com:v3/{org}/{project}/{repo}
    // {org}@vs-ssh.visualstudio.com:v3/{org}/{project}/{repo}
    (Transport::Ssh, _) => match segments.as_slice() {
      [.., organization, project, repository] if segments.len() >= 4 => {
        RepositoryIdentity::azure_devops(organization, project, repository)
      }
      _ => None,
    },
    // https://[user@]dev.azure.com/{org}/{project}/_git/{repo}
    (Transport::Https, AzureHost::Modern) => match segments.as_slice() {
      [_, _, _, organization, project, "_git", repository, ..] => {
        RepositoryIdentity::azure_devops(organization, project, repository)
      }
      _ => None,
    },
    // https://[user@]{org}.visualstudio.com/{project}/_git/{repo}
    (Transport::Https, AzureHost::Legacy) => match segments.as_slice() {
      [_, _, host, project, "_git", repository, ..] => {
        let hostname = host.rsplit('@').next().unwrap_or(*host);
        let organization = hostname.split('.').next().unwrap_or_default();
        RepositoryIdentity::azure_devops(organization, project, repository)
      }
      _ => None,
    },
  };

  identity.ok_or_else(|| unrecognized(url))
}

fn resolve_github(url: &str) -> Result<RepositoryIdentity, ScorecardError> {
  let segments: Vec<&str> = url.trim_end_matches('/').split('/').collect();

  let (organization, repository) = if Transport::classify(url) == Some(Transport::Ssh) && !url.starts_with("ssh://") {
    // git@github.com:{org}/{repo}.git
    match segments.as_slice() {
      [host, repository, ..] => match host.split_once(':') {
        Some((_, organization)) => (organization, *repository),
        None => return Err(unrecognized(url)),
      },
      _ => return Err(unrecognized(url)),
    }
  } else {
    // https://github.com/{org}/{repo}.git and ssh://git@github.com/{org}/{repo}.git
    match segments.as_slice() {
      [_, _, _, organization, repository, ..] => (*organization, *repository),
      _ => return Err(unrecognized(url)),
    }
  };

  let repository = repository.strip_suffix(".git").unwrap_or(repository);
  RepositoryIdentity::github(organization, repository).ok_or_else(|| unrecognized(url))
}

/// Resolve the first supported remote out of a remote listing.
///
/// Remotes that resolve to the same identity (the fetch and push lines of one
/// remote) count once. When several distinct identities resolve, the first
/// in listing order wins and a warning names it. Unrecognized remotes are
/// skipped while another one resolves; if nothing resolves, the first
/// unrecognized-format error is returned, else
/// [`ScorecardError::NoRemoteFound`].
pub fn resolve_first<'a, I>(remotes: I, location: &str) -> Result<RepositoryIdentity, ScorecardError>
where
  I: IntoIterator<Item = &'a str>,
{
  let mut identities: Vec<RepositoryIdentity> = Vec::new();
  let mut first_error = None;

  for remote in remotes {
    match resolve(remote) {
      Ok(Some(identity)) => {
        if !identities.contains(&identity) {
          identities.push(identity);
        }
      }
      Ok(None) => debug!("Ignoring unsupported remote '{remote}' for {location}"),
      Err(error) => {
        warn!("{error}");
        first_error.get_or_insert(error);
      }
    }
  }

  let mut identities = identities.into_iter();
  let Some(chosen) = identities.next() else {
    let error = first_error.unwrap_or_else(|| ScorecardError::NoRemoteFound(location.to_string()));
    error!("{error}; can't check for open pull requests");
    return Err(error);
  };

  if identities.next().is_some() {
    warn!("Multiple supported remotes found for {location}; using {chosen}");
  }

  Ok(chosen)
}
