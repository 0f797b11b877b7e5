//! # Error Taxonomy
//!
//! Recoverable failures raised while resolving remotes and talking to
//! provider APIs. None of these abort a run; they are scoped to the single
//! check invocation that raised them.

use thiserror::Error;

/// Failures raised while locating the repository behind a working copy
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScorecardError {
  /// The remote names a known host but its path does not match any known shape
  #[error("Unknown remote URL format: {0}")]
  UnrecognizedRemoteFormat(String),

  /// No remote of the working copy belongs to a supported provider
  #[error("No supported remote found for {0}")]
  NoRemoteFound(String),

  /// The run was started without a credential for the provider
  #[error("No credentials configured for {0}")]
  MissingCredentials(String),
}

/// Failures raised by a provider API call
#[derive(Debug, Error)]
pub enum ProviderError {
  /// The provider answered with a non-success status
  #[error("Request to {url} failed with HTTP {status}")]
  RequestFailed { url: String, status: u16, body: String },

  /// The response body was not the JSON shape the provider documents
  #[error("Failed to parse response from {url}: {source}")]
  Decode {
    url: String,
    #[source]
    source: serde_json::Error,
  },

  /// The request never produced a response
  #[error("Failed to reach {url}: {message}")]
  Transport { url: String, message: String },
}

impl ProviderError {
  /// URL of the call that failed
  pub fn url(&self) -> &str {
    match self {
      Self::RequestFailed { url, .. } | Self::Decode { url, .. } | Self::Transport { url, .. } => url,
    }
  }
}
