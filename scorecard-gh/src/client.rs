//! # GitHub HTTP Client
//!
//! The client owns an [`HttpFetch`] and a base URL; endpoint modules build
//! request URLs from the base and decode the responses.

use scorecard_core::Credentials;
use scorecard_core::http::{Auth, HttpFetch, ReqwestFetcher};

use crate::consts::{ACCEPT, API_BASE_URL};

/// Represents a GitHub API client
#[derive(Debug, Clone)]
pub struct GitHubClient<F> {
  pub(crate) fetcher: F,
  pub(crate) base_url: String,
}

impl<F: HttpFetch> GitHubClient<F> {
  /// Create a client talking to the public GitHub API
  pub fn new(fetcher: F) -> Self {
    Self::with_base_url(fetcher, API_BASE_URL)
  }

  /// Create a client talking to `base_url` (GitHub Enterprise or a mock server)
  pub fn with_base_url(fetcher: F, base_url: &str) -> Self {
    Self {
      fetcher,
      base_url: base_url.trim_end_matches('/').to_string(),
    }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }
}

/// Authentication for GitHub credentials.
///
/// A `.netrc` entry authenticates with Basic auth using its login; a bare
/// token is sent as a bearer token.
pub fn github_auth(credentials: Credentials) -> Auth {
  if credentials.username.is_empty() {
    Auth::Bearer(credentials.password)
  } else {
    Auth::Basic(credentials)
  }
}

/// Create a GitHub client from credentials
pub fn create_github_client(credentials: Credentials) -> GitHubClient<ReqwestFetcher> {
  GitHubClient::new(ReqwestFetcher::new(github_auth(credentials), ACCEPT))
}
