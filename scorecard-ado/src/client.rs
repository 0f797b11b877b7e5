//! # Azure DevOps HTTP Client
//!
//! Holds the injected [`HttpFetch`] and the organization-less base URL;
//! endpoint modules append `{org}/{project}/_apis/...` paths to it.

use scorecard_core::Credentials;
use scorecard_core::http::{Auth, HttpFetch, ReqwestFetcher};

use crate::consts::{ACCEPT, API_BASE_URL};

/// Represents an Azure DevOps API client
#[derive(Debug, Clone)]
pub struct AzureDevOpsClient<F> {
  pub(crate) fetcher: F,
  pub(crate) base_url: String,
}

impl<F: HttpFetch> AzureDevOpsClient<F> {
  /// Create a client talking to Azure DevOps Services
  pub fn new(fetcher: F) -> Self {
    Self::with_base_url(fetcher, API_BASE_URL)
  }

  /// Create a client talking to `base_url` instead of `https://dev.azure.com`
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

/// Create an Azure DevOps client authenticating with a personal access token.
///
/// Azure DevOps expects the PAT as the Basic password of an empty username,
/// whatever login the credentials carried.
pub fn create_azure_devops_client(credentials: &Credentials) -> AzureDevOpsClient<ReqwestFetcher> {
  let auth = Auth::Basic(Credentials::personal_access_token(&credentials.password));
  AzureDevOpsClient::new(ReqwestFetcher::new(auth, ACCEPT))
}
