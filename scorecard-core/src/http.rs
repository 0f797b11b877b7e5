//! # HTTP Seam
//!
//! Provider clients never build an HTTP client themselves. They are handed an
//! [`HttpFetch`] implementation, which is either the live [`ReqwestFetcher`]
//! or, with the `test-utils` feature, a `StubFetcher` serving canned
//! responses.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::creds::Credentials;
use crate::error::ProviderError;

/// User-Agent header value sent with every provider request
pub const DEFAULT_USER_AGENT: &str = concat!("scorecard/", env!("CARGO_PKG_VERSION"));

/// A response reduced to what the scanner needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
  pub status: u16,
  pub body: String,
}

impl HttpResponse {
  pub fn new(status: u16, body: impl Into<String>) -> Self {
    Self {
      status,
      body: body.into(),
    }
  }

  /// Whether the status is in the 2xx range
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

/// Performs a GET request and returns the status and body.
///
/// An `Err` means no response was received at all; non-success statuses are
/// returned as regular responses.
pub trait HttpFetch: Send + Sync {
  fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse>> + Send;
}

impl<T: HttpFetch> HttpFetch for &T {
  fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse>> + Send {
    (**self).get(url)
  }
}

impl<T: HttpFetch> HttpFetch for Arc<T> {
  fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse>> + Send {
    (**self).get(url)
  }
}

/// How requests are authenticated
#[derive(Debug, Clone, Default)]
pub enum Auth {
  #[default]
  None,
  Basic(Credentials),
  Bearer(String),
}

/// Live fetcher backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
  client: Client,
  auth: Auth,
  accept: String,
}

impl ReqwestFetcher {
  /// Create a fetcher sending `accept` as the Accept header
  pub fn new(auth: Auth, accept: &str) -> Self {
    Self {
      client: Client::new(),
      auth,
      accept: accept.to_string(),
    }
  }
}

impl HttpFetch for ReqwestFetcher {
  async fn get(&self, url: &str) -> Result<HttpResponse> {
    debug!("GET {url}");

    let mut request = self
      .client
      .get(url)
      .header(ACCEPT, &self.accept)
      .header(USER_AGENT, DEFAULT_USER_AGENT);

    request = match &self.auth {
      Auth::None => request,
      Auth::Basic(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
      Auth::Bearer(token) => request.bearer_auth(token),
    };

    let response = request
      .send()
      .await
      .with_context(|| format!("Failed to send request to {url}"))?;

    let status = response.status().as_u16();
    let body = response.text().await.context("Failed to read response body")?;

    Ok(HttpResponse { status, body })
  }
}

/// Fetcher serving canned responses keyed by exact URL.
///
/// Unknown URLs answer `404` with an empty body.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Default)]
pub struct StubFetcher {
  responses: std::collections::HashMap<String, HttpResponse>,
}

#[cfg(any(test, feature = "test-utils"))]
impl StubFetcher {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a response for `url`, replacing any earlier one
  pub fn with_response(mut self, url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
    self.responses.insert(url.into(), HttpResponse::new(status, body));
    self
  }

  /// Register a `200` JSON response for `url`
  pub fn with_json(self, url: impl Into<String>, body: &serde_json::Value) -> Self {
    self.with_response(url, 200, body.to_string())
  }
}

#[cfg(any(test, feature = "test-utils"))]
impl HttpFetch for StubFetcher {
  async fn get(&self, url: &str) -> Result<HttpResponse> {
    Ok(
      self
        .responses
        .get(url)
        .cloned()
        .unwrap_or_else(|| HttpResponse::new(404, "")),
    )
  }
}

/// Fetch `url` and decode a successful body as JSON.
///
/// Non-success statuses become [`ProviderError::RequestFailed`] carrying the
/// full body so callers can report or echo it.
pub async fn fetch_json<F, T>(fetcher: &F, url: &str) -> Result<T, ProviderError>
where
  F: HttpFetch,
  T: DeserializeOwned,
{
  let response = fetcher.get(url).await.map_err(|error| ProviderError::Transport {
    url: url.to_string(),
    message: format!("{error:#}"),
  })?;

  if !response.is_success() {
    trace!("response from {url}: {} {}", response.status, response.body);
    return Err(ProviderError::RequestFailed {
      url: url.to_string(),
      status: response.status,
      body: response.body,
    });
  }

  serde_json::from_str(&response.body).map_err(|source| ProviderError::Decode {
    url: url.to_string(),
    source,
  })
}
