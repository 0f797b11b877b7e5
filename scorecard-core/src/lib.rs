//! # Scorecard Core Library
//!
//! Shared building blocks of the scorecard generator: resolving a working
//! copy's remote to a provider repository, the deduction and scoring model,
//! the pull request scanner with its provider capability trait, and the
//! configuration, credential and terminal output helpers used by the CLI.

pub mod config;
pub mod creds;
pub mod deduction;
pub mod error;
pub mod git;
pub mod http;
pub mod output;
pub mod remote;
pub mod scanner;
pub mod scorecard;
pub mod text;

pub use config::{ConfigDirs, GroupConfig, ScorecardConfig, ServiceMarkers};
pub use creds::Credentials;
pub use deduction::{Deduction, DeductionKind};
pub use error::{ProviderError, ScorecardError};
#[cfg(any(test, feature = "test-utils"))]
pub use http::StubFetcher;
pub use http::{Auth, HttpFetch, HttpResponse, ReqwestFetcher};
pub use output::{ColorMode, print_info, print_success, print_warning};
pub use remote::{Provider, RepositoryIdentity};
pub use scanner::{FailurePolicy, MatchRule, PullRequest, PullRequestSource};
pub use scorecard::{CheckGroup, CheckInfo, CheckResult, RunInfo, ServiceScorecard};
