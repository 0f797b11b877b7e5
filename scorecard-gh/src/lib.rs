//! # GitHub API Client
//!
//! Lists open Renovate pull requests and their changed files through the
//! GitHub REST API, exposing them to the scanner as a
//! [`scorecard_core::PullRequestSource`].

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod models;

// Re-export the client
pub use client::{GitHubClient, create_github_client, github_auth};
// Re-export models
pub use models::{GitHubChangedFile, GitHubPullRequest, PullRequestRef};
