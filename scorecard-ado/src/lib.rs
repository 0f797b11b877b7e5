//! # Azure DevOps API Client
//!
//! Lists active Renovate pull requests of an Azure DevOps repository and
//! collects the paths they change across every iteration, exposing them to
//! the scanner as a [`scorecard_core::PullRequestSource`].

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod models;

// Re-export the client
pub use client::{AzureDevOpsClient, create_azure_devops_client};
// Re-export models
pub use models::{AzureChangeEntry, AzureChanges, AzureIteration, AzurePullRequest, AzureRepository};
