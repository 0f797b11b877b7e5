//! Test utilities shared across the scorecard workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary git repositories with remotes ([`GitRepoTestGuard`])
//! - Service trees with project files ([`ServiceTreeBuilder`])
//! - Environment variable isolation ([`EnvVarGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod git;
pub mod services;

// Re-export commonly used items
pub use env::EnvVarGuard;
pub use git::GitRepoTestGuard;
pub use services::{ServiceTreeBuilder, complete_csproj, csproj_with_properties};
