//! # Azure DevOps API Endpoints
//!
//! Pull request listing and the per-iteration change lists behind it.

pub mod iterations;
pub mod pulls;
