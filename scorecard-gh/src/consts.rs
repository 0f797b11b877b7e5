//! Constants for the scorecard-gh client

/// Base URL for the official SaaS GitHub API
pub const API_BASE_URL: &str = "https://api.github.com";

/// Accept header value for the GitHub API
pub const ACCEPT: &str = "application/vnd.github.v3+json";
