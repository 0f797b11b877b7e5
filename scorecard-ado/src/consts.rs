//! Constants for the scorecard-ado client

/// Base URL for Azure DevOps Services
pub const API_BASE_URL: &str = "https://dev.azure.com";

/// REST API version sent with every request
pub const API_VERSION: &str = "7.0";

/// Accept header value for the Azure DevOps API
pub const ACCEPT: &str = "application/json";
