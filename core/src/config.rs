//! Base URL configuration.
//!
//! The API base is resolved once, when the application starts, and then
//! handed to `ApiClient::from_config`. Nothing re-reads the environment
//! per call.

use std::env;

/// Environment variable selecting the API base URL.
pub const API_URL_VAR: &str = "RAG_HH_API_URL";

/// Base used when [`API_URL_VAR`] is unset or blank.
pub const DEFAULT_BASE_URL: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
