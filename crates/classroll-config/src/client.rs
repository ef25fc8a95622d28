//! Settings for the HTTP client the dashboard stores use to reach the
//! Remote Data API.
//!
//! # Environment Variables
//!
//! - `CLASSROLL_API_URL`: base URL of the API (default: `http://localhost:3000/api`)
//! - `CLASSROLL_API_TIMEOUT_SECS`: per-request timeout (default: 30)

use crate::{env_lookup, parse_or};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("CLASSROLL_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url,
            timeout: Duration::from_secs(parse_or(&lookup, "CLASSROLL_API_TIMEOUT_SECS", 30)),
        }
    }

    /// Joins `path` onto the base URL with exactly one separating slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
