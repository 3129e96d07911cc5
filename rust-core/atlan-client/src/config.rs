// SPDX-License-Identifier: PMPL-1.0-or-later
//! Client configuration.

use std::fmt;
use std::time::Duration;

use atlan_search::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

use crate::error::{AtlanError, Result};

pub const ENV_BASE_URL: &str = "ATLAN_BASE_URL";
pub const ENV_API_KEY: &str = "ATLAN_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "ATLAN_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "ATLAN_MAX_RETRIES";

/// Connection settings for an [`AtlanClient`](crate::AtlanClient).
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Tenant URL, e.g. `https://tenant.atlan.com`
    pub base_url: String,
    /// API token sent as a bearer token. `None` sends no credentials.
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub timeout_secs: u64,
    /// Retries after the first attempt for throttled, unavailable or
    /// unreachable requests.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each later one.
    pub retry_backoff_ms: u64,
    /// Page size for searches started from the client.
    pub page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_token: None,
            timeout_secs: 30,
            max_retries: 3,
            retry_backoff_ms: 250,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Read `ATLAN_BASE_URL`, `ATLAN_API_KEY` and the optional
    /// `ATLAN_TIMEOUT_SECS` / `ATLAN_MAX_RETRIES` overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// As [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AtlanError::Validation(format!("{ENV_BASE_URL} is not set")))?;

        let mut config = Self::new(base_url);
        config.api_token = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty());
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = parse_var(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            config.max_retries = parse_var(ENV_MAX_RETRIES, &raw)?;
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Delay before retry number `attempt` (0-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.min(16);
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AtlanError::Validation(format!("{name} must be a non-negative integer, got '{raw}'")))
}
