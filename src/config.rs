//! Client configuration.
//!
//! [`ClientConfig`] holds every construction-time setting shared by the async
//! and blocking clients. It is usually filled in through
//! [`ClientBuilder`](crate::ClientBuilder), or read from the environment with
//! [`ClientConfig::from_env`].

use crate::{Backoff, Error, Result};
use std::time::Duration;
use url::Url;

/// Default service root.
pub const DEFAULT_BASE_URL: &str = "https://api.latindictionary.io/api/v1";

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Overrides [`ClientConfig::base_url`].
pub const ENV_BASE_URL: &str = "LATINDICTIONARY_BASE_URL";
/// Overrides [`ClientConfig::timeout`], in (fractional) seconds.
pub const ENV_TIMEOUT_SECS: &str = "LATINDICTIONARY_TIMEOUT_SECS";
/// Overrides [`ClientConfig::max_retries`].
pub const ENV_MAX_RETRIES: &str = "LATINDICTIONARY_MAX_RETRIES";

/// Settings applied to every request a client makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root; trailing slashes are ignored.
    pub base_url: String,

    /// Timeout for each attempt, covering connect through reading the body.
    pub timeout: Duration,

    /// Retries after the first attempt. `0` means exactly one attempt.
    pub max_retries: usize,

    /// Delay policy between attempts.
    pub backoff: Backoff,

    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: Backoff::default(),
            user_agent: concat!("latindictionary/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Returns the default configuration with environment overrides applied.
    ///
    /// Reads `LATINDICTIONARY_BASE_URL`, `LATINDICTIONARY_TIMEOUT_SECS` and
    /// `LATINDICTIONARY_MAX_RETRIES`. Unset or empty variables keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a variable is set but cannot be
    /// parsed.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides looked up by variable name.
    pub(crate) fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(base_url) = var(ENV_BASE_URL) {
            self.base_url = base_url.trim().to_string();
        }

        if let Some(timeout) = var(ENV_TIMEOUT_SECS) {
            self.timeout = timeout
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|secs| *secs > 0.0)
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .ok_or_else(|| {
                    Error::Configuration(format!("{} must be a positive number", ENV_TIMEOUT_SECS))
                })?;
        }

        if let Some(retries) = var(ENV_MAX_RETRIES) {
            self.max_retries = retries.trim().parse().map_err(|_| {
                Error::Configuration(format!(
                    "{} must be a non-negative integer",
                    ENV_MAX_RETRIES
                ))
            })?;
        }

        Ok(self)
    }

    /// Checks the settings and normalizes the base URL.
    pub(crate) fn validate(mut self) -> Result<Self> {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&trimmed)?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "Unsupported base URL scheme: {}",
                parsed.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(Error::Configuration(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        self.base_url = trimmed;
        Ok(self)
    }
}
