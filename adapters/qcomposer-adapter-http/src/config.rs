//! Client configuration.

use std::time::Duration;

use crate::error::{HttpServiceError, HttpServiceResult};

/// Where the composer service listens by default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Connection settings for [`HttpCircuitService`](crate::HttpCircuitService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Service root, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ServiceConfig {
    /// Defaults with a different service root.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `QCOMPOSER_SERVICE_URL` and
    /// `QCOMPOSER_TIMEOUT_SECS`.
    pub fn from_env() -> HttpServiceResult<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> HttpServiceResult<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup("QCOMPOSER_SERVICE_URL") {
            config.base_url = url.trim().to_string();
        }
        if let Some(secs) = lookup("QCOMPOSER_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                HttpServiceError::Configuration(format!(
                    "QCOMPOSER_TIMEOUT_SECS must be a whole number of seconds, got '{secs}'"
                ))
            })?;
            if secs == 0 {
                return Err(HttpServiceError::Configuration(
                    "QCOMPOSER_TIMEOUT_SECS must be positive".into(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}
