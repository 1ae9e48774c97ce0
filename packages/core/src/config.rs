use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ConnectorError;

pub const ENV_HTTP_TIMEOUT_SECS: &str = "LINKFLOW_HTTP_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "LINKFLOW_USER_AGENT";
pub const ENV_DEFAULT_LOOKBACK_SECS: &str = "LINKFLOW_DEFAULT_LOOKBACK_SECS";

/// Runtime settings shared by every connector invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Upper bound for a single outbound HTTP request
    pub http_timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Lookback used by polling triggers that declare none of their own
    pub default_lookback_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: 30,
            user_agent: format!("linkflow/{}", env!("CARGO_PKG_VERSION")),
            default_lookback_secs: 3600,
        }
    }
}

impl RuntimeConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConnectorError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConnectorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            config.http_timeout_secs = parse_secs(ENV_HTTP_TIMEOUT_SECS, &value)?;
        }

        if let Some(value) = lookup(ENV_USER_AGENT) {
            if !value.trim().is_empty() {
                config.user_agent = value.trim().to_string();
            }
        }

        if let Some(value) = lookup(ENV_DEFAULT_LOOKBACK_SECS) {
            config.default_lookback_secs = parse_secs(ENV_DEFAULT_LOOKBACK_SECS, &value)?;
        }

        Ok(config)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn default_lookback(&self) -> Duration {
        Duration::from_secs(self.default_lookback_secs)
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64, ConnectorError> {
    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConnectorError::Config(format!("{key}={value:?}: {e}")))?;

    if secs == 0 {
        return Err(ConnectorError::Config(format!("{key} must be positive")));
    }

    Ok(secs)
}
