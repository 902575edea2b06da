//! Provisioner configuration.

use serde::Deserialize;
use std::time::Duration;

use crate::error::{ProvisionError, ProvisionResult};

/// Provisioner configuration loaded from environment variables.
///
/// Environment variables are prefixed with `KSQL_`:
/// - `KSQL_URL`: ksqlDB server URL (default: "http://0.0.0.0:8088")
/// - `KSQL_ARTIFACT`: Table whose presence means provisioning already ran
///   (default: "TURNSTILE_SUMMARY")
/// - `KSQL_OFFSET_RESET`: Value for `ksql.streams.auto.offset.reset`
///   (default: "earliest")
/// - `KSQL_TIMEOUT_SECONDS`: Request timeout, `0` disables it (default: 30)
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisionerConfig {
    /// ksqlDB server URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Artifact checked before executing the statement
    #[serde(default = "default_artifact")]
    pub artifact: String,

    /// Offset reset policy for the persistent queries
    #[serde(default = "default_offset_reset")]
    pub offset_reset: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_url() -> String {
    "http://0.0.0.0:8088".to_string()
}

fn default_artifact() -> String {
    "TURNSTILE_SUMMARY".to_string()
}

fn default_offset_reset() -> String {
    "earliest".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl ProvisionerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("KSQL_").from_env::<ProvisionerConfig>()
    }

    /// Load configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("KSQL_").from_iter::<_, ProvisionerConfig>(vars)
    }

    /// Request timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Reject values the provisioner cannot work with.
    pub fn validate(&self) -> ProvisionResult<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ProvisionError::Config(format!(
                "KSQL_URL must be an http(s) URL, got '{}'",
                self.url
            )));
        }
        if self.artifact.trim().is_empty() {
            return Err(ProvisionError::Config(
                "KSQL_ARTIFACT must not be empty".to_string(),
            ));
        }
        if self.offset_reset.trim().is_empty() {
            return Err(ProvisionError::Config(
                "KSQL_OFFSET_RESET must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            artifact: default_artifact(),
            offset_reset: default_offset_reset(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
