//! Provisioning error types.

use thiserror::Error;

/// Errors that can occur while provisioning KSQL tables.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Connection refused, DNS failure, timeout and other transport failures.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The statement endpoint answered with a non-2xx status.
    #[error("Failed to run KSQL queries (status {status}): {body}")]
    ProvisioningFailed { status: u16, body: String },

    /// The table lookup answered with a non-2xx status.
    #[error("Failed to list KSQL tables (status {status}): {body}")]
    ExistenceCheck { status: u16, body: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<envy::Error> for ProvisionError {
    fn from(err: envy::Error) -> Self {
        ProvisionError::Config(err.to_string())
    }
}

/// Result type alias using ProvisionError.
pub type ProvisionResult<T> = Result<T, ProvisionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provisioning_failed_message() {
        let err = ProvisionError::ProvisioningFailed {
            status: 400,
            body: r#"{"error": "bad statement"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"Failed to run KSQL queries (status 400): {"error": "bad statement"}"#
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = ProvisionError::Config("KSQL_URL must not be empty".to_string());
        assert_eq!(err.to_string(), "Configuration error: KSQL_URL must not be empty");
    }
}
