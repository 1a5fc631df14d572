//! Error types for ecsup

use thiserror::Error;

/// Main error type for ecsup
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("failed to launch `{command}`: {source}")]
    CommandLaunch {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("malformed response from `{command}`: {reason}")]
    MalformedResponse { command: String, reason: String },

    #[error("no container definitions found in task definition")]
    NoContainers,

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("deployment cancelled by user")]
    Interrupted,
}
