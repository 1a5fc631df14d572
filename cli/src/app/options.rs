//! Deployment target configuration

use std::path::PathBuf;

use crate::errors::DeployError;

/// Coordinates of the service being rolled
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// ECS cluster name
    pub cluster: String,

    /// ECS service name
    pub service: String,

    /// Task definition family
    pub task_family: String,

    /// AWS region
    pub region: String,

    /// Directory holding the transient registration payload
    pub scratch_dir: PathBuf,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            cluster: "feature-api-test-cluster".to_string(),
            service: "feature-api-test-service".to_string(),
            task_family: "feature-api-test-family".to_string(),
            region: "eu-north-1".to_string(),
            scratch_dir: PathBuf::from("."),
        }
    }
}

/// Reject empty or whitespace-only image references before anything runs
pub fn validate_image_uri(image_uri: &str) -> Result<(), DeployError> {
    if image_uri.trim().is_empty() {
        return Err(DeployError::ValidationError(
            "image URI cannot be empty".to_string(),
        ));
    }
    Ok(())
}
