//! ECS control-plane operations

use std::path::Path;

use async_trait::async_trait;

use crate::aws::cli::AwsCli;
use crate::errors::DeployError;
use crate::models::task_definition::TaskDefinition;

/// Projection limiting `describe-task-definition` output to the fields that
/// `register-task-definition` accepts back.
const DESCRIBE_QUERY: &str = "taskDefinition.{family:family,networkMode:networkMode,requiresCompatibilities:requiresCompatibilities,cpu:cpu,memory:memory,executionRoleArn:executionRoleArn,taskRoleArn:taskRoleArn,containerDefinitions:containerDefinitions}";

/// The ECS control-plane operations used by a rolling deployment
#[async_trait]
pub trait EcsApi: Send + Sync {
    /// Fetch the active task definition for `family`
    async fn describe_task_definition(&self, family: &str) -> Result<TaskDefinition, DeployError>;

    /// Register the task definition serialized at `input_file`, returning
    /// the new task definition ARN
    async fn register_task_definition(&self, input_file: &Path) -> Result<String, DeployError>;

    /// Point `service` at the latest revision of `family` and force a new
    /// deployment
    async fn update_service(
        &self,
        cluster: &str,
        service: &str,
        family: &str,
    ) -> Result<(), DeployError>;

    /// Block until `service` reports stable, delegating polling to the
    /// external client
    async fn wait_services_stable(&self, cluster: &str, service: &str)
        -> Result<(), DeployError>;
}

/// ECS client backed by the external AWS CLI
#[derive(Debug, Clone)]
pub struct Ecs {
    cli: AwsCli,
    region: String,
}

impl Ecs {
    pub fn new(cli: AwsCli, region: impl Into<String>) -> Self {
        Self {
            cli,
            region: region.into(),
        }
    }
}

#[async_trait]
impl EcsApi for Ecs {
    async fn describe_task_definition(&self, family: &str) -> Result<TaskDefinition, DeployError> {
        self.cli
            .output_json(&[
                "ecs",
                "describe-task-definition",
                "--task-definition",
                family,
                "--region",
                &self.region,
                "--query",
                DESCRIBE_QUERY,
            ])
            .await
    }

    async fn register_task_definition(&self, input_file: &Path) -> Result<String, DeployError> {
        let input = format!("file://{}", input_file.display());
        let arn = self
            .cli
            .output(&[
                "ecs",
                "register-task-definition",
                "--cli-input-json",
                &input,
                "--region",
                &self.region,
                "--query",
                "taskDefinition.taskDefinitionArn",
                "--output",
                "text",
            ])
            .await?;

        if arn.is_empty() {
            return Err(DeployError::MalformedResponse {
                command: "aws ecs register-task-definition".to_string(),
                reason: "empty task definition ARN".to_string(),
            });
        }

        Ok(arn)
    }

    async fn update_service(
        &self,
        cluster: &str,
        service: &str,
        family: &str,
    ) -> Result<(), DeployError> {
        // The service tracks the family; ECS resolves it to the revision
        // registered just before this call.
        self.cli
            .output(&[
                "ecs",
                "update-service",
                "--cluster",
                cluster,
                "--service",
                service,
                "--task-definition",
                family,
                "--region",
                &self.region,
                "--force-new-deployment",
            ])
            .await?;

        Ok(())
    }

    async fn wait_services_stable(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<(), DeployError> {
        self.cli
            .status(&[
                "ecs",
                "wait",
                "services-stable",
                "--cluster",
                cluster,
                "--services",
                service,
                "--region",
                &self.region,
            ])
            .await
    }
}
