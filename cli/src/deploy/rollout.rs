//! Rolling deployment driver

use tracing::{debug, info};

use crate::app::options::DeployOptions;
use crate::aws::ecs::EcsApi;
use crate::errors::DeployError;
use crate::filesys::file::ScopedFile;
use crate::models::task_definition::TaskDefinition;

/// Drives the fixed deployment sequence: describe the current task
/// definition, swap the image, register the result, update the service and
/// wait for it to stabilize. Any failed step aborts the deployment.
pub struct Rollout<C: EcsApi> {
    client: C,
    options: DeployOptions,
}

impl<C: EcsApi> Rollout<C> {
    pub fn new(client: C, options: DeployOptions) -> Self {
        Self { client, options }
    }

    /// Execute the full sequence
    pub async fn deploy(&self, image_uri: &str) -> Result<(), DeployError> {
        info!(
            "Starting deployment of {} to {}/{}",
            image_uri, self.options.cluster, self.options.service
        );

        println!("Retrieving current task definition...");
        let mut task_def = self
            .client
            .describe_task_definition(&self.options.task_family)
            .await?;

        println!("Updating task definition with new image: {}", image_uri);
        set_image(&mut task_def, image_uri)?;

        println!("Registering new task definition...");
        let task_def_arn = self.register(&task_def).await?;
        println!("New task definition registered: {}", task_def_arn);

        println!("Updating ECS service...");
        self.client
            .update_service(
                &self.options.cluster,
                &self.options.service,
                &self.options.task_family,
            )
            .await?;
        println!("Service update initiated");

        println!("Waiting for deployment to stabilize...");
        self.client
            .wait_services_stable(&self.options.cluster, &self.options.service)
            .await?;

        info!("Deployment of {} complete", image_uri);
        Ok(())
    }

    /// Register through a file handoff. The serialized payload is removed
    /// whether the call succeeds or not.
    async fn register(&self, task_def: &TaskDefinition) -> Result<String, DeployError> {
        let path = self
            .options
            .scratch_dir
            .join(format!("task-def-{}.json", uuid::Uuid::new_v4()));
        debug!("Writing task definition payload to {}", path.display());

        let payload = ScopedFile::create_json(path, task_def).await?;
        let result = self.client.register_task_definition(payload.path()).await;
        payload.cleanup().await;

        result
    }
}

/// Overwrite the first container's image reference.
///
/// Task definitions are assumed to run a single container; only
/// `containerDefinitions[0]` is touched.
pub fn set_image(task_def: &mut TaskDefinition, image_uri: &str) -> Result<(), DeployError> {
    let container = task_def
        .container_definitions
        .first_mut()
        .ok_or(DeployError::NoContainers)?;

    debug!("Replacing image {} with {}", container.image, image_uri);
    container.image = image_uri.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task_def(containers: serde_json::Value) -> TaskDefinition {
        serde_json::from_value(json!({
            "family": "feature-api",
            "cpu": "256",
            "memory": "512",
            "containerDefinitions": containers
        }))
        .unwrap()
    }

    #[test]
    fn test_set_image_changes_only_first_container() {
        let mut def = task_def(json!([
            {"name": "api", "image": "repo/image:old", "essential": true},
            {"name": "sidecar", "image": "repo/sidecar:v1"}
        ]));
        let before = serde_json::to_value(&def).unwrap();

        set_image(&mut def, "repo/image:tag123").unwrap();

        let after = serde_json::to_value(&def).unwrap();
        assert_eq!(after["containerDefinitions"][0]["image"], "repo/image:tag123");
        assert_eq!(after["containerDefinitions"][1], before["containerDefinitions"][1]);

        // Everything except the one image field survives untouched
        let mut expected = before.clone();
        expected["containerDefinitions"][0]["image"] = json!("repo/image:tag123");
        assert_eq!(after, expected);
    }

    #[test]
    fn test_set_image_fails_on_empty_container_list() {
        let mut def = task_def(json!([]));
        let err = set_image(&mut def, "repo/image:tag123").unwrap_err();
        assert!(matches!(err, DeployError::NoContainers));
    }
}
