//! Task definition models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ECS task definition, projected to the fields that
/// `register-task-definition` accepts back.
///
/// Fields this tool does not model are preserved verbatim in `extra` so the
/// re-registered definition matches what the control plane returned, apart
/// from the mutated image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    /// Task definition family name
    pub family: String,

    /// Networking mode ('awsvpc', 'bridge', ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,

    /// Launch type compatibilities ('FARGATE', 'EC2')
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_compatibilities: Option<Vec<String>>,

    /// Task-level CPU reservation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,

    /// Task-level memory reservation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,

    /// Execution role ARN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_role_arn: Option<String>,

    /// Task role ARN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_role_arn: Option<String>,

    /// Ordered container specs
    #[serde(default)]
    pub container_definitions: Vec<ContainerDefinition>,

    /// Unmodelled fields, carried through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A single container spec within a task definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDefinition {
    /// Container image reference
    pub image: String,

    /// Unmodelled fields (name, port mappings, environment, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let input = json!({
            "family": "feature-api",
            "networkMode": "awsvpc",
            "requiresCompatibilities": ["FARGATE"],
            "cpu": "256",
            "memory": "512",
            "executionRoleArn": "arn:aws:iam::123456789012:role/exec",
            "taskRoleArn": "arn:aws:iam::123456789012:role/task",
            "containerDefinitions": [{
                "name": "api",
                "image": "repo/image:old",
                "portMappings": [{"containerPort": 8080, "protocol": "tcp"}],
                "environment": [{"name": "MODE", "value": "test"}]
            }],
            "volumes": []
        });

        let task_def: TaskDefinition = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(task_def.family, "feature-api");
        assert_eq!(task_def.container_definitions.len(), 1);
        assert_eq!(task_def.container_definitions[0].image, "repo/image:old");
        assert!(task_def.extra.contains_key("volumes"));
        assert!(task_def.container_definitions[0].extra.contains_key("portMappings"));

        let output = serde_json::to_value(&task_def).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_absent_optionals_are_not_serialized() {
        let input = json!({
            "family": "feature-api",
            "containerDefinitions": [{"image": "repo/image:old"}]
        });

        let task_def: TaskDefinition = serde_json::from_value(input.clone()).unwrap();
        let output = serde_json::to_value(&task_def).unwrap();
        assert_eq!(output, input);
    }
}
