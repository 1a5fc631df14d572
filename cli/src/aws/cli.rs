//! External AWS CLI invoker
//!
//! All control-plane protocol work is delegated to the `aws` executable;
//! this module only launches it and translates failures.

use std::process::Stdio;

use serde::de::DeserializeOwned;
use tokio::process::Command;
use tracing::debug;

use crate::errors::DeployError;

/// Invokes the external `aws` executable and captures its output
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: String,
}

impl Default for AwsCli {
    fn default() -> Self {
        Self {
            program: "aws".to_string(),
        }
    }
}

impl AwsCli {
    /// Create an invoker for a specific executable (used by tests)
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run the command and return its stdout, trimmed.
    ///
    /// A non-zero exit becomes [`DeployError::CommandFailed`] carrying the
    /// attempted command line and the captured stderr.
    pub async fn output(&self, args: &[&str]) -> Result<String, DeployError> {
        let rendered = self.render(args);
        debug!("Running: {}", rendered);

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| DeployError::CommandLaunch {
                command: rendered.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(DeployError::CommandFailed {
                command: rendered,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run the command and parse its stdout as JSON
    pub async fn output_json<T: DeserializeOwned>(&self, args: &[&str]) -> Result<T, DeployError> {
        let rendered = self.render(args);
        let stdout = self.output(args).await?;

        if stdout.is_empty() {
            return Err(DeployError::MalformedResponse {
                command: rendered,
                reason: "empty response body".to_string(),
            });
        }

        serde_json::from_str(&stdout).map_err(|e| DeployError::MalformedResponse {
            command: rendered,
            reason: e.to_string(),
        })
    }

    /// Run the command for its exit status only, inheriting stdio so the
    /// client's own progress output reaches the user directly.
    pub async fn status(&self, args: &[&str]) -> Result<(), DeployError> {
        let rendered = self.render(args);
        debug!("Running: {}", rendered);

        let status = Command::new(&self.program)
            .args(args)
            .status()
            .await
            .map_err(|e| DeployError::CommandLaunch {
                command: rendered.clone(),
                source: e,
            })?;

        if !status.success() {
            return Err(DeployError::CommandFailed {
                command: rendered,
                status: status.to_string(),
                stderr: String::new(),
            });
        }

        Ok(())
    }

    fn render(&self, args: &[&str]) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend_from_slice(args);
        parts.join(" ")
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;

    #[test]
    fn test_output_captures_trimmed_stdout() {
        tokio_test::block_on(async {
            let cli = AwsCli::new("sh");
            let stdout = cli.output(&["-c", "echo '  hello  '"]).await.unwrap();
            assert_eq!(stdout, "hello");
        });
    }

    #[test]
    fn test_nonzero_exit_carries_stderr() {
        tokio_test::block_on(async {
            let cli = AwsCli::new("sh");
            let err = cli
                .output(&["-c", "echo boom >&2; exit 3"])
                .await
                .unwrap_err();
            match err {
                DeployError::CommandFailed { stderr, .. } => assert_eq!(stderr, "boom"),
                other => panic!("unexpected error: {other:?}"),
            }
        });
    }

    #[test]
    fn test_missing_program_is_a_launch_error() {
        tokio_test::block_on(async {
            let cli = AwsCli::new("ecsup-no-such-program");
            let err = cli.output(&["help"]).await.unwrap_err();
            assert!(matches!(err, DeployError::CommandLaunch { .. }));
        });
    }

    #[test]
    fn test_output_json_rejects_empty_and_malformed() {
        tokio_test::block_on(async {
            let cli = AwsCli::new("sh");

            let err = cli
                .output_json::<serde_json::Value>(&["-c", "true"])
                .await
                .unwrap_err();
            assert!(matches!(err, DeployError::MalformedResponse { .. }));

            let err = cli
                .output_json::<serde_json::Value>(&["-c", "echo not-json"])
                .await
                .unwrap_err();
            assert!(matches!(err, DeployError::MalformedResponse { .. }));
        });
    }

    #[test]
    fn test_output_json_parses_valid_json() {
        tokio_test::block_on(async {
            let cli = AwsCli::new("sh");
            let value: serde_json::Value = cli
                .output_json(&["-c", r#"echo '{"status": "ACTIVE"}'"#])
                .await
                .unwrap();
            assert_eq!(value["status"], "ACTIVE");
        });
    }
}
