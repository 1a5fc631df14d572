//! Top-level deployment run

use tracing::info;

use crate::app::options::DeployOptions;
use crate::aws::cli::AwsCli;
use crate::aws::ecs::Ecs;
use crate::deploy::rollout::Rollout;
use crate::errors::DeployError;

/// Run a rolling deployment of `image_uri` against the real control plane,
/// racing it against an interrupt signal.
pub async fn run(image_uri: &str, options: DeployOptions) -> Result<(), DeployError> {
    let client = Ecs::new(AwsCli::default(), options.region.clone());
    let rollout = Rollout::new(client, options);

    tokio::select! {
        result = rollout.deploy(image_uri) => result,
        _ = await_interrupt() => {
            info!("Interrupt received, aborting deployment...");
            Err(DeployError::Interrupted)
        }
    }
}

async fn await_interrupt() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).unwrap();

        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        info!("Ctrl+C received");
    }
}
