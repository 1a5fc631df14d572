//! ecsup - Entry Point
//!
//! Rolls a new container image into an ECS service: fetch the active task
//! definition, swap the first container's image, register the result, force
//! a new deployment and wait for the service to stabilize.

use clap::Parser;

use ecsup::app::options::{validate_image_uri, DeployOptions};
use ecsup::app::run::run;
use ecsup::logs::{init_logging, LogLevel, LogOptions};
use ecsup::utils::version_info;

const EXAMPLES: &str = "\
Examples:
  # Deploy a specific image
  ecsup 602259772901.dkr.ecr.eu-north-1.amazonaws.com/feature-api:31e3524

  # Deploy from CI with repository and tag variables
  ecsup $REPOSITORY_URI:$IMAGE_TAG
";

/// Deploy a new container image to an ECS service
#[derive(Parser, Debug)]
#[command(name = "ecsup", disable_version_flag = true, after_help = EXAMPLES)]
struct Cli {
    /// New container image URI to deploy
    image_uri: Option<String>,

    /// ECS cluster name
    #[arg(long, default_value = "feature-api-test-cluster")]
    cluster: String,

    /// ECS service name
    #[arg(long, default_value = "feature-api-test-service")]
    service: String,

    /// Task definition family
    #[arg(long, default_value = "feature-api-test-family")]
    task_family: String,

    /// AWS region
    #[arg(long, default_value = "eu-north-1")]
    region: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print version information and exit
    #[arg(long)]
    version: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Print version and exit
    if cli.version {
        println!("{}", serde_json::to_string_pretty(&version_info()).unwrap());
        return;
    }

    let Some(image_uri) = cli.image_uri else {
        eprintln!("Error: image URI is required");
        std::process::exit(1);
    };

    // Reject blank input before any external call
    if let Err(e) = validate_image_uri(&image_uri) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let log_level: LogLevel = match cli.log_level.parse() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(LogOptions { log_level }) {
        println!("Failed to initialize logging: {e}");
    }

    let options = DeployOptions {
        cluster: cli.cluster,
        service: cli.service,
        task_family: cli.task_family,
        region: cli.region,
        ..Default::default()
    };

    if let Err(e) = run(&image_uri, options).await {
        eprintln!("Deployment failed: {}", e);
        std::process::exit(1);
    }

    println!("Deployment completed successfully");
}
