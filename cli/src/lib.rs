//! ecsup Library
//!
//! Core modules for rolling a new container image into an ECS service
//! through the external AWS CLI.

pub mod app;
pub mod aws;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod logs;
pub mod models;
pub mod utils;
