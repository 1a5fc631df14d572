//! AWS CLI integration

pub mod cli;
pub mod ecs;
