//! Deployment module

pub mod rollout;
