//! Data models

pub mod task_definition;
