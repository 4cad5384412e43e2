//! CLI library components for churn prediction.

pub mod commands;
pub mod config;
pub mod logging;
pub mod summary;
