//! Core building blocks shared by all commands
//!
//! - **config**: sonar-jdt.toml parsing and validation
//! - **context**: Unified workspace context (config + build model), loaded once
//! - **error**: Error types with contextual help messages and exit codes

pub mod config;
pub mod context;
pub mod error;
