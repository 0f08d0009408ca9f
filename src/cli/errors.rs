//! CLI-specific error types
//!
//! All CLI errors are fatal; the process exits non-zero.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server failed to boot or exited abnormally
    #[error("Boot failed: {0}")]
    Boot(String),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Boot(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
