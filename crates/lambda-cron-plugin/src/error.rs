//! Error types for the lambda-cron plugin.

use std::path::PathBuf;

use lambda_cron_schedule::ScheduleError;
use thiserror::Error;

/// Errors that abort a before-package invocation.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A function's schedule descriptor failed validation
    #[error("Failed to schedule cron for {function}: {source}")]
    Schedule {
        function: String,
        #[source]
        source: ScheduleError,
    },

    /// A configured function does not exist in the service definition
    #[error("Function not found in service definition: {0}")]
    FunctionNotFound(String),

    /// The plugin section of the service definition is malformed
    #[error("Invalid plugin configuration: {0}")]
    InvalidConfig(String),

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// A service definition file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A service definition file could not be parsed
    #[error("Failed to parse service definition: {0}")]
    Parse(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PluginError {
    /// The schedule error behind this failure, if any.
    pub fn schedule_error(&self) -> Option<&ScheduleError> {
        match self {
            PluginError::Schedule { source, .. } => Some(source),
            _ => None,
        }
    }
}
