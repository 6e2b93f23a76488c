//! Error types for the CLI agent

use thiserror::Error;

/// Main error type for the agent process (startup, server and shutdown plumbing)
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Shutdown error: {0}")]
    ShutdownError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Host error: {0}")]
    HostError(#[from] crate::host::HostError),
}
