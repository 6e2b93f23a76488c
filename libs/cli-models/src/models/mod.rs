//! CLI agent API models

use serde::{Deserialize, Serialize};

pub mod components;
pub mod debug;
pub mod deployments;

pub use components::*;
pub use debug::*;
pub use deployments::*;

/// Health response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Version response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Error body returned for every failed CLI request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error kind, e.g. `InvalidArguments`
    pub error: String,
    pub message: String,
}
