//! Local deployment models

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of a local deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentStatus {
    Queued,
    InProgress,
    Succeeded,
    Failed,
    Canceled,
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Queued => "QUEUED",
            DeploymentStatus::InProgress => "IN_PROGRESS",
            DeploymentStatus::Succeeded => "SUCCEEDED",
            DeploymentStatus::Failed => "FAILED",
            DeploymentStatus::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "QUEUED" => Ok(DeploymentStatus::Queued),
            "IN_PROGRESS" => Ok(DeploymentStatus::InProgress),
            "SUCCEEDED" => Ok(DeploymentStatus::Succeeded),
            "FAILED" => Ok(DeploymentStatus::Failed),
            "CANCELED" | "CANCELLED" => Ok(DeploymentStatus::Canceled),
            _ => Err(format!("Invalid deployment status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateLocalDeploymentRequest {
    #[serde(default)]
    pub group_name: Option<String>,

    /// Root components to add or update, name to version
    #[serde(default)]
    pub root_component_versions_to_add: Option<HashMap<String, String>>,

    #[serde(default)]
    pub root_components_to_remove: Option<Vec<String>>,

    /// Component name to merge action (`MERGE` / `RESET`) to configuration delta
    #[serde(default)]
    pub component_to_configuration:
        Option<HashMap<String, HashMap<String, serde_json::Value>>>,

    #[serde(default)]
    pub recipe_directory_path: Option<String>,

    #[serde(default)]
    pub artifacts_directory_path: Option<String>,

    /// Caller-chosen deployment id; generated when absent
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLocalDeploymentResponse {
    pub deployment_id: String,
}

/// A local deployment and its current status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalDeployment {
    pub deployment_id: String,
    pub status: DeploymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetLocalDeploymentStatusRequest {
    #[serde(default)]
    pub deployment_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetLocalDeploymentStatusResponse {
    pub deployment: LocalDeployment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListLocalDeploymentsRequest {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListLocalDeploymentsResponse {
    pub local_deployments: Vec<LocalDeployment>,
}
