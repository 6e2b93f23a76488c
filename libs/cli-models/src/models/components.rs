//! Component models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a component as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    New,
    Installed,
    Starting,
    Running,
    Stopping,
    Errored,
    Broken,
    Finished,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::New => "NEW",
            LifecycleState::Installed => "INSTALLED",
            LifecycleState::Starting => "STARTING",
            LifecycleState::Running => "RUNNING",
            LifecycleState::Stopping => "STOPPING",
            LifecycleState::Errored => "ERRORED",
            LifecycleState::Broken => "BROKEN",
            LifecycleState::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NEW" => Ok(LifecycleState::New),
            "INSTALLED" => Ok(LifecycleState::Installed),
            "STARTING" => Ok(LifecycleState::Starting),
            "RUNNING" => Ok(LifecycleState::Running),
            "STOPPING" => Ok(LifecycleState::Stopping),
            "ERRORED" => Ok(LifecycleState::Errored),
            "BROKEN" => Ok(LifecycleState::Broken),
            "FINISHED" => Ok(LifecycleState::Finished),
            _ => Err(format!("Invalid lifecycle state: {}", s)),
        }
    }
}

/// Snapshot of a single component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDetails {
    pub component_name: String,
    pub version: String,
    pub state: LifecycleState,
    #[serde(default)]
    pub configuration: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetComponentDetailsRequest {
    #[serde(default)]
    pub component_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetComponentDetailsResponse {
    pub component_details: ComponentDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListComponentsRequest {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListComponentsResponse {
    pub components: Vec<ComponentDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestartComponentRequest {
    #[serde(default)]
    pub component_name: Option<String>,
}

/// Acknowledgement only; the restart itself happens asynchronously on the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartComponentResponse {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopComponentRequest {
    #[serde(default)]
    pub component_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopComponentResponse {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecipesAndArtifactsRequest {
    #[serde(default)]
    pub recipe_directory_path: Option<String>,
    #[serde(default)]
    pub artifacts_directory_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecipesAndArtifactsResponse {}
